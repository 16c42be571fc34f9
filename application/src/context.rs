//! [`Context`]-related definitions.

use std::{fs, io, path::PathBuf};

use derive_more::{Display, Error as StdError, From};
use secrecy::ExposeSecret as _;
use serde::{Deserialize, Serialize};
use service::domain::user::{
    session::{self, Token, Tokens},
    Role, Session,
};
use tracerr::Traced;
use tracing as log;

use crate::{define_error, AsError};

/// Application context remembering the current [`Session`] between runs.
///
/// Loaded and saved explicitly, so nothing is persisted implicitly.
#[derive(Debug)]
pub struct Context {
    /// Path to the file the [`Session`] is remembered in.
    path: PathBuf,

    /// Current [`Session`], if any.
    session: Option<Session>,
}

impl Context {
    /// Loads the [`Context`] from the file at the provided `path`.
    ///
    /// Missing file means no [`Session`]. Expired [`Session`] is forgotten.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or doesn't contain a valid [`Session`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, Traced<Error>> {
        let path = path.into();

        let contents = match fs::read(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Self {
                    path,
                    session: None,
                });
            }
            Err(e) => return Err(tracerr::new!(Error::from(e))),
        };

        let Stored { access, refresh } = serde_json::from_slice(&contents)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let token = |t: String| {
            Token::new(t)
                .map(Token::into_secret)
                .ok_or(Error::BlankToken)
                .map_err(tracerr::wrap!())
        };
        let session = Session::new(Tokens {
            access: token(access)?,
            refresh: token(refresh)?,
        })
        .map_err(tracerr::from_and_wrap!(=> Error))?;

        if session.claims.is_expired() {
            log::warn!(
                user_id = %session.claims.user_id,
                "remembered session expired, log in again",
            );
            return Ok(Self {
                path,
                session: None,
            });
        }

        Ok(Self {
            path,
            session: Some(session),
        })
    }

    /// Saves the current [`Session`] to the file this [`Context`] was loaded
    /// from, or removes the file if there is no [`Session`].
    ///
    /// # Errors
    ///
    /// If the file cannot be written or removed.
    pub fn save(&self) -> Result<(), Traced<Error>> {
        let Some(session) = &self.session else {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => {
                    Err(tracerr::new!(Error::from(e)))
                }
                Ok(()) | Err(_) => Ok(()),
            };
        };

        let stored = Stored {
            access: session.tokens.access.expose_secret().to_string(),
            refresh: session.tokens.refresh.expose_secret().to_string(),
        };
        let contents = serde_json::to_vec_pretty(&stored)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        fs::write(&self.path, contents)
            .map_err(tracerr::from_and_wrap!(=> Error))
    }

    /// Returns the current [`Session`], if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Returns the current [`Session`] along with its [`Role`].
    ///
    /// # Errors
    ///
    /// If there is no [`Session`] or it grants no [`Role`].
    pub fn authorized(&self) -> Result<(&Session, Role), crate::Error> {
        define_error! {
            enum Error {
                #[code = "NOT_LOGGED_IN"]
                #[kind = Validation]
                #[message = "Not logged in, run `tms login` first"]
                NotLoggedIn,

                #[code = "NO_ROLE"]
                #[kind = Validation]
                #[message = "Logged in `User` is neither an owner nor a \
                             transporter"]
                NoRole,
            }
        }

        let session = self.session().ok_or(Error::NotLoggedIn)?;
        let role = session.role().ok_or(Error::NoRole)?;
        Ok((session, role))
    }

    /// Replaces the current [`Session`].
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Forgets the current [`Session`].
    pub fn clear(&mut self) {
        self.session = None;
    }
}

/// [`Session`] as remembered in a file.
#[derive(Debug, Deserialize, Serialize)]
struct Stored {
    /// Access [`Token`].
    access: String,

    /// Refresh [`Token`].
    refresh: String,
}

/// Error of loading or saving a [`Context`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// File cannot be accessed.
    #[display("Session file is not accessible: {_0}")]
    Io(io::Error),

    /// File contents are not valid JSON.
    #[display("Session file is malformed: {_0}")]
    Json(serde_json::Error),

    /// Remembered access [`Token`] cannot be decoded.
    #[display("{_0}")]
    Token(session::DecodeError),

    /// Remembered [`Token`] is blank.
    #[display("Session file contains a blank token")]
    BlankToken,
}

impl AsError for Error {
    fn try_as_error(&self) -> Option<crate::Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_SESSION"]
                #[kind = Validation]
                #[message = "Remembered session is invalid, log in again"]
                InvalidSession,
            }
        }

        match self {
            Self::Io(_) => None,
            Self::Json(_) | Self::Token(_) | Self::BlankToken => {
                Some(Error::InvalidSession.into())
            }
        }
    }
}

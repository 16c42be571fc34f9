//! [`Command`] for creating a [`Session`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{
        self,
        session::{self, Credentials, Tokens},
        Session,
    },
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`] by [`User`] credentials.
#[derive(Clone, Debug)]
pub struct CreateUserSession {
    /// [`user::Username`] of a [`User`].
    pub username: user::Username,

    /// [`user::Password`] of a [`User`].
    pub password: SecretBox<user::Password>,
}

impl<A> Command<CreateUserSession> for Service<A>
where
    A: Api<Perform<Credentials>, Ok = Tokens, Err = Traced<api::Error>>,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUserSession { username, password } = cmd;

        let tokens = self
            .api()
            .execute(Perform(Credentials {
                username: username.clone(),
                password,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let session =
            Session::new(tokens).map_err(tracerr::from_and_wrap!(=> E))?;
        log::info!(
            %username,
            user_id = %session.claims.user_id,
            role = ?session.role(),
            "session created",
        );

        Ok(session)
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Backend [`Api`] error.
    #[display("Backend request failed: {_0}")]
    Api(api::Error),

    /// Issued access [`session::Token`] cannot be decoded.
    #[display("{_0}")]
    InvalidToken(session::DecodeError),
}

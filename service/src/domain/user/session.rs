//! [`Session`] definitions.

use common::{unit, DateTime, DateTimeOf};
use derive_more::{AsRef, Display, Error, From};
use secrecy::{zeroize::Zeroize, CloneableSecret, ExposeSecret as _, SecretBox};
use serde::{Deserialize, Serialize};

use crate::domain::user::{self, Password, Role, Username};
#[cfg(doc)]
use crate::domain::User;

/// Authenticated session of a [`User`].
#[derive(Clone, Debug)]
pub struct Session {
    /// [`Tokens`] issued for this [`Session`].
    pub tokens: Tokens,

    /// [`Claims`] carried by the access [`Token`].
    pub claims: Claims,
}

impl Session {
    /// Creates a new [`Session`] out of the provided [`Tokens`], decoding the
    /// [`Claims`] of the access [`Token`].
    ///
    /// # Errors
    ///
    /// If the access [`Token`] is not a decodable JSON Web Token.
    pub fn new(tokens: Tokens) -> Result<Self, DecodeError> {
        let claims = Claims::decode(tokens.access.expose_secret())?;
        Ok(Self { tokens, claims })
    }

    /// Returns [`Role`] of the [`User`] owning this [`Session`].
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.claims.role()
    }
}

/// Claims of an access [`Token`] issued by the backend.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Claims {
    /// ID of the [`User`] the [`Token`] was issued to.
    pub user_id: user::Id,

    /// [`DateTime`] when the [`Token`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,

    /// Indicator whether the [`User`] is a package owner.
    #[serde(default)]
    pub is_owner: bool,

    /// Indicator whether the [`User`] is a transporter.
    #[serde(default)]
    pub is_transporter: bool,
}

impl Claims {
    /// Decodes [`Claims`] out of the provided [`Token`].
    ///
    /// The signature is __not__ verified: the client holds no key for it, and
    /// the backend verifies every request anyway.
    ///
    /// # Errors
    ///
    /// If the [`Token`] is not a well-formed JSON Web Token.
    pub fn decode(token: &Token) -> Result<Self, DecodeError> {
        let mut validation = jsonwebtoken::Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        jsonwebtoken::decode::<Self>(
            token.as_ref(),
            &jsonwebtoken::DecodingKey::from_secret(&[]),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(DecodeError)
    }

    /// Returns [`Role`] these [`Claims`] grant.
    ///
    /// Owner takes precedence if both flags are set.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        if self.is_owner {
            Some(Role::Owner)
        } else if self.is_transporter {
            Some(Role::Transporter)
        } else {
            None
        }
    }

    /// Indicates whether the [`Token`] these [`Claims`] belong to is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        DateTime::now().coerce() >= self.expires_at
    }
}

/// Error of decoding [`Claims`].
#[derive(Debug, Display, Error, From)]
#[display("Failed to decode access token claims: {_0}")]
pub struct DecodeError(jsonwebtoken::errors::Error);

/// Pair of [`Token`]s issued on login.
#[derive(Clone, Debug)]
pub struct Tokens {
    /// Short-living access [`Token`] sent as a bearer with every request.
    pub access: SecretBox<Token>,

    /// Long-living [`Token`] for obtaining new access [`Token`]s.
    pub refresh: SecretBox<Token>,
}

/// Opaque token issued by the backend.
#[derive(AsRef, Clone, Debug, Display)]
#[as_ref(str)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] if the given `token` is not blank.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        (!token.trim().is_empty() && !token.contains(char::is_whitespace))
            .then_some(Self(token))
    }

    /// Wraps this [`Token`] into a [`SecretBox`].
    #[must_use]
    pub fn into_secret(self) -> SecretBox<Self> {
        SecretBox::new(Box::new(self))
    }
}

impl CloneableSecret for Token {}
impl Zeroize for Token {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Credentials a [`User`] logs in with.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// [`Username`] of the [`User`].
    pub username: Username,

    /// [`Password`] of the [`User`].
    pub password: SecretBox<Password>,
}

/// [`DateTime`] of an access [`Token`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

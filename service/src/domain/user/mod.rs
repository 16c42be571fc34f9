//! [`User`] definitions.

pub mod session;

use common::define_kind;
use derive_more::{AsRef, Display, From, FromStr, Into};
use secrecy::{zeroize::Zeroize, CloneableSecret};
use serde::{Deserialize, Serialize};

pub use self::session::Session;

/// Reference to a user of the system, as exposed to other users.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Username`] of this [`User`].
    pub username: Username,

    /// Name of the company this [`User`] represents, if any.
    pub company_name: Option<CompanyName>,
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(u64);

/// Username of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Username(String);

impl Username {
    /// Creates a new [`Username`] if the given `username` is valid.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Option<Self> {
        let username = username.into();
        Self::check(&username).then_some(Self(username))
    }

    /// Checks whether the given `username` is a valid [`Username`].
    fn check(username: impl AsRef<str>) -> bool {
        let username = username.as_ref();
        !username.is_empty()
            && username.len() <= 150
            && !username.chars().any(char::is_whitespace)
    }
}

impl FromStr for Username {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Username`")
    }
}

/// Name of a company a [`User`] represents.
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
pub struct CompanyName(String);

/// Password of a [`User`].
#[derive(AsRef, Clone, Debug)]
#[as_ref(str)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is not empty.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        (!password.is_empty()).then_some(Self(password))
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

define_kind! {
    #[doc = "Role a [`User`] acts in."]
    #[case = "lowercase"]
    enum Role {
        #[doc = "Owner of packages to be delivered."]
        Owner = 1,

        #[doc = "Transporter delivering packages."]
        Transporter = 2,
    }
}

impl Role {
    /// Returns the [`Role`] on the other side of a negotiation.
    #[must_use]
    pub const fn counterparty(self) -> Self {
        match self {
            Self::Owner => Self::Transporter,
            Self::Transporter => Self::Owner,
        }
    }
}

//! [`Offer`] definitions.

pub mod transition;

use common::{money::Currency, unit, DateTimeOf, Money};
use derive_more::{Display, Error, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{package, user::Role, Package, User};

pub use self::transition::{Action, InvalidTransition, Status, Transition};

/// Price proposed for delivering a [`Package`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offer {
    /// ID of this [`Offer`].
    pub id: Id,

    /// [`Package`] being negotiated.
    pub package: Package,

    /// [`User`] who proposed this [`Offer`].
    pub sender: User,

    /// [`User`] this [`Offer`] was proposed to, if known.
    pub receiver: Option<User>,

    /// Current [`Price`] of this [`Offer`].
    pub price: Price,

    /// Current [`Status`] of this [`Offer`].
    pub status: Status,

    /// Indicator whether the current [`Price`] was set by the [`Package`]
    /// owner.
    pub changed_by_owner: bool,

    /// [`CreationDateTime`] of this [`Offer`].
    pub created_at: CreationDateTime,
}

impl Offer {
    /// Returns [`Role`] of the party who set the current [`Price`].
    #[must_use]
    pub const fn price_setter(&self) -> Role {
        if self.changed_by_owner {
            Role::Owner
        } else {
            Role::Transporter
        }
    }

    /// Indicates whether this [`Offer`] waits for a response of the provided
    /// [`Role`].
    #[must_use]
    pub fn is_awaiting(&self, role: Role) -> bool {
        self.status.is_open() && self.price_setter() != role
    }
}

/// ID of an [`Offer`].
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

/// Strictly positive amount of [`Money`] proposed in an [`Offer`].
#[derive(Clone, Copy, Debug, Display, Eq, Into, PartialEq)]
pub struct Price(Money);

impl Price {
    /// Creates a new [`Price`] if the provided [`Money`] is positive.
    #[must_use]
    pub fn new(money: Money) -> Option<Self> {
        money.is_positive().then_some(Self(money))
    }

    /// Parses a [`Price`] out of user input.
    ///
    /// Accepts either a bare decimal amount (assumed to be in the provided
    /// [`Currency`]) or an amount suffixed with the same [`Currency`] code.
    ///
    /// # Errors
    ///
    /// If the input is empty, not numeric, not positive, or is in a different
    /// [`Currency`].
    pub fn parse(
        input: &str,
        currency: Currency,
    ) -> Result<Self, InvalidOfferAmount> {
        let trimmed = input.trim();
        let money = Decimal::from_str(trimmed)
            .map(|amount| Money::new(amount, currency))
            .or_else(|_| Money::from_str(trimmed))
            .ok()
            .filter(|m| m.currency == currency);
        money
            .and_then(Self::new)
            .ok_or_else(|| InvalidOfferAmount(input.to_owned()))
    }

    /// Returns the amount of this [`Price`].
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0.amount
    }

    /// Returns [`Money`] of this [`Price`].
    #[must_use]
    pub const fn money(&self) -> Money {
        self.0
    }
}

/// Error of an offer amount being empty, non-numeric or not positive.
#[derive(Clone, Debug, Display, Error, Eq, PartialEq)]
#[display("`{_0}` is not a valid offer amount")]
pub struct InvalidOfferAmount(#[error(not(source))] pub String);

/// New [`Offer`] to be submitted against a [`Package`].
#[derive(Clone, Copy, Debug)]
pub struct Proposal {
    /// ID of the [`Package`] to propose the [`Price`] for.
    pub package_id: package::Id,

    /// Proposed [`Price`].
    pub price: Price,
}

/// [`Transition`] requested for an existing [`Offer`].
#[derive(Clone, Copy, Debug)]
pub struct Change {
    /// ID of the [`Offer`] to change.
    pub id: Id,

    /// [`Transition`] to perform.
    pub transition: Transition,
}

/// [`DateTime`] of an [`Offer`] creation.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Offer, unit::Creation)>;

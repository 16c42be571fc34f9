//! [`Package`] definitions.

use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Package listed on the marketplace by its owner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Package {
    /// ID of this [`Package`].
    pub id: Id,

    /// [`Title`] of this [`Package`].
    pub title: Title,

    /// Free-form description of this [`Package`].
    pub description: String,

    /// [`Location`] this [`Package`] is picked up at.
    pub pickup_location: Location,

    /// [`Location`] this [`Package`] is dropped at.
    pub drop_location: Location,

    /// [`Weight`] of this [`Package`].
    pub weight: Weight,

    /// Price its owner expects to pay for the delivery.
    pub price_expectation: Money,

    /// URL of the image of this [`Package`], if any.
    pub image: Option<String>,

    /// [`Status`] of this [`Package`].
    pub status: Status,

    /// [`CreationDateTime`] of this [`Package`].
    pub created_at: CreationDateTime,
}

/// ID of a [`Package`].
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

/// Title of a [`Package`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

/// Named place a [`Package`] travels between.
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
pub struct Location(String);

/// Weight of a [`Package`] in kilograms.
#[derive(Clone, Copy, Debug, Display, Eq, Into, Ord, PartialEq, PartialOrd)]
#[display("{_0}kg")]
pub struct Weight(Decimal);

impl Weight {
    /// Creates a new [`Weight`] if the provided `kg` is not negative.
    #[must_use]
    pub fn new(kg: Decimal) -> Option<Self> {
        (kg >= Decimal::ZERO).then_some(Self(kg))
    }
}

define_kind! {
    #[doc = "Status of a [`Package`] delivery."]
    #[case = "PascalCase"]
    enum Status {
        #[doc = "[`Package`] is open for offers."]
        Available = 1,

        #[doc = "[`Package`] has offers being negotiated."]
        Negotiating = 2,

        #[doc = "[`Package`] is booked by a transporter."]
        Booked = 3,

        #[doc = "[`Package`] is loaded onto a vehicle."]
        Loaded = 4,

        #[doc = "[`Package`] is delivered."]
        Delivered = 5,
    }
}

/// [`DateTime`] of a [`Package`] creation.
///
/// [`DateTime`]: common::DateTime
pub type CreationDateTime = DateTimeOf<(Package, unit::Creation)>;

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{Status, Weight};

    #[test]
    fn weight_is_not_negative() {
        assert!(Weight::new(Decimal::new(125, 1)).is_some());
        assert!(Weight::new(Decimal::ZERO).is_some());
        assert!(Weight::new(Decimal::NEGATIVE_ONE).is_none());
    }

    #[test]
    fn status_reads_as_served() {
        assert_eq!("Negotiating".parse::<Status>(), Ok(Status::Negotiating));
        assert_eq!(Status::Delivered.to_string(), "Delivered");
    }
}

//! JSON bodies exchanged with the REST backend.

use common::{datetime, money::Currency, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    offer::{self, Status},
    package,
    user::{self, session, Username},
};

/// Served [`offer::Offer`].
#[derive(Debug, Deserialize)]
pub(super) struct Offer {
    id: offer::Id,
    package: Package,
    sender: User,
    #[serde(default)]
    receiver: Option<User>,
    offer_price: Decimal,
    status: Status,
    #[serde(default)]
    changed_by_owner: bool,
    #[serde(with = "datetime::serde::rfc3339")]
    created_at: offer::CreationDateTime,
}

impl Offer {
    /// Validates this [`Offer`] into a domain one.
    pub(super) fn into_domain(
        self,
        currency: Currency,
    ) -> Result<offer::Offer, String> {
        let Self {
            id,
            package,
            sender,
            receiver,
            offer_price,
            status,
            changed_by_owner,
            created_at,
        } = self;

        Ok(offer::Offer {
            id,
            package: package.into_domain(currency)?,
            sender: sender.try_into()?,
            receiver: receiver.map(TryInto::try_into).transpose()?,
            price: offer::Price::new(Money::new(offer_price, currency))
                .ok_or_else(|| {
                    format!("`Offer(id: {id})` has non-positive price")
                })?,
            status,
            changed_by_owner,
            created_at,
        })
    }
}

/// Served [`package::Package`].
#[derive(Debug, Deserialize)]
pub(super) struct Package {
    id: package::Id,
    title: String,
    #[serde(default)]
    description: String,
    pickup_location: String,
    drop_location: String,
    weight: Decimal,
    price_expectation: Decimal,
    #[serde(default)]
    images: Option<String>,
    status: package::Status,
    #[serde(rename = "create_at", alias = "created_at", with = "datetime::serde::date")]
    created_at: package::CreationDateTime,
}

impl Package {
    /// Validates this [`Package`] into a domain one.
    pub(super) fn into_domain(
        self,
        currency: Currency,
    ) -> Result<package::Package, String> {
        let Self {
            id,
            title,
            description,
            pickup_location,
            drop_location,
            weight,
            price_expectation,
            images,
            status,
            created_at,
        } = self;

        Ok(package::Package {
            id,
            title: title.into(),
            description,
            pickup_location: pickup_location.into(),
            drop_location: drop_location.into(),
            weight: package::Weight::new(weight).ok_or_else(|| {
                format!("`Package(id: {id})` has negative weight")
            })?,
            price_expectation: Money::new(price_expectation, currency),
            image: images.filter(|url| !url.is_empty()),
            status,
            created_at,
        })
    }
}

/// Served [`user::User`].
#[derive(Debug, Deserialize)]
pub(super) struct User {
    id: user::Id,
    username: String,
    #[serde(default)]
    company_name: Option<String>,
}

impl TryFrom<User> for user::User {
    type Error = String;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        let User {
            id,
            username,
            company_name,
        } = value;

        Ok(Self {
            id,
            username: Username::new(username).ok_or_else(|| {
                format!("`User(id: {id})` has invalid username")
            })?,
            company_name: company_name
                .filter(|n| !n.trim().is_empty())
                .map(Into::into),
        })
    }
}

/// Served [`session::Tokens`].
#[derive(Debug, Deserialize)]
pub(super) struct Tokens {
    access: String,
    refresh: String,
}

impl TryFrom<Tokens> for session::Tokens {
    type Error = String;

    fn try_from(value: Tokens) -> Result<Self, Self::Error> {
        let parse = |token: String| {
            session::Token::new(token)
                .map(session::Token::into_secret)
                .ok_or_else(|| String::from("blank token"))
        };
        Ok(Self {
            access: parse(value.access)?,
            refresh: parse(value.refresh)?,
        })
    }
}

/// Login request body.
#[derive(Debug, Serialize)]
pub(super) struct Login<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

/// New [`offer::Offer`] request body.
#[derive(Debug, Serialize)]
pub(super) struct NewOffer {
    pub(super) package_id: package::Id,
    pub(super) offer_price: Decimal,
}

/// Counter request body.
#[derive(Debug, Serialize)]
pub(super) struct Counter {
    pub(super) offer_price: Decimal,
}

/// Partial update request body.
#[derive(Debug, Serialize)]
pub(super) struct Patch {
    pub(super) status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) offer_price: Option<Decimal>,
}

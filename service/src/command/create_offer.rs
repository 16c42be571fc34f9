//! [`Command`] for proposing a new [`Offer`] for a [`Package`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Package;
use crate::{
    domain::{
        offer::{self, InvalidOfferAmount},
        package, Offer,
    },
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for proposing a new [`Offer`] for a [`Package`].
#[derive(Clone, Debug)]
pub struct CreateOffer {
    /// ID of the [`Package`] to propose the price for.
    pub package_id: package::Id,

    /// Raw proposed price, as entered.
    pub price: String,
}

impl<A> Command<CreateOffer> for Service<A>
where
    A: Api<Insert<offer::Proposal>, Ok = Offer, Err = Traced<api::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOffer { package_id, price } = cmd;

        let price = offer::Price::parse(&price, self.config().currency)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let offer = self
            .api()
            .execute(Insert(offer::Proposal { package_id, price }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::info!(offer_id = %offer.id, %package_id, "offer proposed");

        self.offers().prepend(offer.clone());

        Ok(offer)
    }
}

/// Error of [`CreateOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Backend [`Api`] error.
    #[display("Backend request failed: {_0}")]
    Api(api::Error),

    /// Proposed price is not a valid amount.
    #[display("{_0}")]
    InvalidOfferAmount(InvalidOfferAmount),
}

//! [`Command`] for countering an [`Offer`] with another price.

use common::operations::Perform;
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::offer::Price;
use crate::{
    domain::{
        offer::{self, Transition},
        user::Role,
        Offer,
    },
    infra::{api, Api},
    Service,
};

use super::{transition_offer, Command, TransitionOffer};

/// [`Command`] for countering an [`Offer`] with another price.
///
/// The raw price is parsed before anything else, so an invalid amount never
/// reaches the backend.
#[derive(Clone, Debug)]
pub struct CounterOffer {
    /// ID of the [`Offer`] to counter.
    pub offer_id: offer::Id,

    /// Raw new price, as entered.
    pub price: String,

    /// [`Role`] countering the [`Offer`].
    pub by: Role,
}

impl<A> Command<CounterOffer> for Service<A>
where
    A: Api<Perform<offer::Change>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CounterOffer) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CounterOffer {
            offer_id,
            price,
            by,
        } = cmd;

        let price = offer::Price::parse(&price, self.config().currency)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        self.execute(TransitionOffer {
            offer_id,
            transition: Transition::Counter { price, by },
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

/// Error of [`CounterOffer`] [`Command`] execution.
pub type ExecutionError = transition_offer::ExecutionError;

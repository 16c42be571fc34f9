//! [`Command`] for withdrawing an open [`Offer`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        offer::{self, Status},
        Offer,
    },
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for withdrawing an open [`Offer`].
///
/// Only [`Status::Pending`] and [`Status::Countered`] [`Offer`]s may be
/// withdrawn.
#[derive(Clone, Copy, Debug)]
pub struct WithdrawOffer {
    /// ID of the [`Offer`] to withdraw.
    pub offer_id: offer::Id,
}

impl<A> Command<WithdrawOffer> for Service<A>
where
    A: Api<Delete<offer::Id>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: WithdrawOffer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let WithdrawOffer { offer_id } = cmd;

        let offer = self
            .offers()
            .get(offer_id)
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        if !offer.status.is_open() {
            return Err(tracerr::new!(E::NotWithdrawable {
                id: offer_id,
                status: offer.status,
            }));
        }

        let _in_flight = self
            .offers()
            .begin(offer_id)
            .ok_or(E::RequestInFlight(offer_id))
            .map_err(tracerr::wrap!())?;

        self.api()
            .execute(Delete(offer_id))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::info!(%offer_id, "offer withdrawn");

        Ok(self.offers().remove(offer_id).unwrap_or(offer))
    }
}

/// Error of [`WithdrawOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Backend [`Api`] error.
    #[display("Backend request failed: {_0}")]
    Api(api::Error),

    /// [`Offer`] is not open anymore.
    #[display("`Offer(id: {id})` is {status} and cannot be withdrawn")]
    #[from(ignore)]
    NotWithdrawable {
        /// ID of the [`Offer`].
        id: offer::Id,

        /// Current [`Status`] of the [`Offer`].
        status: Status,
    },

    /// [`Offer`] with the provided ID is not known.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// Another request for the [`Offer`] is in flight.
    #[display("`Offer(id: {_0})` has a request in flight already")]
    #[from(ignore)]
    RequestInFlight(#[error(not(source))] offer::Id),
}

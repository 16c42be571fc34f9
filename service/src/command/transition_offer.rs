//! [`Command`] for moving an [`Offer`] to another [`Status`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::offer::Status;
use crate::{
    domain::{
        offer::{self, InvalidOfferAmount, InvalidTransition, Transition},
        Offer,
    },
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for moving an [`Offer`] to another [`Status`].
///
/// The [`Transition`] is validated against the cached [`Offer`] before any
/// request is issued, and is applied to the cache only once the backend
/// confirms it.
#[derive(Clone, Copy, Debug)]
pub struct TransitionOffer {
    /// ID of the [`Offer`] to move.
    pub offer_id: offer::Id,

    /// [`Transition`] to perform.
    pub transition: Transition,
}

impl<A> Command<TransitionOffer> for Service<A>
where
    A: Api<Perform<offer::Change>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = Offer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: TransitionOffer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TransitionOffer {
            offer_id,
            transition,
        } = cmd;

        let mut offer = self
            .offers()
            .get(offer_id)
            .ok_or(E::OfferNotExists(offer_id))
            .map_err(tracerr::wrap!())?;
        offer
            .apply(transition)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let _in_flight = self
            .offers()
            .begin(offer_id)
            .ok_or(E::TransitionInFlight(offer_id))
            .map_err(tracerr::wrap!())?;

        self.api()
            .execute(Perform(offer::Change {
                id: offer_id,
                transition,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        log::info!(
            %offer_id,
            action = %transition.action(),
            status = %offer.status,
            "offer transitioned",
        );

        // The cache may have been refreshed while the request was in flight.
        let cached = self
            .offers()
            .update(offer_id, |o| o.apply(transition).map(|()| o.clone()));
        Ok(match cached {
            Some(Ok(o)) => o,
            Some(Err(_)) | None => offer,
        })
    }
}

/// Error of [`TransitionOffer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Backend [`Api`] error.
    #[display("Backend request failed: {_0}")]
    Api(api::Error),

    /// [`Transition`] is not permitted from the current [`Status`].
    #[display("{_0}")]
    InvalidTransition(InvalidTransition),

    /// Proposed price is not a valid amount.
    #[display("{_0}")]
    InvalidOfferAmount(InvalidOfferAmount),

    /// [`Offer`] with the provided ID is not known.
    #[display("`Offer(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferNotExists(#[error(not(source))] offer::Id),

    /// Another request for the [`Offer`] is in flight.
    #[display("`Offer(id: {_0})` has a request in flight already")]
    #[from(ignore)]
    TransitionInFlight(#[error(not(source))] offer::Id),
}

#[cfg(all(test, feature = "rest"))]
mod spec {
    use std::pin::pin;

    use crate::{
        domain::{
            offer::{
                transition::spec::{inr, offer},
                Action, InvalidTransition, Status, Transition,
            },
            user::Role,
        },
        infra::api::mock::Mock,
        Command as _, Config, Service,
    };

    use super::{ExecutionError as E, TransitionOffer};

    fn service(mock: Mock) -> Service<Mock> {
        let svc = Service::new(Config::default(), mock);
        svc.offers().replace(vec![
            offer(6, Status::Pending, 900),
            offer(7, Status::Pending, 1000),
            offer(8, Status::Accepted, 1100),
        ]);
        svc
    }

    fn cmd(id: u64, transition: Transition) -> TransitionOffer {
        TransitionOffer {
            offer_id: id.into(),
            transition,
        }
    }

    #[tokio::test]
    async fn counters_only_matching_offer() {
        let svc = service(Mock::default());
        let before = svc.offers().snapshot();

        let offer = svc
            .execute(cmd(
                7,
                Transition::Counter {
                    price: inr(1200),
                    by: Role::Owner,
                },
            ))
            .await
            .unwrap();

        assert_eq!(offer.status, Status::Countered);
        assert_eq!(offer.price, inr(1200));
        assert_eq!(svc.api().requests(), ["PERFORM offers/7 counter"]);

        let after = svc.offers().snapshot();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], offer);
        assert_eq!(after[2], before[2]);
    }

    #[tokio::test]
    async fn rejects_invalid_transition_without_request() {
        let svc = service(Mock::default());
        let before = svc.offers().snapshot();

        let err = svc
            .execute(cmd(8, Transition::Reject))
            .await
            .unwrap_err()
            .into_inner();

        assert!(matches!(
            err,
            E::InvalidTransition(InvalidTransition {
                from: Status::Accepted,
                action: Action::Reject,
            }),
        ));
        assert!(svc.api().requests().is_empty());
        assert_eq!(svc.offers().snapshot(), before);
    }

    #[tokio::test]
    async fn fails_on_unknown_offer() {
        let svc = service(Mock::default());

        let err = svc
            .execute(cmd(42, Transition::Accept))
            .await
            .unwrap_err()
            .into_inner();

        assert!(matches!(err, E::OfferNotExists(id) if u64::from(id) == 42));
        assert!(svc.api().requests().is_empty());
    }

    #[tokio::test]
    async fn failed_request_leaves_cache_unchanged() {
        let svc = service(Mock::failing(401));
        let before = svc.offers().snapshot();

        let err = svc
            .execute(cmd(7, Transition::Accept))
            .await
            .unwrap_err()
            .into_inner();

        assert!(matches!(err, E::Api(_)));
        assert_eq!(svc.api().requests().len(), 1);
        assert_eq!(svc.offers().snapshot(), before);
        assert!(!svc.offers().is_in_flight(7_u64.into()));
    }

    #[tokio::test]
    async fn guards_offer_with_request_in_flight() {
        let svc = service(Mock::holding());

        {
            let mut first = pin!(svc.execute(cmd(7, Transition::Accept)));
            assert!(futures::poll!(first.as_mut()).is_pending());

            let err = svc
                .execute(cmd(7, Transition::Reject))
                .await
                .unwrap_err()
                .into_inner();
            assert!(matches!(err, E::TransitionInFlight(_)));
            assert_eq!(svc.api().requests().len(), 1);

            // Other offers are not blocked.
            svc.api().release();
            let other = svc.execute(cmd(6, Transition::Reject)).await.unwrap();
            assert_eq!(other.status, Status::Rejected);
        }

        // Abandoned request releases its guard and changes nothing.
        assert!(!svc.offers().is_in_flight(7_u64.into()));
        assert_eq!(svc.offers().get(7_u64.into()).unwrap().status, Status::Pending);

        svc.api().release();
        let offer = svc.execute(cmd(7, Transition::Accept)).await.unwrap();
        assert_eq!(offer.status, Status::Accepted);
    }

    #[tokio::test]
    async fn books_once_accepted() {
        let svc = service(Mock::default());

        let _ = svc.execute(cmd(8, Transition::Book)).await.unwrap();
        let err = svc
            .execute(cmd(8, Transition::Book))
            .await
            .unwrap_err()
            .into_inner();

        assert!(matches!(
            err,
            E::InvalidTransition(InvalidTransition {
                from: Status::Booked,
                action: Action::Book,
            }),
        ));
        assert_eq!(svc.api().requests(), ["PERFORM offers/8 book"]);
    }
}

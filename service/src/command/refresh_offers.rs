//! [`Command`] for refreshing the cached [`Offer`]s.

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Offer,
    infra::{api, Api},
    read::offer::list::Scope,
    Service,
};

use super::Command;

/// [`Command`] for replacing the cached [`Offer`]s with the ones the backend
/// lists in the provided [`Scope`].
#[derive(Clone, Copy, Debug)]
pub struct RefreshOffers {
    /// [`Scope`] of the [`Offer`]s to list.
    pub scope: Scope,
}

impl<A> Command<RefreshOffers> for Service<A>
where
    A: Api<
        Select<By<Vec<Offer>, Scope>>,
        Ok = Vec<Offer>,
        Err = Traced<api::Error>,
    >,
{
    type Ok = Vec<Offer>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RefreshOffers,
    ) -> Result<Self::Ok, Self::Err> {
        let RefreshOffers { scope } = cmd;

        let offers = self
            .api()
            .execute(Select(By::new(scope)))
            .await
            .map_err(tracerr::wrap!())?;
        log::debug!(%scope, count = offers.len(), "offers refreshed");

        self.offers().replace(offers.clone());

        Ok(offers)
    }
}

/// Error of [`RefreshOffers`] [`Command`] execution.
pub type ExecutionError = api::Error;

#[cfg(all(test, feature = "rest"))]
mod spec {
    use crate::{
        domain::offer::{transition::spec::offer, Status},
        infra::api::mock::Mock,
        read::offer::list::Scope,
        Command as _, Config, Service,
    };

    use super::RefreshOffers;

    #[tokio::test]
    async fn replaces_cached_offers() {
        let svc = Service::new(
            Config::default(),
            Mock::serving(vec![
                offer(1, Status::Pending, 100),
                offer(2, Status::Booked, 200),
            ]),
        );
        svc.offers().replace(vec![offer(7, Status::Pending, 1000)]);

        let offers = svc
            .execute(RefreshOffers { scope: Scope::Mine })
            .await
            .unwrap();

        assert_eq!(offers.len(), 2);
        assert_eq!(svc.offers().snapshot(), offers);
        assert_eq!(svc.api().requests(), ["SELECT offers mine"]);
    }

    #[tokio::test]
    async fn keeps_stale_offers_on_failure() {
        let svc = Service::new(Config::default(), Mock::failing(401));
        svc.offers().replace(vec![offer(7, Status::Pending, 1000)]);

        assert!(svc
            .execute(RefreshOffers { scope: Scope::All })
            .await
            .is_err());
        assert_eq!(svc.offers().snapshot().len(), 1);
    }
}

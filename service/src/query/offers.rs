//! [`Query`] collection related to the cached [`Offer`]s.

use std::convert::Infallible;

use crate::{domain::Offer, read, Service};

use super::Query;

/// Queries the cached [`Offer`]s passing the provided filter.
///
/// Never touches the backend: [`RefreshOffers`] has to be executed first.
///
/// [`RefreshOffers`]: crate::command::RefreshOffers
#[derive(Clone, Copy, Debug, Default)]
pub struct Cached {
    /// Filter the [`Offer`]s should pass.
    pub filter: read::offer::list::Filter,
}

impl<A> Query<Cached> for Service<A> {
    type Ok = Vec<Offer>;
    type Err = Infallible;

    async fn execute(&self, query: Cached) -> Result<Self::Ok, Self::Err> {
        let Cached { filter } = query;

        Ok(self
            .offers()
            .snapshot()
            .into_iter()
            .filter(|o| filter.matches(o))
            .collect())
    }
}

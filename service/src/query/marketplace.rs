//! [`Query`] collection related to the marketplace [`Package`]s.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Package,
    infra::{api, Api},
    read::package::list,
    Service,
};

use super::{ApiQuery, Query};

/// Queries all the [`Package`]s listed on the marketplace.
pub type List = ApiQuery<By<Vec<Package>, list::Marketplace>>;

/// Queries a filtered and sorted [`list::Page`] of the marketplace
/// [`Package`]s.
#[derive(Clone, Debug)]
pub struct Page(pub list::Selector);

impl<A> Query<Page> for Service<A>
where
    A: Api<
        Select<By<Vec<Package>, list::Marketplace>>,
        Ok = Vec<Package>,
        Err = Traced<api::Error>,
    >,
{
    type Ok = list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Page(selector): Page,
    ) -> Result<Self::Ok, Self::Err> {
        let packages = self
            .execute(List::by(list::Marketplace))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(list::select(packages, selector))
    }
}

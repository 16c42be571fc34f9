//! [`Api`]-related implementations.

#[cfg(feature = "rest")]
pub mod rest;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "rest")]
pub use self::rest::Rest;

/// Backend API operation.
pub use common::Handler as Api;

/// [`Api`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "rest")]
    /// [`Rest`] error.
    Rest(rest::Error),
}

#[cfg(all(test, feature = "rest"))]
pub(crate) mod mock {
    //! In-memory [`Api`] double.

    use std::cell::{Cell, RefCell};

    use common::operations::{By, Delete, Insert, Perform, Select};
    use reqwest::StatusCode;
    use tracerr::Traced;

    use crate::{
        domain::{
            offer::{self, transition::spec::offer, Status},
            Offer,
        },
        infra::api::{self, rest, Api},
        read,
    };

    /// In-memory [`Api`] recording every request it receives.
    #[derive(Debug, Default)]
    pub(crate) struct Mock {
        /// Recorded requests.
        requests: RefCell<Vec<String>>,

        /// Status to fail every request with, if any.
        failure: Option<u16>,

        /// Indicator whether requests never complete.
        hold: Cell<bool>,

        /// [`Offer`]s served on listing.
        served: Vec<Offer>,
    }

    impl Mock {
        /// Creates a new [`Mock`] failing every request with the provided
        /// status.
        pub(crate) fn failing(status: u16) -> Self {
            Self {
                failure: Some(status),
                ..Self::default()
            }
        }

        /// Creates a new [`Mock`] never completing requests until
        /// [`Mock::release()`]d.
        pub(crate) fn holding() -> Self {
            Self {
                hold: Cell::new(true),
                ..Self::default()
            }
        }

        /// Creates a new [`Mock`] serving the provided [`Offer`]s on listing.
        pub(crate) fn serving(offers: Vec<Offer>) -> Self {
            Self {
                served: offers,
                ..Self::default()
            }
        }

        /// Lets the following requests complete.
        pub(crate) fn release(&self) {
            self.hold.set(false);
        }

        /// Returns the recorded requests.
        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }

        /// Records the provided request and resolves it.
        async fn handle(&self, request: String) -> Result<(), Traced<api::Error>> {
            self.requests.borrow_mut().push(request);
            if self.hold.get() {
                std::future::pending::<()>().await;
            }
            match self.failure {
                Some(code) => Err(tracerr::new!(api::Error::from(
                    rest::Error::Status {
                        status: StatusCode::from_u16(code).unwrap(),
                        body: String::new(),
                    }
                ))),
                None => Ok(()),
            }
        }
    }

    impl Api<Perform<offer::Change>> for Mock {
        type Ok = ();
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Perform(change): Perform<offer::Change>,
        ) -> Result<Self::Ok, Self::Err> {
            let offer::Change { id, transition } = change;
            self.handle(format!("PERFORM offers/{id} {}", transition.action()))
                .await
        }
    }

    impl Api<Delete<offer::Id>> for Mock {
        type Ok = ();
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Delete(id): Delete<offer::Id>,
        ) -> Result<Self::Ok, Self::Err> {
            self.handle(format!("DELETE offers/{id}")).await
        }
    }

    impl Api<Insert<offer::Proposal>> for Mock {
        type Ok = Offer;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Insert(proposal): Insert<offer::Proposal>,
        ) -> Result<Self::Ok, Self::Err> {
            let offer::Proposal { package_id, price } = proposal;
            self.handle(format!("INSERT packages/{package_id} {price}"))
                .await?;

            let mut created = offer(99, Status::Pending, 1);
            created.package.id = package_id;
            created.price = price;
            Ok(created)
        }
    }

    impl Api<Select<By<Vec<Offer>, read::offer::list::Scope>>> for Mock {
        type Ok = Vec<Offer>;
        type Err = Traced<api::Error>;

        async fn execute(
            &self,
            Select(by): Select<By<Vec<Offer>, read::offer::list::Scope>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.handle(format!("SELECT offers {}", by.into_inner()))
                .await?;
            Ok(self.served.clone())
        }
    }
}

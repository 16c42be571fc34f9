//! [`Api`] implementations of the [`Rest`] client.

use common::operations::{By, Delete, Insert, Perform, Select};
use reqwest::Method;
use secrecy::ExposeSecret as _;
use tracerr::Traced;

use crate::{
    domain::{
        offer::{self, Transition},
        user::session,
        Offer, Package,
    },
    infra::{
        api::{self, rest::Error},
        Api, Rest,
    },
    read,
};

use super::{wire, Style};

impl Api<Select<By<Vec<Offer>, read::offer::list::Scope>>> for Rest {
    type Ok = Vec<Offer>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Offer>, read::offer::list::Scope>>,
    ) -> Result<Self::Ok, Self::Err> {
        use read::offer::list::Scope;

        let path = match by.into_inner() {
            Scope::All => "offers/",
            Scope::Mine => "offers/my_offers/",
        };
        let req = self
            .request(Method::GET, path)
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;

        Self::fetch::<Vec<wire::Offer>>(req)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .into_iter()
            .map(|o| o.into_domain(self.currency))
            .collect::<Result<_, _>>()
            .map_err(|e| tracerr::new!(Error::Malformed(e)))
            .map_err(tracerr::map_from)
    }
}

impl Api<Select<By<Vec<Package>, read::package::list::Marketplace>>>
    for Rest
{
    type Ok = Vec<Package>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Package>, read::package::list::Marketplace>>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::GET, "marketplace/")
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;

        Self::fetch::<Vec<wire::Package>>(req)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .into_iter()
            .map(|p| p.into_domain(self.currency))
            .collect::<Result<_, _>>()
            .map_err(|e| tracerr::new!(Error::Malformed(e)))
            .map_err(tracerr::map_from)
    }
}

impl Api<Insert<offer::Proposal>> for Rest {
    type Ok = Offer;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(proposal): Insert<offer::Proposal>,
    ) -> Result<Self::Ok, Self::Err> {
        let offer::Proposal { package_id, price } = proposal;

        let req = self
            .request(Method::POST, "offers/")
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .json(&wire::NewOffer {
                package_id,
                offer_price: price.amount(),
            });

        Self::fetch::<wire::Offer>(req)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .into_domain(self.currency)
            .map_err(|e| tracerr::new!(Error::Malformed(e)))
            .map_err(tracerr::map_from)
    }
}

impl Api<Perform<offer::Change>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Perform(change): Perform<offer::Change>,
    ) -> Result<Self::Ok, Self::Err> {
        let offer::Change { id, transition } = change;
        let action = transition.action();

        let req = match self.style {
            Style::Actions => {
                let req = self
                    .request(Method::POST, &format!("offers/{id}/{action}/"))
                    .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;
                if let Transition::Counter { price, .. } = transition {
                    req.json(&wire::Counter {
                        offer_price: price.amount(),
                    })
                } else {
                    req
                }
            }
            Style::Patch => {
                let req = self
                    .request(Method::PATCH, &format!("offers/{id}/"))
                    .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;
                req.json(&wire::Patch {
                    status: action.outcome(),
                    offer_price: match transition {
                        Transition::Counter { price, .. } => {
                            Some(price.amount())
                        }
                        Transition::Accept
                        | Transition::Reject
                        | Transition::Book => None,
                    },
                })
            }
        };

        Self::send(req)
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))
    }
}

impl Api<Delete<offer::Id>> for Rest {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Delete(id): Delete<offer::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let req = self
            .request(Method::DELETE, &format!("offers/{id}/"))
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?;

        Self::send(req)
            .await
            .map(drop)
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))
    }
}

impl Api<Perform<session::Credentials>> for Rest {
    type Ok = session::Tokens;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Perform(creds): Perform<session::Credentials>,
    ) -> Result<Self::Ok, Self::Err> {
        let session::Credentials { username, password } = creds;

        let req = self
            .request(Method::POST, "login/")
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .json(&wire::Login {
                username: username.as_ref(),
                password: password.expose_secret().as_ref(),
            });

        Self::fetch::<wire::Tokens>(req)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> api::Error))?
            .try_into()
            .map_err(|e| tracerr::new!(Error::Malformed(e)))
            .map_err(tracerr::map_from)
    }
}

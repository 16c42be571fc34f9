//! Execution of [`Command`]s against the [`Service`].

use secrecy::SecretBox;
use service::{
    command::{self, Command as _},
    domain::{
        offer::{self, Action, Transition},
        user::{Password, Username},
        Offer,
    },
    infra::Rest,
    query,
    read::{offer::list::Filter, package::list},
};
use tracing as log;

use crate::{
    args::Command,
    define_error,
    view::{self, View},
    AsError, Config, Context, Error, Service,
};

/// Executes the provided [`Command`], returning the output to show.
///
/// # Errors
///
/// If the [`Command`] fails. The [`Context`] is left as it was.
pub async fn execute(
    cmd: Command,
    ctx: &mut Context,
    conf: &Config,
) -> Result<String, Error> {
    match cmd {
        Command::Login { username, password } => {
            login(username, password, ctx, conf).await
        }
        Command::Logout => {
            ctx.clear();
            ctx.save().map_err(AsError::into_error)?;
            Ok("Logged out".into())
        }
        Command::Whoami => {
            let (session, role) = ctx.authorized()?;
            Ok(format!(
                "user #{} ({role}), session expires at {}",
                session.claims.user_id,
                session.claims.expires_at.to_rfc3339(),
            ))
        }
        Command::Marketplace { search, sort, page } => {
            marketplace(search, sort, page, ctx, conf).await
        }
        Command::Offers { all } => offers(all, ctx, conf).await,
        Command::Accept { id } => {
            transition(id.into(), Transition::Accept, ctx, conf).await
        }
        Command::Reject { id } => {
            transition(id.into(), Transition::Reject, ctx, conf).await
        }
        Command::Book { id } => {
            transition(id.into(), Transition::Book, ctx, conf).await
        }
        Command::Counter { id, price } => {
            counter(id.into(), price, ctx, conf).await
        }
        Command::Withdraw { id } => withdraw(id.into(), ctx, conf).await,
        Command::Propose { package_id, price } => {
            ensure_price(&price, conf)?;

            let svc = connect(ctx, conf)?;
            let offer = svc
                .execute(command::CreateOffer {
                    package_id: package_id.into(),
                    price,
                })
                .await
                .map_err(AsError::into_error)?;
            Ok(format!("Proposed {} as offer #{}", offer.price, offer.id))
        }
    }
}

/// Creates a new [`Service`] authorized by the current [`Session`], if any.
///
/// [`Session`]: service::domain::user::Session
fn connect(ctx: &Context, conf: &Config) -> Result<Service, Error> {
    let mut rest =
        Rest::new(&(&conf.api).into()).map_err(AsError::into_error)?;
    if let Some(session) = ctx.session() {
        rest = rest.with_access_token(session.tokens.access.clone());
    }
    Ok(Service::new((&conf.api).into(), rest))
}

/// Logs in and remembers the created [`Session`].
///
/// [`Session`]: service::domain::user::Session
async fn login(
    username: String,
    password: String,
    ctx: &mut Context,
    conf: &Config,
) -> Result<String, Error> {
    define_error! {
        enum Error {
            #[code = "INVALID_CREDENTIALS"]
            #[kind = Validation]
            #[message = "Username and password must not be empty, and \
                         username must not contain whitespace"]
            InvalidCredentials,
        }
    }

    let username = Username::new(username).ok_or(Error::InvalidCredentials)?;
    let password = Password::new(password)
        .map(|p| SecretBox::new(Box::new(p)))
        .ok_or(Error::InvalidCredentials)?;

    let session = connect(ctx, conf)?
        .execute(command::CreateUserSession {
            username: username.clone(),
            password,
        })
        .await
        .map_err(AsError::into_error)?;
    let role = session.role();

    ctx.set_session(session);
    ctx.save().map_err(AsError::into_error)?;

    Ok(match role {
        Some(role) => format!("Logged in as {username} ({role})"),
        None => format!("Logged in as {username}"),
    })
}

/// Shows a [`list::Page`] of the marketplace.
async fn marketplace(
    search: Option<String>,
    sort: list::Sort,
    page: usize,
    ctx: &Context,
    conf: &Config,
) -> Result<String, Error> {
    define_error! {
        enum Error {
            #[code = "INVALID_PAGE"]
            #[kind = Validation]
            #[message = "Page numbers start from 1"]
            InvalidPage,
        }
    }

    let arguments =
        list::Arguments::new(page, conf.marketplace.page_size.get())
            .ok_or(Error::InvalidPage)?;

    let page = connect(ctx, conf)?
        .execute(query::marketplace::Page(list::Selector {
            arguments,
            filter: list::Filter { search },
            sort,
        }))
        .await
        .map_err(AsError::into_error)?;

    Ok(view::marketplace::render(&page))
}

/// Refreshes and shows [`Offer`]s of the [`View`] of the current viewer.
async fn offers(
    all: bool,
    ctx: &Context,
    conf: &Config,
) -> Result<String, Error> {
    let (svc, view) = refreshed(ctx, conf).await?;

    let filter = if all { Filter::Any } else { view.filter() };
    let offers = svc
        .execute(query::offers::Cached { filter })
        .await
        .unwrap_or_else(|never| match never {});

    if offers.is_empty() {
        return Ok("No offers".into());
    }
    Ok(offers
        .iter()
        .map(|o| view.render(o))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Creates a new [`Service`] with the [`Offer`]s of the current viewer
/// cached, along with the [`View`] meant for the viewer.
async fn refreshed(
    ctx: &Context,
    conf: &Config,
) -> Result<(Service, &'static dyn View), Error> {
    let (_, role) = ctx.authorized()?;
    let view = view::for_role(role);

    let svc = connect(ctx, conf)?;
    _ = svc
        .execute(command::RefreshOffers {
            scope: view.scope(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((svc, view))
}

/// Ensures the [`View`] offers the provided [`Action`] on the cached
/// [`Offer`].
fn ensure_available(
    svc: &Service,
    view: &dyn View,
    id: offer::Id,
    action: Action,
) -> Result<(), Error> {
    define_error! {
        enum Error {
            #[code = "ACTION_NOT_AVAILABLE"]
            #[kind = Validation]
            #[message = "Action is not available on this offer"]
            ActionNotAvailable,
        }
    }

    // Missing offers are reported by the command itself.
    let Some(offer) = svc.offers().get(id) else {
        return Ok(());
    };
    if view.exposes(&offer, action) || !offer.status.permits(action) {
        // Forbidden transitions are reported by the command itself.
        return Ok(());
    }
    log::debug!(%id, %action, role = %view.role(), "action is not exposed");
    Err(Error::ActionNotAvailable.into())
}

/// Ensures the provided `price` is a valid [`offer::Price`], so no request is
/// issued for an invalid one.
fn ensure_price(price: &str, conf: &Config) -> Result<(), Error> {
    define_error! {
        enum Error {
            #[code = "INVALID_OFFER_AMOUNT"]
            #[kind = Validation]
            #[message = "Offer amount must be a positive number"]
            InvalidOfferAmount,
        }
    }

    _ = offer::Price::parse(price, conf.api.currency).map_err(|e| {
        log::debug!("{e}");
        Error::InvalidOfferAmount
    })?;
    Ok(())
}

/// Performs the provided [`Transition`] of the [`Offer`] with the provided ID.
async fn transition(
    id: offer::Id,
    transition: Transition,
    ctx: &Context,
    conf: &Config,
) -> Result<String, Error> {
    let (svc, view) = refreshed(ctx, conf).await?;
    ensure_available(&svc, view, id, transition.action())?;

    let offer = svc
        .execute(command::TransitionOffer {
            offer_id: id,
            transition,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(view.render(&offer))
}

/// Counters the [`Offer`] with the provided ID.
async fn counter(
    id: offer::Id,
    price: String,
    ctx: &Context,
    conf: &Config,
) -> Result<String, Error> {
    ensure_price(&price, conf)?;

    let (svc, view) = refreshed(ctx, conf).await?;
    ensure_available(&svc, view, id, Action::Counter)?;

    let offer = svc
        .execute(command::CounterOffer {
            offer_id: id,
            price,
            by: view.role(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(view.render(&offer))
}

/// Withdraws the [`Offer`] with the provided ID.
async fn withdraw(
    id: offer::Id,
    ctx: &Context,
    conf: &Config,
) -> Result<String, Error> {
    define_error! {
        enum Error {
            #[code = "ACTION_NOT_AVAILABLE"]
            #[kind = Validation]
            #[message = "Offer cannot be withdrawn from this view"]
            WithdrawalNotAvailable,
        }
    }

    let (svc, view) = refreshed(ctx, conf).await?;
    // Closed offers are reported by the command itself.
    if let Some(offer) = svc.offers().get(id) {
        if offer.status.is_open() && !view.allows_withdrawal(&offer) {
            return Err(Error::WithdrawalNotAvailable.into());
        }
    }

    let offer: Offer = svc
        .execute(command::WithdrawOffer { offer_id: id })
        .await
        .map_err(AsError::into_error)?;

    Ok(format!("Withdrawn offer #{}", offer.id))
}

impl AsError for command::transition_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_TRANSITION"]
                #[kind = Validation]
                #[message = "Offer cannot move this way"]
                InvalidTransition,

                #[code = "INVALID_OFFER_AMOUNT"]
                #[kind = Validation]
                #[message = "Offer amount must be a positive number"]
                InvalidOfferAmount,

                #[code = "OFFER_NOT_EXISTS"]
                #[kind = Validation]
                #[message = "Offer is not among the listed ones"]
                OfferNotExists,

                #[code = "REQUEST_IN_FLIGHT"]
                #[kind = Transient]
                #[message = "Another request for this offer is in flight"]
                TransitionInFlight,
            }
        }

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::InvalidTransition(e) => Some(crate::Error {
                message: e.to_string(),
                ..crate::Error::from(Error::InvalidTransition)
            }),
            Self::InvalidOfferAmount(_) => {
                Some(Error::InvalidOfferAmount.into())
            }
            Self::OfferNotExists(_) => Some(Error::OfferNotExists.into()),
            Self::TransitionInFlight(_) => {
                Some(Error::TransitionInFlight.into())
            }
        }
    }
}

impl AsError for command::create_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_OFFER_AMOUNT"]
                #[kind = Validation]
                #[message = "Offer amount must be a positive number"]
                InvalidOfferAmount,
            }
        }

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::InvalidOfferAmount(_) => {
                Some(Error::InvalidOfferAmount.into())
            }
        }
    }
}

impl AsError for command::withdraw_offer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_WITHDRAWABLE"]
                #[kind = Validation]
                #[message = "Only pending or countered offers may be \
                             withdrawn"]
                NotWithdrawable,

                #[code = "OFFER_NOT_EXISTS"]
                #[kind = Validation]
                #[message = "Offer is not among the listed ones"]
                OfferNotExists,

                #[code = "REQUEST_IN_FLIGHT"]
                #[kind = Transient]
                #[message = "Another request for this offer is in flight"]
                RequestInFlight,
            }
        }

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::NotWithdrawable { .. } => {
                Some(Error::NotWithdrawable.into())
            }
            Self::OfferNotExists(_) => Some(Error::OfferNotExists.into()),
            Self::RequestInFlight(_) => Some(Error::RequestInFlight.into()),
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Api(e) => e.try_as_error(),
            Self::InvalidToken(_) => None,
        }
    }
}

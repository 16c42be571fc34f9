//! [`Command`] definition.

pub mod counter_offer;
pub mod create_offer;
pub mod create_user_session;
pub mod refresh_offers;
pub mod transition_offer;
pub mod withdraw_offer;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    counter_offer::CounterOffer, create_offer::CreateOffer,
    create_user_session::CreateUserSession, refresh_offers::RefreshOffers,
    transition_offer::TransitionOffer, withdraw_offer::WithdrawOffer,
};

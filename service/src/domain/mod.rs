//! Domain definitions.

pub mod offer;
pub mod package;
pub mod user;

pub use self::{offer::Offer, package::Package, user::User};

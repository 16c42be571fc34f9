//! Surfaces presenting [`Offer`]s to a viewer of some [`Role`].

pub mod manage_offers;
pub mod marketplace;
pub mod negotiations;

use std::fmt::Write as _;

use service::{
    domain::{
        offer::{Action, Status},
        user::Role,
        Offer,
    },
    read::offer::list::{Filter, Scope},
};

pub use self::{manage_offers::ManageOffers, negotiations::Negotiations};

/// Surface listing [`Offer`]s and exposing [`Action`]s on them.
///
/// An [`Action`] is offered only if the [`View`] exposes it __and__ the
/// [`Offer`] [`Status`] permits it.
pub trait View {
    /// [`Role`] this [`View`] is meant for.
    fn role(&self) -> Role;

    /// [`Scope`] of the [`Offer`]s this [`View`] lists.
    fn scope(&self) -> Scope;

    /// [`Filter`] of the [`Offer`]s this [`View`] shows by default.
    fn filter(&self) -> Filter;

    /// Indicates whether this [`View`] exposes the provided [`Action`] on the
    /// provided [`Offer`].
    fn exposes(&self, offer: &Offer, action: Action) -> bool;

    /// Indicates whether this [`View`] allows withdrawing the provided
    /// [`Offer`].
    fn allows_withdrawal(&self, offer: &Offer) -> bool;

    /// Returns [`Action`]s available on the provided [`Offer`].
    fn actions(&self, offer: &Offer) -> Vec<Action> {
        Action::ALL
            .iter()
            .copied()
            .filter(|&a| self.exposes(offer, a) && offer.status.permits(a))
            .collect()
    }

    /// Renders the provided [`Offer`] as a single line.
    fn render(&self, offer: &Offer) -> String {
        let mut line = format!(
            "#{:<5} {:<24} {} -> {}  {:>12}  {}",
            offer.id,
            offer.package.title,
            offer.package.pickup_location,
            offer.package.drop_location,
            offer.price,
            offer.status,
        );
        if offer.status == Status::Countered {
            _ = write!(line, " by {}", offer.price_setter());
        }
        if self.role() == Role::Owner {
            _ = write!(line, "  from {}", offer.sender.username);
        }

        let mut actions = self
            .actions(offer)
            .into_iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>();
        if self.allows_withdrawal(offer) {
            actions.push("withdraw".into());
        }
        if !actions.is_empty() {
            _ = write!(line, "  [{}]", actions.join(", "));
        }
        line
    }
}

/// Returns the [`View`] meant for the provided [`Role`].
#[must_use]
pub fn for_role(role: Role) -> &'static dyn View {
    match role {
        Role::Owner => &ManageOffers,
        Role::Transporter => &Negotiations,
    }
}

//! [`ManageOffers`] view.

use service::{
    domain::{offer::Action, user::Role, Offer},
    read::offer::list::{Filter, Scope},
};

use super::View;

/// Owner-side [`View`] of the [`Offer`]s received for own packages.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManageOffers;

impl View for ManageOffers {
    fn role(&self) -> Role {
        Role::Owner
    }

    fn scope(&self) -> Scope {
        Scope::All
    }

    fn filter(&self) -> Filter {
        Filter::Any
    }

    fn exposes(&self, offer: &Offer, action: Action) -> bool {
        match action {
            Action::Accept | Action::Reject | Action::Counter => {
                offer.is_awaiting(Role::Owner)
            }
            Action::Book => false,
        }
    }

    fn allows_withdrawal(&self, offer: &Offer) -> bool {
        offer.status.is_open()
    }
}

#[cfg(test)]
mod spec {
    use service::domain::offer::{Action, Status};

    use crate::view::{spec::offer, View as _};

    use super::ManageOffers;

    #[test]
    fn responds_to_transporter_proposals() {
        let pending = offer(Status::Pending, false);

        assert_eq!(
            ManageOffers.actions(&pending),
            [Action::Accept, Action::Reject, Action::Counter],
        );
        assert!(ManageOffers.allows_withdrawal(&pending));
    }

    #[test]
    fn waits_for_transporter_after_own_counter() {
        let countered = offer(Status::Countered, true);

        assert!(ManageOffers.actions(&countered).is_empty());
        assert!(ManageOffers.allows_withdrawal(&countered));
    }

    #[test]
    fn never_books() {
        let accepted = offer(Status::Accepted, false);

        assert!(ManageOffers.actions(&accepted).is_empty());
        assert!(!ManageOffers.allows_withdrawal(&accepted));
    }

    #[test]
    fn renders_available_actions() {
        let line = ManageOffers.render(&offer(Status::Pending, false));

        assert!(line.contains("Pune -> Nagpur"), "{line}");
        assert!(line.contains("1200INR"), "{line}");
        assert!(line.contains("from ravi"), "{line}");
        assert!(
            line.ends_with("[accept, reject, counter, withdraw]"),
            "{line}",
        );
    }
}

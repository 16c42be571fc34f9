//! [`Negotiations`] view.

use service::{
    domain::{
        offer::{Action, Status},
        user::Role,
        Offer,
    },
    read::offer::list::{Filter, Scope},
};

use super::View;

/// Transporter-side [`View`] of the own [`Offer`]s still being negotiated.
#[derive(Clone, Copy, Debug, Default)]
pub struct Negotiations;

impl View for Negotiations {
    fn role(&self) -> Role {
        Role::Transporter
    }

    fn scope(&self) -> Scope {
        Scope::Mine
    }

    fn filter(&self) -> Filter {
        Filter::Negotiating
    }

    fn exposes(&self, offer: &Offer, action: Action) -> bool {
        match action {
            Action::Counter => {
                offer.status == Status::Pending
                    && offer.is_awaiting(Role::Transporter)
            }
            Action::Accept | Action::Reject => {
                offer.is_awaiting(Role::Transporter)
            }
            Action::Book => offer.status == Status::Accepted,
        }
    }

    fn allows_withdrawal(&self, _: &Offer) -> bool {
        false
    }
}

#[cfg(test)]
mod spec {
    use service::domain::offer::{Action, Status};

    use crate::view::{spec::offer, View as _};

    use super::Negotiations;

    #[test]
    fn exposes_per_status() {
        for (status, expected) in [
            (
                Status::Pending,
                vec![Action::Accept, Action::Reject, Action::Counter],
            ),
            (Status::Countered, vec![Action::Accept, Action::Reject]),
            (Status::Accepted, vec![Action::Book]),
            (Status::Rejected, vec![]),
            (Status::Booked, vec![]),
        ] {
            assert_eq!(
                Negotiations.actions(&offer(status, true)),
                expected,
                "{status}",
            );
        }
    }

    #[test]
    fn hides_responses_to_own_price() {
        for status in [Status::Pending, Status::Countered] {
            assert_eq!(
                Negotiations.actions(&offer(status, false)),
                Vec::<Action>::new(),
                "{status}",
            );
        }
        assert_eq!(
            Negotiations.actions(&offer(Status::Accepted, false)),
            vec![Action::Book],
        );
    }

    #[test]
    fn shows_only_live_offers() {
        let filter = Negotiations.filter();

        assert!(filter.matches(&offer(Status::Accepted, false)));
        assert!(!filter.matches(&offer(Status::Rejected, false)));
        assert!(!filter.matches(&offer(Status::Booked, false)));
    }
}

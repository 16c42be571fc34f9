//! [`Offer`]-related read definitions.

#[cfg(doc)]
use crate::domain::Offer;

pub mod list {
    //! [`Offer`] list definitions.

    use common::define_kind;

    use crate::domain::{offer::Status, Offer};

    define_kind! {
        #[doc = "Which [`Offer`]s are listed to a viewer."]
        #[case = "lowercase"]
        enum Scope {
            #[doc = "All the [`Offer`]s received for the viewer's packages."]
            All = 1,

            #[doc = "[`Offer`]s the viewer has sent."]
            Mine = 2,
        }
    }

    /// Filter of an [`Offer`] list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum Filter {
        /// Every [`Offer`].
        #[default]
        Any,

        /// [`Offer`]s still being negotiated or awaiting booking.
        Negotiating,
    }

    impl Filter {
        /// Indicates whether the provided [`Offer`] passes this [`Filter`].
        #[must_use]
        pub const fn matches(self, offer: &Offer) -> bool {
            match self {
                Self::Any => true,
                Self::Negotiating => matches!(
                    offer.status,
                    Status::Pending | Status::Countered | Status::Accepted,
                ),
            }
        }
    }
}

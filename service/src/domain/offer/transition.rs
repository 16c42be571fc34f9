//! [`Offer`] negotiation state machine.
//!
//! ```text
//!            counter            accept
//! pending ───────────► countered ──────► accepted ──book──► booked
//!    │  │                  │                ▲
//!    │  └─────accept───────┼────────────────┘
//!    │                     │ reject
//!    └──────reject─────────┴──────────► rejected
//! ```

use common::define_kind;
use derive_more::{Display, Error};

use crate::domain::{
    offer::{Offer, Price},
    user::Role,
};

define_kind! {
    #[doc = "Status of an [`Offer`] negotiation."]
    #[case = "lowercase"]
    enum Status {
        #[doc = "[`Offer`] awaits a response."]
        Pending = 1,

        #[doc = "[`Offer`] price was countered and awaits a response."]
        Countered = 2,

        #[doc = "[`Offer`] is accepted and awaits booking."]
        Accepted = 3,

        #[doc = "[`Offer`] is rejected."]
        Rejected = 4,

        #[doc = "[`Offer`] is booked."]
        Booked = 5,
    }
}

define_kind! {
    #[doc = "Action moving an [`Offer`] between [`Status`]es."]
    #[case = "lowercase"]
    enum Action {
        #[doc = "Agree to the current [`Offer`] price."]
        Accept = 1,

        #[doc = "Decline the [`Offer`]."]
        Reject = 2,

        #[doc = "Propose another [`Offer`] price."]
        Counter = 3,

        #[doc = "Confirm the accepted [`Offer`] as a delivery assignment."]
        Book = 4,
    }
}

impl Action {
    /// Returns the [`Status`] this [`Action`] leads to when permitted.
    #[must_use]
    pub const fn outcome(self) -> Status {
        match self {
            Self::Accept => Status::Accepted,
            Self::Reject => Status::Rejected,
            Self::Counter => Status::Countered,
            Self::Book => Status::Booked,
        }
    }
}

impl Status {
    /// Returns the [`Status`] the provided [`Action`] leads to from this one.
    ///
    /// # Errors
    ///
    /// If the [`Action`] is not permitted from this [`Status`].
    pub const fn next(self, action: Action) -> Result<Self, InvalidTransition> {
        match (self, action) {
            (Self::Pending | Self::Countered, Action::Accept) => {
                Ok(Self::Accepted)
            }
            (Self::Pending | Self::Countered, Action::Reject) => {
                Ok(Self::Rejected)
            }
            (Self::Pending, Action::Counter) => Ok(Self::Countered),
            (Self::Accepted, Action::Book) => Ok(Self::Booked),
            (
                Self::Countered | Self::Accepted | Self::Rejected | Self::Booked,
                Action::Counter,
            )
            | (
                Self::Accepted | Self::Rejected | Self::Booked,
                Action::Accept | Action::Reject,
            )
            | (
                Self::Pending | Self::Countered | Self::Rejected | Self::Booked,
                Action::Book,
            ) => Err(InvalidTransition { from: self, action }),
        }
    }

    /// Indicates whether the provided [`Action`] is permitted from this
    /// [`Status`].
    #[must_use]
    pub const fn permits(self, action: Action) -> bool {
        self.next(action).is_ok()
    }

    /// Indicates whether no [`Action`] is permitted from this [`Status`].
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Booked)
    }

    /// Indicates whether this [`Status`] is still being negotiated.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Countered)
    }
}

/// Requested move of an [`Offer`] to another [`Status`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Transition {
    /// [`Action::Accept`].
    Accept,

    /// [`Action::Reject`].
    Reject,

    /// [`Action::Counter`] with the new [`Price`].
    Counter {
        /// New [`Price`] of the [`Offer`].
        price: Price,

        /// [`Role`] proposing the new [`Price`].
        by: Role,
    },

    /// [`Action::Book`].
    Book,
}

impl Transition {
    /// Returns [`Action`] of this [`Transition`].
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Accept => Action::Accept,
            Self::Reject => Action::Reject,
            Self::Counter { .. } => Action::Counter,
            Self::Book => Action::Book,
        }
    }
}

/// Error of an [`Action`] not permitted from the current [`Status`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("cannot {action} an `Offer` which is {from}")]
pub struct InvalidTransition {
    /// [`Status`] the [`Action`] was attempted from.
    pub from: Status,

    /// Attempted [`Action`].
    pub action: Action,
}

impl Offer {
    /// Applies the provided [`Transition`] to this [`Offer`].
    ///
    /// Either both the [`Status`] and the [`Price`] are updated, or nothing is.
    ///
    /// # Errors
    ///
    /// If the [`Transition`] is not permitted from the current [`Status`].
    pub fn apply(
        &mut self,
        transition: Transition,
    ) -> Result<(), InvalidTransition> {
        self.status = self.status.next(transition.action())?;
        if let Transition::Counter { price, by } = transition {
            self.price = price;
            self.changed_by_owner = by == Role::Owner;
        }
        Ok(())
    }
}

//! Local cache of [`Offer`]s seen by the current viewer.

use std::{collections::HashSet, sync::Arc};

use parking_lot::Mutex;

use crate::domain::{offer, Offer};

/// Shared list of [`Offer`]s along with the IDs of [`Offer`]s having a
/// request in flight.
///
/// Stays stale until explicitly replaced. Never holds its lock across an
/// `.await`.
#[derive(Clone, Debug, Default)]
pub struct OfferCache(Arc<Mutex<State>>);

/// Inner state of an [`OfferCache`].
#[derive(Debug, Default)]
struct State {
    /// Cached [`Offer`]s, in the order they were served.
    offers: Vec<Offer>,

    /// IDs of [`Offer`]s with a request in flight.
    in_flight: HashSet<offer::Id>,
}

impl OfferCache {
    /// Replaces all the cached [`Offer`]s.
    pub fn replace(&self, offers: Vec<Offer>) {
        self.0.lock().offers = offers;
    }

    /// Returns a copy of all the cached [`Offer`]s.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Offer> {
        self.0.lock().offers.clone()
    }

    /// Returns a copy of the cached [`Offer`] with the provided ID, if any.
    #[must_use]
    pub fn get(&self, id: offer::Id) -> Option<Offer> {
        self.0.lock().offers.iter().find(|o| o.id == id).cloned()
    }

    /// Updates the cached [`Offer`] with the provided ID in place.
    ///
    /// Returns [`None`] if there is no such [`Offer`] in this cache.
    pub fn update<T>(
        &self,
        id: offer::Id,
        f: impl FnOnce(&mut Offer) -> T,
    ) -> Option<T> {
        self.0.lock().offers.iter_mut().find(|o| o.id == id).map(f)
    }

    /// Puts the provided [`Offer`] in front of the cached ones.
    pub fn prepend(&self, offer: Offer) {
        self.0.lock().offers.insert(0, offer);
    }

    /// Removes the cached [`Offer`] with the provided ID.
    ///
    /// Returns the removed [`Offer`], if any.
    pub fn remove(&self, id: offer::Id) -> Option<Offer> {
        let mut state = self.0.lock();
        let pos = state.offers.iter().position(|o| o.id == id)?;
        Some(state.offers.remove(pos))
    }

    /// Marks a request for the [`Offer`] with the provided ID as in flight.
    ///
    /// Returns [`None`] if another request for it is in flight already.
    #[must_use]
    pub fn begin(&self, id: offer::Id) -> Option<InFlight> {
        self.0.lock().in_flight.insert(id).then(|| InFlight {
            cache: self.clone(),
            id,
        })
    }

    /// Indicates whether a request for the [`Offer`] with the provided ID is
    /// in flight.
    #[must_use]
    pub fn is_in_flight(&self, id: offer::Id) -> bool {
        self.0.lock().in_flight.contains(&id)
    }
}

/// Guard of a request for an [`Offer`] being in flight.
///
/// Releases the [`Offer`] once dropped, whether the request completed or was
/// abandoned.
#[derive(Debug)]
pub struct InFlight {
    /// [`OfferCache`] this guard belongs to.
    cache: OfferCache,

    /// ID of the guarded [`Offer`].
    id: offer::Id,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        _ = self.cache.0.lock().in_flight.remove(&self.id);
    }
}

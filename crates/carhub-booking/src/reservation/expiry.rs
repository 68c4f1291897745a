//! Cancellable one-shot timers for hold expiry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::task::AbortHandle;
use tracing::debug;

use carhub_core::types::BookingToken;

/// Runs a deferred action per hold after a fixed delay.
///
/// Each timer is a spawned task; its abort handle is kept so that paying for
/// or cancelling a hold can stop the timer early.
#[derive(Debug, Clone, Default)]
pub struct ExpiryScheduler {
    timers: Arc<DashMap<BookingToken, AbortHandle>>,
}

impl ExpiryScheduler {
    /// Creates a scheduler with no pending timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `on_expire` after `delay` unless cancelled first.
    ///
    /// Scheduling again for the same token replaces the earlier timer.
    pub fn schedule<F>(&self, token: BookingToken, delay: Duration, on_expire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Holding the entry while spawning keeps the task from clearing its
        // slot before the handle is stored.
        let entry = self.timers.entry(token);
        let timers = Arc::clone(&self.timers);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let id = tokio::task::id();
            timers.remove_if(&token, |_, handle| handle.id() == id);
            on_expire.await;
        });

        match entry {
            Entry::Occupied(mut slot) => slot.insert(handle.abort_handle()).abort(),
            Entry::Vacant(slot) => {
                slot.insert(handle.abort_handle());
            }
        }
        debug!(token = %token, delay_secs = delay.as_secs(), "Expiry scheduled");
    }

    /// Cancels the timer for `token`. Returns `true` if one was pending.
    pub fn cancel(&self, token: BookingToken) -> bool {
        match self.timers.remove(&token) {
            Some((_, handle)) => {
                handle.abort();
                debug!(token = %token, "Expiry cancelled");
                true
            }
            None => false,
        }
    }

    /// Number of timers that have neither fired nor been cancelled.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }
}

//! # carhub-booking
//!
//! The booking-reservation workflow for CarHub:
//!
//! - [`lock`]: key-based mutual exclusion over the configured cache provider
//! - [`hold`]: time-bounded booking holds and the registries that keep them
//! - [`reservation`]: the reservation manager (lock, price, invoice, hold, expiry)
//! - [`summary`]: the tolerant confirmation read path

pub mod hold;
pub mod lock;
pub mod reservation;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use hold::{
    BookingHold, CacheHoldRegistry, HoldRegistry, HoldRegistryDispatch, MemoryHoldRegistry,
};
pub use lock::{DistributedLock, LockGuard};
pub use reservation::{BookingConfirmation, BookingOutcome, BookingRequest, ReservationManager};
pub use summary::{BookingSummary, SummaryAssembler};

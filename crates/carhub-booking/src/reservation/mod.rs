//! Booking reservation workflow.

pub mod expiry;
pub mod manager;
pub mod outcome;
pub mod pricing;

pub use expiry::ExpiryScheduler;
pub use manager::{BookingRequest, ReservationManager};
pub use outcome::{BookingConfirmation, BookingOutcome};

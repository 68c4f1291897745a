//! Confirmation summary for a booking hold.

pub mod assembler;
pub mod terms;

pub use assembler::{BookingSummary, SummaryAssembler};
pub use terms::default_terms;

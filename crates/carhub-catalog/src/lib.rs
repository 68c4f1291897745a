//! # carhub-catalog
//!
//! Reference implementations of the collaborator contracts the booking
//! workflow depends on, seeded from the `[catalog]` configuration section.
//! They stand in for the real fleet, invoicing, and customer services.

pub mod fleet;
pub mod invoices;
pub mod renters;

pub use fleet::InMemoryFleet;
pub use invoices::{InMemoryInvoiceLedger, PendingInvoice};
pub use renters::InMemoryRenterDirectory;

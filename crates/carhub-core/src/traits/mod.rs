//! Trait seams between the booking core and its backing services.

pub mod cache;
pub mod catalog;

pub use cache::CacheProvider;
pub use catalog::{
    InvoiceIssuer, IssuedInvoice, ModelDirectory, RenterDirectory, StationDirectory,
    VehicleAvailability, VehicleRef,
};

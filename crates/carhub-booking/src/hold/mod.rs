//! Time-bounded booking holds and their registries.
//!
//! Provides hold storage using either:
//! - A process-local concurrent map (single node, or sticky routing by token)
//! - The configured cache provider (shared across nodes when it is Redis)

pub mod cache;
pub mod memory;
pub mod model;
pub mod registry;

pub use cache::CacheHoldRegistry;
pub use memory::MemoryHoldRegistry;
pub use model::BookingHold;
pub use registry::{HoldRegistry, HoldRegistryDispatch};

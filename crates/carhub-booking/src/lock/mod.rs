//! Distributed lock over the cache provider.
//!
//! Works across server instances with the Redis provider and within a
//! single process with the in-memory provider.

pub mod distributed;

pub use distributed::{DistributedLock, LockGuard};

//! Try-acquire-with-expiry lock built on `SET NX`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use carhub_cache::CacheManager;
use carhub_core::traits::cache::CacheProvider;

/// Proof of a successful acquisition.
///
/// Carries the owner value written into the lock entry so the holder can
/// later release the lock without clobbering a newer owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockGuard {
    key: String,
    owner: String,
}

impl LockGuard {
    /// The locked key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The owner value stored under the key.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

/// Key-based mutual exclusion with automatic expiry.
///
/// Every operation fails closed: a store error makes acquisition report
/// "held", and release failures are only logged. Callers never see an
/// error from this type.
#[derive(Debug, Clone)]
pub struct DistributedLock {
    cache: Arc<CacheManager>,
}

impl DistributedLock {
    /// Creates a lock backed by the given cache.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    /// Attempts to take `key` for `ttl`.
    ///
    /// Returns `false` if another holder has it or the store is unreachable.
    pub async fn try_acquire(&self, key: &str, ttl: Duration) -> bool {
        self.try_acquire_owned(key, ttl).await.is_some()
    }

    /// Attempts to take `key` for `ttl`, returning a guard with a fresh owner
    /// value on success.
    pub async fn try_acquire_owned(&self, key: &str, ttl: Duration) -> Option<LockGuard> {
        let owner = Uuid::new_v4().to_string();

        match self.cache.set_nx(key, &owner, ttl).await {
            Ok(true) => {
                debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "Lock acquired");
                Some(LockGuard {
                    key: key.to_string(),
                    owner,
                })
            }
            Ok(false) => {
                debug!(key = %key, "Lock already held");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Lock store unavailable, treating lock as held");
                None
            }
        }
    }

    /// Unconditionally deletes `key`.
    pub async fn release(&self, key: &str) {
        match self.cache.delete(key).await {
            Ok(()) => debug!(key = %key, "Lock released"),
            Err(e) => warn!(key = %key, error = %e, "Failed to release lock"),
        }
    }

    /// Deletes `key` only if it still holds `owner`.
    ///
    /// Returns `true` if this call removed the entry.
    pub async fn release_if_owner(&self, key: &str, owner: &str) -> bool {
        match self.cache.delete_if_equals(key, owner).await {
            Ok(true) => {
                debug!(key = %key, "Lock released by owner");
                true
            }
            Ok(false) => {
                debug!(key = %key, "Lock no longer owned, left in place");
                false
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to release owned lock");
                false
            }
        }
    }

    /// Releases the lock described by `guard` if it is still owned.
    pub async fn release_guard(&self, guard: &LockGuard) -> bool {
        self.release_if_owner(&guard.key, &guard.owner).await
    }
}

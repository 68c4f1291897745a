//! Hold registry trait and backend dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use carhub_cache::CacheManager;
use carhub_core::config::RegistryBackend;
use carhub_core::result::AppResult;
use carhub_core::types::{BookingToken, VehicleId};

use super::cache::CacheHoldRegistry;
use super::memory::MemoryHoldRegistry;
use super::model::BookingHold;

/// Storage for active booking holds keyed by token.
///
/// Implementations must make `insert` and `remove` atomic per token, and
/// every hold from concurrent inserts for one vehicle must stay visible to
/// [`HoldRegistry::find_overlapping`].
/// Expired entries may linger until evicted but must never be returned by
/// [`HoldRegistry::find_overlapping`].
#[async_trait]
pub trait HoldRegistry: Send + Sync + std::fmt::Debug {
    /// Registers a hold. Returns `false` if the token is already present.
    async fn insert(&self, hold: BookingHold) -> AppResult<bool>;

    /// Looks up a hold by token, expired or not.
    async fn get(&self, token: BookingToken) -> AppResult<Option<BookingHold>>;

    /// Removes a hold, returning it if it was present.
    async fn remove(&self, token: BookingToken) -> AppResult<Option<BookingHold>>;

    /// Returns unexpired holds on `vehicle_id` whose window intersects
    /// `[start, end)`.
    async fn find_overlapping(
        &self,
        vehicle_id: VehicleId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<BookingHold>>;
}

/// Dispatcher for hold registry backends.
///
/// Switches between the in-process map and the cache provider based on
/// configuration.
#[derive(Debug, Clone)]
pub enum HoldRegistryDispatch {
    /// Process-local map.
    Memory(MemoryHoldRegistry),
    /// Stored through the cache provider.
    Cache(CacheHoldRegistry),
}

impl HoldRegistryDispatch {
    /// Creates the registry selected by `backend`.
    pub fn new(backend: RegistryBackend, cache: Arc<CacheManager>) -> Self {
        info!(backend = %backend, "Initializing hold registry");
        match backend {
            RegistryBackend::Memory => Self::Memory(MemoryHoldRegistry::new()),
            RegistryBackend::Cache => Self::Cache(CacheHoldRegistry::new(cache)),
        }
    }
}

#[async_trait]
impl HoldRegistry for HoldRegistryDispatch {
    async fn insert(&self, hold: BookingHold) -> AppResult<bool> {
        match self {
            Self::Memory(inner) => inner.insert(hold).await,
            Self::Cache(inner) => inner.insert(hold).await,
        }
    }

    async fn get(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        match self {
            Self::Memory(inner) => inner.get(token).await,
            Self::Cache(inner) => inner.get(token).await,
        }
    }

    async fn remove(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        match self {
            Self::Memory(inner) => inner.remove(token).await,
            Self::Cache(inner) => inner.remove(token).await,
        }
    }

    async fn find_overlapping(
        &self,
        vehicle_id: VehicleId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<BookingHold>> {
        match self {
            Self::Memory(inner) => inner.find_overlapping(vehicle_id, start, end, now).await,
            Self::Cache(inner) => inner.find_overlapping(vehicle_id, start, end, now).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{memory_cache, sample_hold};

    #[tokio::test]
    async fn test_dispatch_selects_backend() {
        let memory = HoldRegistryDispatch::new(RegistryBackend::Memory, memory_cache());
        assert!(matches!(memory, HoldRegistryDispatch::Memory(_)));

        let cache = HoldRegistryDispatch::new(RegistryBackend::Cache, memory_cache());
        assert!(matches!(cache, HoldRegistryDispatch::Cache(_)));

        let hold = sample_hold(VehicleId::new());
        assert!(cache.insert(hold.clone()).await.unwrap());
        assert_eq!(cache.get(hold.token).await.unwrap(), Some(hold));
    }
}

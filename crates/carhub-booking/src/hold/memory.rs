//! In-process hold registry backed by `DashMap`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use carhub_core::result::AppResult;
use carhub_core::types::{BookingToken, VehicleId};

use super::model::BookingHold;
use super::registry::HoldRegistry;

/// Hold registry living in this process.
///
/// Suitable for a single node, or for several nodes when requests are
/// routed by token.
#[derive(Debug, Clone, Default)]
pub struct MemoryHoldRegistry {
    holds: Arc<DashMap<BookingToken, BookingHold>>,
}

impl MemoryHoldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.holds.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }
}

#[async_trait]
impl HoldRegistry for MemoryHoldRegistry {
    async fn insert(&self, hold: BookingHold) -> AppResult<bool> {
        match self.holds.entry(hold.token) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(hold);
                Ok(true)
            }
        }
    }

    async fn get(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        Ok(self.holds.get(&token).map(|entry| entry.value().clone()))
    }

    async fn remove(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        Ok(self.holds.remove(&token).map(|(_, hold)| hold))
    }

    async fn find_overlapping(
        &self,
        vehicle_id: VehicleId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<BookingHold>> {
        Ok(self
            .holds
            .iter()
            .filter(|entry| {
                let hold = entry.value();
                hold.vehicle_id == vehicle_id && !hold.is_expired_at(now) && hold.overlaps(start, end)
            })
            .map(|entry| entry.value().clone())
            .collect())
    }
}

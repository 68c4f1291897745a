//! Hold registry stored through the cache provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use carhub_cache::CacheManager;
use carhub_cache::keys;
use carhub_core::result::AppResult;
use carhub_core::traits::cache::CacheProvider;
use carhub_core::types::{BookingToken, VehicleId};

use super::model::BookingHold;
use super::registry::HoldRegistry;

/// Hold registry that keeps each hold as JSON in the cache.
///
/// Holds live under `carhub:hold:{token}` with a TTL equal to their
/// remaining lifetime. A per-vehicle set of tokens supports overlap checks.
/// Every write is a single atomic store operation, so concurrent bookings of
/// the same vehicle never lose each other's index entries. Tokens whose hold
/// has gone are pruned from the set when read.
#[derive(Debug, Clone)]
pub struct CacheHoldRegistry {
    cache: Arc<CacheManager>,
}

impl CacheHoldRegistry {
    /// Creates a registry over `cache`.
    pub fn new(cache: Arc<CacheManager>) -> Self {
        Self { cache }
    }

    async fn prune(&self, index: &str, member: &str) {
        if let Err(e) = self.cache.remove_from_set(index, member).await {
            warn!(key = index, member, error = %e, "Failed to prune hold index");
        }
    }
}

#[async_trait]
impl HoldRegistry for CacheHoldRegistry {
    async fn insert(&self, hold: BookingHold) -> AppResult<bool> {
        let key = keys::hold_by_token(hold.token);
        let ttl = hold.remaining_at(Utc::now());
        let json = serde_json::to_string(&hold)?;

        if !self.cache.set_nx(&key, &json, ttl).await? {
            return Ok(false);
        }

        let index = keys::vehicle_holds(hold.vehicle_id);
        if let Err(e) = self
            .cache
            .add_to_set(&index, &hold.token.to_string(), ttl)
            .await
        {
            // An unindexed hold would be invisible to overlap checks.
            if let Err(cleanup) = self.cache.delete(&key).await {
                warn!(token = %hold.token, error = %cleanup, "Failed to roll back unindexed hold");
            }
            return Err(e);
        }

        debug!(token = %hold.token, vehicle_id = %hold.vehicle_id, "Hold stored in cache");
        Ok(true)
    }

    async fn get(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        self.cache.get_json(&keys::hold_by_token(token)).await
    }

    async fn remove(&self, token: BookingToken) -> AppResult<Option<BookingHold>> {
        let Some(json) = self.cache.take(&keys::hold_by_token(token)).await? else {
            return Ok(None);
        };
        let hold: BookingHold = serde_json::from_str(&json)?;

        self.prune(&keys::vehicle_holds(hold.vehicle_id), &token.to_string())
            .await;
        Ok(Some(hold))
    }

    async fn find_overlapping(
        &self,
        vehicle_id: VehicleId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<BookingHold>> {
        let index = keys::vehicle_holds(vehicle_id);
        let mut overlapping = Vec::new();

        for member in self.cache.set_members(&index).await? {
            let live = match member.parse::<BookingToken>() {
                Ok(token) => self
                    .get(token)
                    .await?
                    .filter(|hold| !hold.is_expired_at(now)),
                Err(_) => None,
            };

            match live {
                Some(hold) if hold.overlaps(start, end) => overlapping.push(hold),
                Some(_) => {}
                None => self.prune(&index, &member).await,
            }
        }

        Ok(overlapping)
    }
}

//! Test doubles shared by the unit tests in this crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, DurationRound, TimeDelta, Utc};

use carhub_cache::CacheManager;
use carhub_cache::memory::MemoryCacheProvider;
use carhub_core::config::cache::MemoryCacheConfig;
use carhub_core::error::AppError;
use carhub_core::result::AppResult;
use carhub_core::traits::cache::CacheProvider;
use carhub_core::traits::catalog::{
    InvoiceIssuer, IssuedInvoice, ModelDirectory, RenterDirectory, StationDirectory,
    VehicleAvailability, VehicleRef,
};
use carhub_core::types::{
    BookingToken, InvoiceId, ModelId, Money, RenterId, StationId, VehicleId,
};

use crate::hold::BookingHold;

fn memory_provider() -> MemoryCacheProvider {
    MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 1_000 })
}

pub fn memory_cache() -> Arc<CacheManager> {
    Arc::new(CacheManager::from_provider(Arc::new(memory_provider())))
}

/// A memory cache that yields to the scheduler before every call, so
/// concurrent callers interleave between store round trips.
pub fn yielding_cache() -> Arc<CacheManager> {
    let provider = YieldingCache {
        inner: memory_provider(),
    };
    Arc::new(CacheManager::from_provider(Arc::new(provider)))
}

pub fn failing_cache() -> Arc<CacheManager> {
    Arc::new(CacheManager::from_provider(Arc::new(UnreachableCache)))
}

/// Tomorrow at 09:00 UTC.
pub fn tomorrow_at_nine() -> DateTime<Utc> {
    let midnight = Utc::now()
        .duration_trunc(TimeDelta::days(1))
        .unwrap_or_else(|_| Utc::now());
    midnight + TimeDelta::days(1) + TimeDelta::hours(9)
}

pub fn sample_hold(vehicle_id: VehicleId) -> BookingHold {
    let now = Utc::now();
    let start = tomorrow_at_nine();
    BookingHold {
        token: BookingToken::new(),
        renter_id: RenterId::new(),
        model_id: ModelId::new(),
        station_id: StationId::new(),
        vehicle_id,
        start_time: start,
        end_time: start + TimeDelta::hours(2),
        total_cost: Money::from_major(200),
        invoice_id: InvoiceId::new(),
        lock_key: format!("carhub:lock:booking:{vehicle_id}:test"),
        lock_owner: "owner".to_string(),
        created_at: now,
        expires_at: now + TimeDelta::minutes(10),
    }
}

/// Cache provider whose every call fails, as if the store were down.
#[derive(Debug)]
pub struct UnreachableCache;

impl UnreachableCache {
    fn down<T>() -> AppResult<T> {
        Err(AppError::cache("connection refused"))
    }
}

#[async_trait]
impl CacheProvider for UnreachableCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Self::down()
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<()> {
        Self::down()
    }

    async fn delete(&self, _key: &str) -> AppResult<()> {
        Self::down()
    }

    async fn take(&self, _key: &str) -> AppResult<Option<String>> {
        Self::down()
    }

    async fn set_nx(&self, _key: &str, _value: &str, _ttl: Duration) -> AppResult<bool> {
        Self::down()
    }

    async fn delete_if_equals(&self, _key: &str, _expected: &str) -> AppResult<bool> {
        Self::down()
    }

    async fn add_to_set(&self, _key: &str, _member: &str, _ttl: Duration) -> AppResult<()> {
        Self::down()
    }

    async fn remove_from_set(&self, _key: &str, _member: &str) -> AppResult<()> {
        Self::down()
    }

    async fn set_members(&self, _key: &str) -> AppResult<Vec<String>> {
        Self::down()
    }

    async fn health_check(&self) -> AppResult<bool> {
        Self::down()
    }
}

#[derive(Debug)]
struct YieldingCache {
    inner: MemoryCacheProvider,
}

#[async_trait]
impl CacheProvider for YieldingCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.delete(key).await
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        tokio::task::yield_now().await;
        self.inner.take(key).await
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        tokio::task::yield_now().await;
        self.inner.set_nx(key, value, ttl).await
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> AppResult<bool> {
        tokio::task::yield_now().await;
        self.inner.delete_if_equals(key, expected).await
    }

    async fn add_to_set(&self, key: &str, member: &str, ttl: Duration) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.add_to_set(key, member, ttl).await
    }

    async fn remove_from_set(&self, key: &str, member: &str) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.inner.remove_from_set(key, member).await
    }

    async fn set_members(&self, key: &str) -> AppResult<Vec<String>> {
        tokio::task::yield_now().await;
        self.inner.set_members(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}

/// Availability lookup that always answers with the same vehicle.
#[derive(Debug)]
pub struct FixedFleet {
    pub vehicle: Option<VehicleRef>,
    pub lookups: AtomicUsize,
}

impl FixedFleet {
    pub fn with_vehicle(price_per_hour: Money) -> Arc<Self> {
        Arc::new(Self {
            vehicle: Some(VehicleRef {
                vehicle_id: VehicleId::new(),
                model_id: ModelId::new(),
                price_per_hour,
            }),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            vehicle: None,
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn vehicle_id(&self) -> VehicleId {
        self.vehicle
            .as_ref()
            .map(|v| v.vehicle_id)
            .unwrap_or_default()
    }
}

#[async_trait]
impl VehicleAvailability for FixedFleet {
    async fn find_available_vehicle(
        &self,
        _model_id: ModelId,
        _station_id: StationId,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> AppResult<Option<VehicleRef>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.vehicle.clone())
    }
}

/// Invoice issuer that counts issued invoices and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingInvoices {
    pub issued: AtomicUsize,
    pub fail: AtomicBool,
    pub last_amount: std::sync::Mutex<Option<Money>>,
}

impl RecordingInvoices {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let invoices = Self::default();
        invoices.fail.store(true, Ordering::SeqCst);
        Arc::new(invoices)
    }

    pub fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn last_amount(&self) -> Option<Money> {
        *self.last_amount.lock().unwrap()
    }
}

#[async_trait]
impl InvoiceIssuer for RecordingInvoices {
    async fn issue_pending_invoice(&self, amount: Money) -> AppResult<IssuedInvoice> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service("invoice service timed out"));
        }
        self.issued.fetch_add(1, Ordering::SeqCst);
        *self.last_amount.lock().unwrap() = Some(amount);
        Ok(IssuedInvoice {
            invoice_id: InvoiceId::new(),
            token_seed: BookingToken::new(),
        })
    }
}

/// Directory answering every lookup the same way.
#[derive(Debug, Clone)]
pub enum Directory {
    Named(&'static str),
    Missing,
    Broken,
}

#[async_trait]
impl ModelDirectory for Directory {
    async fn resolve_model_name(&self, _model_id: ModelId) -> AppResult<Option<String>> {
        match self {
            Self::Named(name) => Ok(Some(name.to_string())),
            Self::Missing => Ok(None),
            Self::Broken => Err(AppError::external_service("model lookup failed")),
        }
    }
}

#[async_trait]
impl StationDirectory for Directory {
    async fn resolve_station_name(&self, _station_id: StationId) -> AppResult<Option<String>> {
        match self {
            Self::Named(name) => Ok(Some(name.to_string())),
            Self::Missing => Ok(None),
            Self::Broken => Err(AppError::external_service("station lookup failed")),
        }
    }
}

#[async_trait]
impl RenterDirectory for Directory {
    async fn resolve_renter_display_name(&self, _renter_id: RenterId) -> AppResult<String> {
        match self {
            Self::Named(name) => Ok(name.to_string()),
            Self::Missing => Ok(String::new()),
            Self::Broken => Err(AppError::external_service("renter lookup failed")),
        }
    }
}

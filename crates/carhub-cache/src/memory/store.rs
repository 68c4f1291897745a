//! In-memory cache implementation using the moka crate.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use tracing::debug;

use carhub_core::config::cache::MemoryCacheConfig;
use carhub_core::error::AppError;
use carhub_core::result::AppResult;
use carhub_core::traits::cache::CacheProvider;

/// What a key holds.
#[derive(Debug, Clone)]
enum Payload {
    Text(String),
    Members(BTreeSet<String>),
}

/// A cached payload together with the TTL it was written with.
#[derive(Debug, Clone)]
struct StoredValue {
    payload: Payload,
    ttl: Duration,
    written_at: Instant,
}

impl StoredValue {
    fn new(payload: Payload, ttl: Duration) -> Self {
        Self {
            payload,
            ttl,
            written_at: Instant::now(),
        }
    }

    fn remaining(&self) -> Duration {
        self.ttl.saturating_sub(self.written_at.elapsed())
    }
}

/// Expires each entry after the TTL it was written with.
#[derive(Debug, Clone, Copy)]
struct PerEntryExpiry;

impl Expiry<String, StoredValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Every mutation goes through moka's entry API, so each operation is atomic
/// per key within this process.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, StoredValue>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryExpiry)
            .build();

        Self { cache }
    }

    fn text(value: &str, ttl: Duration) -> StoredValue {
        StoredValue::new(Payload::Text(value.to_string()), ttl)
    }

    fn wrong_type(key: &str) -> AppError {
        AppError::cache(format!("Key '{key}' holds a different kind of value"))
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        match self.cache.get(key).await.map(|stored| stored.payload) {
            Some(Payload::Text(value)) => Ok(Some(value)),
            Some(Payload::Members(_)) => Err(Self::wrong_type(key)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(key.to_string(), Self::text(value, ttl))
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn take(&self, key: &str) -> AppResult<Option<String>> {
        let result = self
            .cache
            .entry(key.to_string())
            .and_compute_with(|current| {
                let text = current
                    .is_some_and(|entry| matches!(entry.value().payload, Payload::Text(_)));
                let op = if text { Op::Remove } else { Op::Nop };
                std::future::ready(op)
            })
            .await;

        match result {
            CompResult::Removed(entry) => match entry.into_value().payload {
                Payload::Text(value) => Ok(Some(value)),
                Payload::Members(_) => Err(Self::wrong_type(key)),
            },
            CompResult::Unchanged(_) => Err(Self::wrong_type(key)),
            _ => Ok(None),
        }
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        let stored = Self::text(value, ttl);
        let entry = self
            .cache
            .entry(key.to_string())
            .or_insert_with(async move { stored })
            .await;
        Ok(entry.is_fresh())
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> AppResult<bool> {
        let expected = expected.to_string();
        let result = self
            .cache
            .entry(key.to_string())
            .and_compute_with(move |current| {
                let owned = current.is_some_and(|entry| {
                    matches!(&entry.value().payload, Payload::Text(value) if *value == expected)
                });
                let op = if owned { Op::Remove } else { Op::Nop };
                std::future::ready(op)
            })
            .await;

        let removed = matches!(result, CompResult::Removed(_));
        debug!(key, removed, "Conditional delete");
        Ok(removed)
    }

    async fn add_to_set(&self, key: &str, member: &str, ttl: Duration) -> AppResult<()> {
        let member = member.to_string();
        let result = self
            .cache
            .entry(key.to_string())
            .and_compute_with(move |current| {
                let op = match current.map(|entry| entry.into_value()) {
                    None => Op::Put(StoredValue::new(
                        Payload::Members(BTreeSet::from([member])),
                        ttl,
                    )),
                    Some(existing) => {
                        let ttl = ttl.max(existing.remaining());
                        match existing.payload {
                            Payload::Members(mut members) => {
                                members.insert(member);
                                Op::Put(StoredValue::new(Payload::Members(members), ttl))
                            }
                            Payload::Text(_) => Op::Nop,
                        }
                    }
                };
                std::future::ready(op)
            })
            .await;

        match result {
            CompResult::Unchanged(_) => Err(Self::wrong_type(key)),
            _ => Ok(()),
        }
    }

    async fn remove_from_set(&self, key: &str, member: &str) -> AppResult<()> {
        let member = member.to_string();
        let result = self
            .cache
            .entry(key.to_string())
            .and_compute_with(move |current| {
                let op = match current.map(|entry| entry.into_value()) {
                    Some(existing) => {
                        let remaining = existing.remaining();
                        match existing.payload {
                            Payload::Members(mut members) => {
                                if !members.remove(&member) {
                                    Op::Nop
                                } else if members.is_empty() {
                                    Op::Remove
                                } else {
                                    Op::Put(StoredValue::new(Payload::Members(members), remaining))
                                }
                            }
                            Payload::Text(_) => Op::Nop,
                        }
                    }
                    None => Op::Nop,
                };
                std::future::ready(op)
            })
            .await;

        match result {
            CompResult::Unchanged(entry) if matches!(entry.value().payload, Payload::Text(_)) => {
                Err(Self::wrong_type(key))
            }
            _ => Ok(()),
        }
    }

    async fn set_members(&self, key: &str) -> AppResult<Vec<String>> {
        match self.cache.get(key).await.map(|stored| stored.payload) {
            Some(Payload::Members(members)) => Ok(members.into_iter().collect()),
            Some(Payload::Text(_)) => Err(Self::wrong_type(key)),
            None => Ok(Vec::new()),
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig { max_capacity: 1000 };
        MemoryCacheProvider::new(&config)
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_set_nx() {
        let provider = make_provider();
        let first = provider
            .set_nx("nx_key", "val", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(first);
        let second = provider
            .set_nx("nx_key", "val2", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!second);
        assert_eq!(provider.get("nx_key").await.unwrap(), Some("val".to_string()));
    }

    #[tokio::test]
    async fn test_set_nx_after_expiry() {
        let provider = make_provider();
        assert!(
            provider
                .set_nx("short", "a", Duration::from_millis(50))
                .await
                .unwrap()
        );
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(provider.get("short").await.unwrap(), None);
        assert!(
            provider
                .set_nx("short", "b", Duration::from_secs(60))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_delete_if_equals() {
        let provider = make_provider();
        provider
            .set("owned", "owner-a", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(!provider.delete_if_equals("owned", "owner-b").await.unwrap());
        assert!(provider.get("owned").await.unwrap().is_some());

        assert!(provider.delete_if_equals("owned", "owner-a").await.unwrap());
        assert_eq!(provider.get("owned").await.unwrap(), None);

        assert!(!provider.delete_if_equals("owned", "owner-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_take_returns_value_once() {
        let provider = make_provider();
        provider
            .set("taken", "v", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(provider.take("taken").await.unwrap(), Some("v".to_string()));
        assert_eq!(provider.take("taken").await.unwrap(), None);
        assert_eq!(provider.get("taken").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_take_has_one_winner() {
        let provider = Arc::new(make_provider());
        provider
            .set("contested", "v", Duration::from_secs(60))
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = Arc::clone(&provider);
                tokio::spawn(async move { provider.take("contested").await.unwrap() })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_set_members_add_and_remove() {
        let provider = make_provider();
        let ttl = Duration::from_secs(60);
        provider.add_to_set("members", "b", ttl).await.unwrap();
        provider.add_to_set("members", "a", ttl).await.unwrap();
        provider.add_to_set("members", "a", ttl).await.unwrap();
        assert_eq!(
            provider.set_members("members").await.unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );

        provider.remove_from_set("members", "a").await.unwrap();
        provider.remove_from_set("members", "missing").await.unwrap();
        assert_eq!(provider.set_members("members").await.unwrap(), vec!["b".to_string()]);

        provider.remove_from_set("members", "b").await.unwrap();
        assert!(provider.set_members("members").await.unwrap().is_empty());
        provider.remove_from_set("members", "b").await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_keep_every_member() {
        let provider = Arc::new(make_provider());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let provider = Arc::clone(&provider);
                tokio::spawn(async move {
                    provider
                        .add_to_set("crowded", &format!("m{i:02}"), Duration::from_secs(60))
                        .await
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(provider.set_members("crowded").await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_add_keeps_longer_ttl() {
        let provider = make_provider();
        provider
            .add_to_set("lasting", "long", Duration::from_secs(60))
            .await
            .unwrap();
        provider
            .add_to_set("lasting", "short", Duration::from_millis(50))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(provider.set_members("lasting").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_kind_mismatch_is_an_error() {
        let provider = make_provider();
        let ttl = Duration::from_secs(60);
        provider.set("text", "v", ttl).await.unwrap();
        provider.add_to_set("set", "m", ttl).await.unwrap();

        assert!(provider.add_to_set("text", "m", ttl).await.is_err());
        assert!(provider.set_members("text").await.is_err());
        assert!(provider.get("set").await.is_err());
        assert!(provider.take("set").await.is_err());
        assert_eq!(provider.get("text").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let provider = make_provider();
        let data = serde_json::json!({"name": "test", "count": 42});
        provider
            .set_json("json_key", &data, Duration::from_secs(60))
            .await
            .unwrap();
        let result: Option<serde_json::Value> = provider.get_json("json_key").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}

//! Cache provider trait for pluggable key-value backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for key-value backends (Redis or in-memory).
///
/// Values are strings (JSON for structured data) or sets of string members.
/// The provider is responsible for key prefixing and TTL enforcement. Every
/// operation other than the JSON helpers must be atomic per key: the
/// distributed lock is built on [`CacheProvider::set_nx`] and
/// [`CacheProvider::delete_if_equals`], and the cache-backed hold registry
/// on [`CacheProvider::take`] and the set operations.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key from the cache.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Delete a key and return the value it held.
    async fn take(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value only if the key does not already exist (NX).
    /// Returns `true` if the value was set, `false` if the key already existed.
    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Delete a key only if its current value equals `expected`.
    /// Returns `true` if the key was deleted.
    async fn delete_if_equals(&self, key: &str, expected: &str) -> AppResult<bool>;

    /// Add `member` to the set at `key`, creating it if absent. The set
    /// lives for at least `ttl` from now; a longer remaining TTL is kept.
    async fn add_to_set(&self, key: &str, member: &str, ttl: Duration) -> AppResult<()>;

    /// Remove `member` from the set at `key`. An emptied set is deleted.
    async fn remove_from_set(&self, key: &str, member: &str) -> AppResult<()>;

    /// Members of the set at `key`, empty if the key does not exist.
    async fn set_members(&self, key: &str) -> AppResult<Vec<String>>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, ttl).await
    }

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

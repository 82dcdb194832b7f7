use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::{CountryRecord, WeatherRecord};

/// Unbounded, never-expiring key → value store for one session.
///
/// The lock is released before the fetch runs, so two concurrent misses on
/// the same key both hit the network and the later write wins.
#[derive(Debug)]
pub struct Cache<V> {
    entries: RwLock<HashMap<String, V>>,
}

impl<V: Clone> Cache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Return the cached value for `key`, or run `fetch` and store a success.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key).await {
            tracing::debug!(key, "cache hit");
            return Ok(hit);
        }

        let value = fetch().await?;
        self.entries
            .write()
            .await
            .insert(key.to_owned(), value.clone());

        Ok(value)
    }
}

impl<V: Clone> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The two lookup caches, built once at startup and shared by the clients.
#[derive(Debug, Clone, Default)]
pub struct Caches {
    pub countries: Arc<Cache<CountryRecord>>,
    pub weather: Arc<Cache<WeatherRecord>>,
}

impl Caches {
    pub fn new() -> Self {
        Self::default()
    }
}

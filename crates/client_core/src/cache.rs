//! Keyed query cache with invalidation tokens.
//!
//! Readers go through [`QueryCache::read`], which serves the cached value while
//! it is fresh and runs the supplied fetch otherwise. Invalidation only marks
//! an entry stale and bumps its generation; the next read re-fetches.

use std::{collections::HashMap, future::Future, hash::Hash};

use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Books,
}

struct Entry<V> {
    value: Option<V>,
    stale: bool,
    generation: u64,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            value: None,
            stale: true,
            generation: 0,
        }
    }
}

pub struct QueryCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Copy + std::fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fresh cached value for `key`, or fetches a new one.
    ///
    /// A failed fetch leaves the entry untouched. A fetch that overlaps an
    /// invalidation still stores its value, but the entry stays stale.
    pub async fn read<F, Fut, E>(&self, key: K, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let generation = {
            let entries = self.entries.lock().await;
            match entries.get(&key) {
                Some(Entry {
                    value: Some(value),
                    stale: false,
                    ..
                }) => return Ok(value.clone()),
                Some(entry) => entry.generation,
                None => 0,
            }
        };

        debug!(?key, generation, "query cache miss; fetching");
        let value = fetch().await?;

        let mut entries = self.entries.lock().await;
        let entry = entries.entry(key).or_default();
        entry.value = Some(value.clone());
        entry.stale = entry.generation != generation;
        if entry.stale {
            debug!(?key, "query invalidated while fetching; entry stays stale");
        }
        Ok(value)
    }

    /// Last stored value for `key`, fresh or stale. Never fetches.
    pub async fn peek(&self, key: K) -> Option<V> {
        self.entries
            .lock()
            .await
            .get(&key)
            .and_then(|entry| entry.value.clone())
    }

    /// True when the next [`read`](Self::read) of `key` will fetch.
    pub async fn is_stale(&self, key: K) -> bool {
        self.entries
            .lock()
            .await
            .get(&key)
            .map_or(true, |entry| entry.stale || entry.value.is_none())
    }

    pub async fn generation(&self, key: K) -> u64 {
        self.entries
            .lock()
            .await
            .get(&key)
            .map_or(0, |entry| entry.generation)
    }

    /// Marks `key` stale. Restricted to the mutation controller.
    pub(crate) async fn invalidate(&self, key: K) {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(key).or_default();
        entry.stale = true;
        entry.generation += 1;
        debug!(?key, generation = entry.generation, "query invalidated");
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;

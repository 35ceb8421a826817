//! Trivial time-to-live cache for the report endpoints. This is the only
//! caching in the system; entries expire by age or are dropped wholesale when
//! a mutation invalidates the report.

use std::{
    collections::HashMap,
    hash::Hash,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

struct Entry<V> {
    inserted: Instant,
    value: V,
}

/// Keyed cache whose entries expire `ttl` after insertion.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty cache with the given entry lifetime.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch a live entry, if one exists.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.inserted.elapsed() >= self.ttl {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Store a value under `key`, replacing any previous entry.
    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            Entry {
                inserted: Instant::now(),
                value,
            },
        );
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn entries_live_until_the_ttl() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("standings", 7).await;
        assert_eq!(cache.get(&"standings").await, Some(7));
        assert_eq!(cache.get(&"leaderboard").await, None);
    }

    #[tokio::test]
    async fn entries_expire() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_millis(10));
        cache.insert("standings", 7).await;
        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get(&"standings").await, None);
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache: TtlCache<&str, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a", 1).await;
        cache.insert("b", 2).await;
        cache.clear().await;
        assert_eq!(cache.get(&"a").await, None);
        assert_eq!(cache.get(&"b").await, None);
    }
}

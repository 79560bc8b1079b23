//! Geocode cache.
//!
//! Maps the exact address string a user typed to the coordinate it
//! resolved to. Keys are not normalized: `"北京 "` and `"北京"` are separate
//! entries. Only the original query is stored, never the cleaned or keyword
//! variants the resolver fell back to.
//!
//! By default entries live for the whole process and are never evicted.
//! A TTL and a capacity bound can be configured for long-running servers.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::Coordinate;

/// Configuration for the geocode cache.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Optional TTL for cached entries. `None` keeps entries forever.
    pub ttl: Option<Duration>,

    /// Optional maximum number of cached entries. `None` is unbounded.
    pub max_capacity: Option<u64>,
}

impl CacheConfig {
    /// Expire entries after `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Bound the number of entries.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }
}

/// Shared address → coordinate cache.
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct GeocodeCache {
    entries: MokaCache<String, Coordinate>,
}

impl GeocodeCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = MokaCache::builder();
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        if let Some(max) = config.max_capacity {
            builder = builder.max_capacity(max);
        }

        Self {
            entries: builder.build(),
        }
    }

    /// Look up the exact address string.
    pub async fn get(&self, address: &str) -> Option<Coordinate> {
        self.entries.get(address).await
    }

    /// Remember a resolved address.
    pub async fn insert(&self, address: &str, coordinate: Coordinate) {
        self.entries.insert(address.to_string(), coordinate).await;
    }
}

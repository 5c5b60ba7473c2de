//! TTL-based caching for class listings.
//!
//! Listings are keyed by the attribute-filter triple and expire on the same
//! cadence clients re-poll at (about once a minute). Search and ongoing
//! filtering happen after retrieval, so cached data never depends on the
//! clock. Every successful write clears the cache.

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::schedule::ClassEntry;

/// A cache key derived from the attribute filters of a listing query.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct ListingKey(String);

impl ListingKey {
    pub fn new(
        department: Option<&str>,
        batch: Option<&str>,
        section: Option<&str>,
    ) -> Self {
        Self(format!(
            "dept={}|batch={}|section={}",
            department.unwrap_or("*"),
            batch.unwrap_or("*"),
            section.unwrap_or("*"),
        ))
    }
}

/// A cached listing with its insertion time.
#[derive(Clone)]
struct CachedListing {
    classes: Vec<ClassEntry>,
    cached_at: Instant,
}

/// Thread-safe listing cache.
///
/// Uses DashMap for concurrent access without external locking.
pub struct ListingCache {
    entries: DashMap<ListingKey, CachedListing>,
    ttl: Duration,
}

impl ListingCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Creates a cache with the standard 60-second TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(Duration::from_secs(60))
    }

    /// Gets a cached listing if it exists and hasn't expired.
    pub fn get(&self, key: &ListingKey) -> Option<Vec<ClassEntry>> {
        self.entries.get(key).and_then(|entry| {
            if entry.cached_at.elapsed() < self.ttl {
                Some(entry.classes.clone())
            } else {
                // Entry expired, remove it
                drop(entry);
                self.entries.remove(key);
                None
            }
        })
    }

    pub fn insert(&self, key: ListingKey, classes: Vec<ClassEntry>) {
        self.entries.insert(
            key,
            CachedListing {
                classes,
                cached_at: Instant::now(),
            },
        );
    }

    /// Drops every entry; called after any write to the store.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_distinguishes_filters() {
        let all = ListingKey::new(None, None, None);
        let cse = ListingKey::new(Some("CSE"), None, None);
        assert_ne!(all, cse);
        assert_eq!(all, ListingKey::new(None, None, None));
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = ListingCache::with_default_ttl();
        let key = ListingKey::new(Some("CSE"), None, None);
        cache.insert(key.clone(), Vec::new());
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_expired_entries_are_dropped_on_read() {
        let cache = ListingCache::new(Duration::from_millis(0));
        let key = ListingKey::new(None, None, None);
        cache.insert(key.clone(), Vec::new());

        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_empties_the_cache() {
        let cache = ListingCache::with_default_ttl();
        cache.insert(ListingKey::new(None, None, None), Vec::new());
        cache.insert(ListingKey::new(Some("CSE"), None, None), Vec::new());
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}

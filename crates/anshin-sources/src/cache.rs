//! Job-scoped lookup cache using moka.
//!
//! One instance is created per job and handed to the adapters that share
//! it, so concurrent jobs never see each other's entries.

use moka::sync::Cache;

/// Bounded cache from a lookup key (query text, URL) to its result.
#[derive(Clone)]
pub struct LookupCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, V>,
}

impl<V: Clone + Send + Sync + 'static> LookupCache<V> {
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, value: V) {
        self.cache.insert(key, value);
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone + Send + Sync + 'static> std::fmt::Debug for LookupCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let cache: LookupCache<Vec<String>> = LookupCache::new(16);
        cache.insert("q".to_string(), vec!["a".to_string()]);
        assert_eq!(cache.get("q"), Some(vec!["a".to_string()]));
    }

    #[test]
    fn miss_returns_none() {
        let cache: LookupCache<u32> = LookupCache::new(16);
        assert_eq!(cache.get("absent"), None);
    }

    #[test]
    fn separate_instances_do_not_share_entries() {
        let a: LookupCache<u32> = LookupCache::new(16);
        let b: LookupCache<u32> = LookupCache::new(16);
        a.insert("k".to_string(), 1);
        assert_eq!(b.get("k"), None);
    }
}

use std::sync::Arc;

use tracing::warn;

use crate::store::{KeyValueStore, StoreError};

/// Stored in place of a URL when no portrait exists for a name.
pub const NEGATIVE_SENTINEL: &str = "null";

/// Outcome remembered for a player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    Resolved(String),
    Negative,
}

impl CacheEntry {
    pub fn into_url(self) -> Option<String> {
        match self {
            CacheEntry::Resolved(url) => Some(url),
            CacheEntry::Negative => None,
        }
    }

    fn encode(&self) -> &str {
        match self {
            CacheEntry::Resolved(url) => url,
            CacheEntry::Negative => NEGATIVE_SENTINEL,
        }
    }
}

/// Per-name portrait cache on top of a key-value store.
///
/// Keys are `"{prefix}_img_{lower-cased name}"`; entries never expire.
#[derive(Clone)]
pub struct PortraitCache {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl PortraitCache {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, name: &str) -> String {
        format!("{}_img_{}", self.prefix, name.trim().to_lowercase())
    }

    /// Reads the entry for `name`. Store failures and empty values count as a miss.
    pub fn lookup(&self, name: &str) -> Option<CacheEntry> {
        let key = self.key(name);
        match self.store.get(&key) {
            Ok(Some(value)) if value == NEGATIVE_SENTINEL => Some(CacheEntry::Negative),
            Ok(Some(value)) if !value.is_empty() => Some(CacheEntry::Resolved(value)),
            Ok(_) => None,
            Err(err) => {
                warn!(%key, error = %err, "portrait cache read failed; treating as miss");
                None
            }
        }
    }

    /// Writes the entry for `name`. A failed write is logged and otherwise ignored.
    pub fn record(&self, name: &str, entry: &CacheEntry) {
        let key = self.key(name);
        if let Err(err) = self.store.set(&key, entry.encode()) {
            warn!(%key, error = %err, "portrait cache write failed");
        }
    }

    /// Drops the entry for `name` so the next resolution goes to the network again.
    pub fn forget(&self, name: &str) -> Result<(), StoreError> {
        self.store.remove(&self.key(name))
    }
}

impl std::fmt::Debug for PortraitCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortraitCache")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn cache_with(store: &MemoryStore) -> PortraitCache {
        PortraitCache::new(Arc::new(store.clone()), "tb")
    }

    #[test]
    fn key_is_lower_cased_with_prefix() {
        let cache = cache_with(&MemoryStore::new());
        assert_eq!(cache.key("Erling Haaland"), "tb_img_erling haaland");
        assert_eq!(cache.key("  ERLING HAALAND "), "tb_img_erling haaland");
    }

    #[test]
    fn sentinel_and_urls_round_trip_through_store() {
        let store = MemoryStore::new();
        let cache = cache_with(&store);

        cache.record("Jonas Mustermann", &CacheEntry::Negative);
        cache.record(
            "Erling Haaland",
            &CacheEntry::Resolved("https://x/img.jpg".to_string()),
        );

        let raw = store.snapshot();
        assert_eq!(raw["tb_img_jonas mustermann"], "null");
        assert_eq!(raw["tb_img_erling haaland"], "https://x/img.jpg");
        assert_eq!(cache.lookup("jonas mustermann"), Some(CacheEntry::Negative));
    }

    #[test]
    fn empty_value_is_a_miss() {
        let store = MemoryStore::new();
        store.set("tb_img_kai", "").expect("set");
        assert_eq!(cache_with(&store).lookup("Kai"), None);
    }

    #[test]
    fn forget_removes_entry() {
        let store = MemoryStore::new();
        let cache = cache_with(&store);
        cache.record("Kai", &CacheEntry::Negative);
        cache.forget("KAI").expect("forget");
        assert!(store.is_empty());
    }
}

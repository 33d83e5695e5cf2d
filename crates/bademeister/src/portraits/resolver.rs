use std::sync::Arc;

use tracing::{debug, info};

use crate::store::StoreError;

use super::cache::{CacheEntry, PortraitCache};
use super::candidates::candidates_for;
use super::source::PortraitSource;

/// Resolves player names to portrait URLs, remembering every outcome.
///
/// Candidates are tried one after another; the first usable thumbnail wins
/// and is cached. When every candidate misses, the name is cached as having
/// no portrait and no further requests are made for it.
#[derive(Clone)]
pub struct PortraitResolver {
    source: Arc<dyn PortraitSource>,
    cache: PortraitCache,
}

impl PortraitResolver {
    pub fn new(source: Arc<dyn PortraitSource>, cache: PortraitCache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &PortraitCache {
        &self.cache
    }

    pub async fn resolve(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        if let Some(entry) = self.cache.lookup(name) {
            debug!(player = %name, ?entry, "portrait served from cache");
            return entry.into_url();
        }

        let entry = self.sweep(name).await;
        self.cache.record(name, &entry);
        entry.into_url()
    }

    /// Clears whatever is cached for `name`, positive or negative.
    pub fn forget(&self, name: &str) -> Result<(), StoreError> {
        self.cache.forget(name)
    }

    async fn sweep(&self, name: &str) -> CacheEntry {
        for candidate in candidates_for(name) {
            let summary = match self.source.summary(candidate.locale, &candidate.title).await {
                Ok(summary) => summary,
                Err(err) => {
                    debug!(locale = %candidate.locale, title = %candidate.title, error = %err, "portrait candidate failed");
                    continue;
                }
            };

            if summary.is_disambiguation() {
                debug!(locale = %candidate.locale, title = %candidate.title, "portrait candidate is a disambiguation page");
                continue;
            }

            if let Some(url) = summary.image_url() {
                info!(player = %name, locale = %candidate.locale, title = %candidate.title, "portrait resolved");
                return CacheEntry::Resolved(url.to_string());
            }

            debug!(locale = %candidate.locale, title = %candidate.title, "portrait candidate has no thumbnail");
        }

        info!(player = %name, "no portrait found");
        CacheEntry::Negative
    }
}

impl std::fmt::Debug for PortraitResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortraitResolver")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

//! In-process tier of the API key cache, consulted before the shared cache.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;
use tracing::info;

use crate::proto::account::EnvironmentApiKey;
use crate::Result;

struct CacheEntry {
    value: Arc<EnvironmentApiKey>,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(
        &self,
        now: Instant,
    ) -> bool {
        now >= self.expires_at
    }
}

pub(crate) struct InMemoryApiKeyCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl InMemoryApiKeyCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Cached key for `token`, or `None` when absent or expired.
    pub(crate) fn get(
        &self,
        token: &str,
    ) -> Option<Arc<EnvironmentApiKey>> {
        let entry = self.entries.get(token)?;
        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.value.clone())
    }

    pub(crate) fn put(
        &self,
        token: &str,
        value: Arc<EnvironmentApiKey>,
    ) {
        self.entries.insert(
            token.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drops every expired entry and returns how many were removed.
    pub(crate) fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!("evicted {} expired api keys", removed);
        }
        removed
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sweeps expired entries every `interval` until shutdown.
    pub(crate) async fn run_eviction(
        self: Arc<Self>,
        interval: Duration,
        mut shutdown_signal: watch::Receiver<()>,
    ) -> Result<()> {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.evict_expired();
                }
                _ = shutdown_signal.changed() => {
                    info!("api key cache eviction stopped");
                    return Ok(());
                }
            }
        }
    }
}

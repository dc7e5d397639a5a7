//! Best-effort "last used at" tracking per API key.
//!
//! Request handlers only ever `try_send` into a bounded queue through
//! [`UsageTrackerHandle`]. A single background task merges the updates and
//! periodically writes them to the account service.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tracing::debug;
use tracing::info;
use tracing::trace;
use tracing::warn;

use crate::proto::account::UpdateApiKeyLastUsedAtRequest;
use crate::AccountClient;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UsageRecord {
    pub(crate) api_key_id: String,
    pub(crate) environment_id: String,
    pub(crate) last_used_at: i64,
}

/// Sending side held by the service. Cloning is cheap.
#[derive(Debug, Clone)]
pub(crate) struct UsageTrackerHandle {
    tx: mpsc::Sender<UsageRecord>,
}

impl UsageTrackerHandle {
    pub(crate) fn new(tx: mpsc::Sender<UsageRecord>) -> Self {
        Self { tx }
    }

    /// Never blocks. The update is dropped when the queue is full or the
    /// tracker has stopped.
    pub(crate) fn record(
        &self,
        api_key_id: &str,
        environment_id: &str,
        last_used_at: i64,
    ) {
        let record = UsageRecord {
            api_key_id: api_key_id.to_string(),
            environment_id: environment_id.to_string(),
            last_used_at,
        };
        if let Err(e) = self.tx.try_send(record) {
            trace!("api key usage update dropped: {}", e);
        }
    }
}

pub(crate) struct UsageTracker {
    account_client: Arc<dyn AccountClient>,
    // api key id -> (environment id, max last used at)
    entries: DashMap<String, (String, i64)>,
    flush_interval: Duration,
}

impl UsageTracker {
    pub(crate) fn new(
        account_client: Arc<dyn AccountClient>,
        flush_interval: Duration,
    ) -> Self {
        Self {
            account_client,
            entries: DashMap::new(),
            flush_interval,
        }
    }

    /// Keeps the maximum timestamp seen per key.
    pub(crate) fn merge(
        &self,
        record: UsageRecord,
    ) {
        self.entries
            .entry(record.api_key_id)
            .and_modify(|(env, ts)| {
                if record.last_used_at > *ts {
                    *ts = record.last_used_at;
                    *env = record.environment_id.clone();
                }
            })
            .or_insert((record.environment_id, record.last_used_at));
    }

    #[cfg(test)]
    pub(crate) fn last_used_at(
        &self,
        api_key_id: &str,
    ) -> Option<i64> {
        self.entries.get(api_key_id).map(|e| e.1)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Writes every pending entry once. Written entries are removed only if
    /// no newer timestamp arrived meanwhile; failed ones stay for the next
    /// flush.
    pub(crate) async fn flush(&self) -> usize {
        let snapshot: Vec<(String, String, i64)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().0.clone(), e.value().1))
            .collect();

        let mut written = 0;
        for (api_key_id, environment_id, last_used_at) in snapshot {
            let req = UpdateApiKeyLastUsedAtRequest {
                api_key_id: api_key_id.clone(),
                environment_id,
                last_used_at,
            };
            match self.account_client.update_api_key_last_used_at(req).await {
                Ok(_) => {
                    self.entries
                        .remove_if(&api_key_id, |_, (_, ts)| *ts == last_used_at);
                    written += 1;
                }
                Err(status) => {
                    warn!(
                        "failed to update api key last used at: api_key_id={}, status={:?}",
                        api_key_id, status
                    );
                }
            }
        }
        if written > 0 {
            debug!("flushed {} api key usage entries", written);
        }
        written
    }

    /// Consumes updates until shutdown, flushing every `flush_interval`.
    /// On shutdown the queue is drained and one final flush is attempted.
    pub(crate) async fn run(
        self: Arc<Self>,
        mut rx: mpsc::Receiver<UsageRecord>,
        mut shutdown_signal: watch::Receiver<()>,
    ) -> Result<()> {
        let mut ticker = tokio::time::interval(self.flush_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = shutdown_signal.changed() => {
                    while let Ok(record) = rx.try_recv() {
                        self.merge(record);
                    }
                    self.flush().await;
                    info!("api key usage tracker stopped");
                    return Ok(());
                }
                Some(record) = rx.recv() => {
                    self.merge(record);
                }
                _ = ticker.tick() => {
                    self.flush().await;
                }
            }
        }
    }
}

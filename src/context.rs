//! Per-request state threaded explicitly through every handler.
//!
//! [`RequestContext`] carries the inbound metadata and the caller's
//! cancellation token. A context built from a request is canceled once the
//! caller's `grpc-timeout` elapses. [`CallerIdentity`] carries the resolved
//! API key details forwarded to pass-through downstream calls.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::sync::DropGuard;
use tonic::metadata::MetadataMap;
use tracing::debug;

use crate::proto::account::EnvironmentApiKey;
use crate::Error;
use crate::Result;
use crate::AUTHORIZATION_KEY;
use crate::GRPC_TIMEOUT_KEY;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    metadata: MetadataMap,
    cancel: CancellationToken,
    /// Stops the deadline timer when the last clone is dropped
    _deadline: Option<Arc<DropGuard>>,
}

impl RequestContext {
    pub fn new(
        metadata: MetadataMap,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            metadata,
            cancel,
            _deadline: None,
        }
    }

    /// Context carrying only an `authorization` entry. Invalid header
    /// values are dropped, which surfaces later as a missing API key.
    pub fn with_api_key(api_key: &str) -> Self {
        let mut metadata = MetadataMap::new();
        if let Ok(value) = api_key.parse() {
            metadata.insert(AUTHORIZATION_KEY, value);
        }
        Self::new(metadata, CancellationToken::new())
    }

    /// Must be called inside a Tokio runtime when the request carries a
    /// `grpc-timeout`.
    pub fn from_request<T>(request: &tonic::Request<T>) -> Self {
        let metadata = request.metadata().clone();
        let cancel = CancellationToken::new();
        let deadline = metadata
            .get(GRPC_TIMEOUT_KEY)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_grpc_timeout)
            .map(|timeout| Arc::new(spawn_deadline(cancel.clone(), timeout)));
        Self {
            metadata,
            cancel,
            _deadline: deadline,
        }
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// API key from the `authorization` metadata entry. `None` when absent,
    /// empty or not valid ASCII.
    pub fn api_key(&self) -> Option<&str> {
        self.metadata
            .get(AUTHORIZATION_KEY)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    }

    /// Drives `fut` until it completes or the caller cancels, whichever
    /// comes first.
    pub async fn run<F, T>(
        &self,
        fut: F,
    ) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Error::ContextCanceled),
            res = fut => res,
        }
    }
}

/// Cancels `token` once `timeout` elapses. Dropping the returned guard
/// stops the timer.
fn spawn_deadline(
    token: CancellationToken,
    timeout: Duration,
) -> DropGuard {
    let done = CancellationToken::new();
    let stopped = done.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                debug!("request deadline of {:?} exceeded", timeout);
                token.cancel();
            }
            _ = stopped.cancelled() => {}
        }
    });
    done.drop_guard()
}

/// Parses a `grpc-timeout` value: at most 8 digits followed by one of the
/// units `H`, `M`, `S`, `m`, `u` or `n`.
pub(crate) fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if !value.is_ascii() || value.len() < 2 || value.len() > 9 {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: u64 = digits.parse().ok()?;
    let timeout = match unit {
        "H" => Duration::from_secs(n * 60 * 60),
        "M" => Duration::from_secs(n * 60),
        "S" => Duration::from_secs(n),
        "m" => Duration::from_millis(n),
        "u" => Duration::from_micros(n),
        "n" => Duration::from_nanos(n),
        _ => return None,
    };
    Some(timeout)
}

/// Identity of the API key forwarded as outgoing metadata on pass-through
/// calls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallerIdentity {
    pub api_key_token: String,
    pub maintainer: String,
    pub name: String,
}

impl CallerIdentity {
    pub fn from_env_api_key(env_api_key: &EnvironmentApiKey) -> Self {
        let (api_key_token, maintainer, name) = env_api_key
            .api_key
            .as_ref()
            .map(|k| (k.api_key.clone(), k.maintainer.clone(), k.name.clone()))
            .unwrap_or_default();
        Self {
            api_key_token,
            maintainer,
            name,
        }
    }

    /// Outgoing metadata for a downstream call made on behalf of this key.
    pub fn to_metadata(&self) -> MetadataMap {
        let mut metadata = MetadataMap::new();
        for (key, value) in [
            (crate::API_KEY_TOKEN_KEY, &self.api_key_token),
            (crate::API_KEY_MAINTAINER_KEY, &self.maintainer),
            (crate::API_KEY_NAME_KEY, &self.name),
        ] {
            if let Ok(v) = value.parse() {
                metadata.insert(key, v);
            }
        }
        metadata
    }
}

//! In-flight request deduplication by key.
//!
//! The first caller for a key starts the call; concurrent callers for the
//! same key attach to it and all of them observe the same `Result`. The
//! entry is removed once the call settles, so a later caller starts a fresh
//! call. The map lock is only held while looking up or inserting, never
//! across the call itself.

use std::future::Future;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::future::Shared;
use futures::FutureExt;
use tracing::trace;

use crate::Result;

type SharedCall<T> = Shared<BoxFuture<'static, Result<Arc<T>>>>;

pub(crate) struct FlightGroup<T> {
    calls: Arc<DashMap<String, (u64, SharedCall<T>)>>,
    next_flight_id: AtomicU64,
}

impl<T> Default for FlightGroup<T> {
    fn default() -> Self {
        Self {
            calls: Arc::new(DashMap::new()),
            next_flight_id: AtomicU64::new(0),
        }
    }
}

impl<T: Send + Sync + 'static> FlightGroup<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Runs the future produced by `f` unless a call for `key` is already
    /// in flight, in which case its outcome is awaited instead.
    ///
    /// The call is driven on its own task: a waiter that stops polling does
    /// not stall or cancel it for the others.
    pub(crate) async fn work<F, Fut>(
        &self,
        key: &str,
        f: F,
    ) -> Result<Arc<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (call, leader) = match self.calls.entry(key.to_string()) {
            Entry::Occupied(e) => {
                trace!("joining in-flight call for key: {}", key);
                (e.get().1.clone(), false)
            }
            Entry::Vacant(e) => {
                let flight_id = self.next_flight_id.fetch_add(1, Ordering::Relaxed);
                let calls = self.calls.clone();
                let owned_key = key.to_string();
                let fut = f();
                let call = async move {
                    let res = fut.await.map(Arc::new);
                    calls.remove_if(&owned_key, |_, (id, _)| *id == flight_id);
                    res
                }
                .boxed()
                .shared();
                e.insert((flight_id, call.clone()));
                (call, true)
            }
        };

        if leader {
            tokio::spawn(call.clone());
        }
        call.await
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.calls.len()
    }
}

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::error;
use tracing::info;

use crate::Result;

/// Spawns a named background task and logs how it ended.
pub(crate) fn spawn_task<Fut>(
    name: &str,
    task: Fut,
) -> JoinHandle<()>
where
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let name = name.to_string();
    tokio::spawn(async move {
        match task.await {
            Ok(()) => info!("background task {name} stopped"),
            Err(e) => error!("background task {name} stopped with error: {:?}", e),
        }
    })
}

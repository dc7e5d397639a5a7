use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;
use tonic::async_trait;

use crate::proto::event::Event;
use crate::PublishError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Publisher: Send + Sync + 'static {
    async fn publish(
        &self,
        event: Event,
    ) -> std::result::Result<(), PublishError>;

    /// Publishes a batch. The returned map holds one entry per failed event,
    /// keyed by event id; an empty map means every event was accepted.
    async fn publish_multi(
        &self,
        events: Vec<Event>,
    ) -> HashMap<String, PublishError>;
}

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Limits applied to inbound telemetry events.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventsConfig {
    /// Events older than `now - oldest` are rejected (default 31 days)
    #[serde(default = "default_oldest_event_timestamp_in_secs")]
    pub oldest_event_timestamp_in_secs: i64,

    /// Events later than `now + furthest` are rejected (default 1 hour)
    #[serde(default = "default_furthest_event_timestamp_in_secs")]
    pub furthest_event_timestamp_in_secs: i64,

    /// Upper bound for a single publisher call
    #[serde(default = "default_publish_timeout_in_ms")]
    pub publish_timeout_in_ms: u64,

    /// Pending metrics events waiting for the recorder; extra events are dropped
    #[serde(default = "default_metrics_queue_capacity")]
    pub metrics_queue_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            oldest_event_timestamp_in_secs: default_oldest_event_timestamp_in_secs(),
            furthest_event_timestamp_in_secs: default_furthest_event_timestamp_in_secs(),
            publish_timeout_in_ms: default_publish_timeout_in_ms(),
            metrics_queue_capacity: default_metrics_queue_capacity(),
        }
    }
}

impl EventsConfig {
    /// Validates event limits
    /// # Errors
    /// Returns `Error::InvalidConfig` when a window is negative or a
    /// timeout/capacity is zero
    pub fn validate(&self) -> Result<()> {
        if self.oldest_event_timestamp_in_secs < 0 || self.furthest_event_timestamp_in_secs < 0 {
            return Err(Error::InvalidConfig(format!(
                "event timestamp windows must be >= 0 (oldest: {}, furthest: {})",
                self.oldest_event_timestamp_in_secs, self.furthest_event_timestamp_in_secs
            )));
        }
        if self.publish_timeout_in_ms == 0 {
            return Err(Error::InvalidConfig("events.publish_timeout_in_ms must be > 0".into()));
        }
        if self.metrics_queue_capacity == 0 {
            return Err(Error::InvalidConfig("events.metrics_queue_capacity must be > 0".into()));
        }
        Ok(())
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_in_ms)
    }
}

fn default_oldest_event_timestamp_in_secs() -> i64 {
    744 * 60 * 60
}

fn default_furthest_event_timestamp_in_secs() -> i64 {
    60 * 60
}

fn default_publish_timeout_in_ms() -> u64 {
    20_000
}

fn default_metrics_queue_capacity() -> usize {
    1024
}

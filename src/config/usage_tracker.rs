use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UsageTrackerConfig {
    #[serde(default = "default_flush_interval_in_secs")]
    pub flush_interval_in_secs: u64,

    /// Pending last-used updates; extra updates are dropped
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for UsageTrackerConfig {
    fn default() -> Self {
        Self {
            flush_interval_in_secs: default_flush_interval_in_secs(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl UsageTrackerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.flush_interval_in_secs == 0 {
            return Err(Error::InvalidConfig(
                "usage_tracker.flush_interval_in_secs must be > 0".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(Error::InvalidConfig("usage_tracker.queue_capacity must be > 0".into()));
        }
        Ok(())
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_in_secs)
    }
}

fn default_flush_interval_in_secs() -> u64 {
    60
}

fn default_queue_capacity() -> usize {
    10_000
}

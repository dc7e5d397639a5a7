use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// In-process tier of the API key cache.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiKeyCacheConfig {
    /// Lifetime of a cached key
    #[serde(default = "default_ttl_in_secs")]
    pub ttl_in_secs: u64,

    /// How often expired keys are swept
    #[serde(default = "default_eviction_interval_in_secs")]
    pub eviction_interval_in_secs: u64,
}

impl Default for ApiKeyCacheConfig {
    fn default() -> Self {
        Self {
            ttl_in_secs: default_ttl_in_secs(),
            eviction_interval_in_secs: default_eviction_interval_in_secs(),
        }
    }
}

impl ApiKeyCacheConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ttl_in_secs == 0 {
            return Err(Error::InvalidConfig("api_key_cache.ttl_in_secs must be > 0".into()));
        }
        if self.eviction_interval_in_secs == 0 {
            return Err(Error::InvalidConfig(
                "api_key_cache.eviction_interval_in_secs must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_in_secs)
    }

    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_in_secs)
    }
}

fn default_ttl_in_secs() -> u64 {
    5 * 60
}

fn default_eviction_interval_in_secs() -> u64 {
    30
}

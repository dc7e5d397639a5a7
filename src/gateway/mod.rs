//! The gateway service: API key authorization, coalesced flag/segment
//! retrieval, the delta-sync protocol and event ingestion.
//!
//! [`GatewayService`] is assembled by [`GatewayBuilder`]. Handlers are split
//! across the submodules by RPC and all take an explicit
//! [`RequestContext`](crate::RequestContext). [`GatewayApi`] exposes them
//! with `tonic` request/response types.

mod api;
mod api_key_cache;
mod auth;
mod builder;
mod evaluations;
mod events;
mod feature_flags;
mod fetcher;
mod management;
mod metrics_events;
mod segment_users;
mod track;
mod usage_tracker;
mod validation;

pub use api::*;
pub use builder::*;

#[cfg(test)]
mod events_test;
#[cfg(test)]
mod feature_flags_test;
#[cfg(test)]
mod track_test;

use std::sync::Arc;

use tracing::debug;
use tracing::error;

use crate::flight::FlightGroup;
use crate::proto::account::EnvironmentApiKey;
use crate::proto::feature::Feature;
use crate::proto::feature::SegmentUsers;
use crate::AccountClient;
use crate::EnvironmentApiKeyCache;
use crate::Error;
use crate::Evaluator;
use crate::FeatureClient;
use crate::FeaturesCache;
use crate::Publisher;
use crate::SegmentUsersCache;
use crate::Settings;
use api_key_cache::InMemoryApiKeyCache;
use metrics_events::MetricsEventSender;
use usage_tracker::UsageTrackerHandle;

pub struct GatewayService {
    pub(crate) account_client: Arc<dyn AccountClient>,
    pub(crate) feature_client: Arc<dyn FeatureClient>,
    pub(crate) goal_publisher: Arc<dyn Publisher>,
    pub(crate) evaluation_publisher: Arc<dyn Publisher>,
    pub(crate) features_cache: Arc<dyn FeaturesCache>,
    pub(crate) segment_users_cache: Arc<dyn SegmentUsersCache>,
    pub(crate) env_api_key_cache: Arc<dyn EnvironmentApiKeyCache>,
    pub(crate) evaluator: Arc<dyn Evaluator>,

    pub(crate) in_memory_api_keys: Arc<InMemoryApiKeyCache>,
    pub(crate) api_key_flight: FlightGroup<EnvironmentApiKey>,
    pub(crate) features_flight: FlightGroup<Vec<Feature>>,
    pub(crate) segment_users_flight: FlightGroup<SegmentUsers>,

    pub(crate) usage_tracker: UsageTrackerHandle,
    pub(crate) metrics_events: MetricsEventSender,
    pub(crate) settings: Arc<Settings>,
}

impl GatewayService {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Logs a failed handler. Expected client-side failures stay at debug level.
pub(crate) fn log_handler_error(
    method: &str,
    err: &Error,
) {
    if err.is_expected() {
        debug!("{} rejected: {}", method, err);
    } else {
        error!("{} failed: {:?}", method, err);
    }
}

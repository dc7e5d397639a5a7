//! A builder for assembling a [`GatewayService`] from its collaborators.
//!
//! Every collaborator must be supplied; [`GatewayBuilder::build`] fails with
//! [`Error::InvalidConfig`] naming the first missing one. Building also
//! spawns the background tasks of the service:
//! - the API key usage tracker (flushed on an interval and on shutdown),
//! - the in-memory API key cache sweeper,
//! - the SDK metrics event recorder.
//!
//! All of them stop when the shutdown signal fires.
//!
//! ## Example
//! ```ignore
//! let (shutdown_tx, shutdown_rx) = watch::channel(());
//! let service = GatewayBuilder::new(Settings::new()?.validate()?, shutdown_rx)
//!     .account_client(account_client)
//!     .feature_client(feature_client)
//!     .goal_publisher(goal_publisher)
//!     .evaluation_publisher(evaluation_publisher)
//!     .features_cache(features_cache)
//!     .segment_users_cache(segment_users_cache)
//!     .env_api_key_cache(env_api_key_cache)
//!     .evaluator(evaluator)
//!     .start_metrics_server(shutdown_tx.subscribe())
//!     .build()?;
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::watch;
use tracing::info;

use super::api_key_cache::InMemoryApiKeyCache;
use super::metrics_events::run_metrics_recorder;
use super::metrics_events::MetricsEventSender;
use super::usage_tracker::UsageTracker;
use super::usage_tracker::UsageTrackerHandle;
use super::GatewayService;
use crate::async_task::spawn_task;
use crate::flight::FlightGroup;
use crate::metrics;
use crate::AccountClient;
use crate::EnvironmentApiKeyCache;
use crate::Error;
use crate::Evaluator;
use crate::FeatureClient;
use crate::FeaturesCache;
use crate::Publisher;
use crate::Result;
use crate::SegmentUsersCache;
use crate::Settings;

pub struct GatewayBuilder {
    settings: Settings,
    shutdown_signal: watch::Receiver<()>,

    account_client: Option<Arc<dyn AccountClient>>,
    feature_client: Option<Arc<dyn FeatureClient>>,
    goal_publisher: Option<Arc<dyn Publisher>>,
    evaluation_publisher: Option<Arc<dyn Publisher>>,
    features_cache: Option<Arc<dyn FeaturesCache>>,
    segment_users_cache: Option<Arc<dyn SegmentUsersCache>>,
    env_api_key_cache: Option<Arc<dyn EnvironmentApiKeyCache>>,
    evaluator: Option<Arc<dyn Evaluator>>,
}

impl GatewayBuilder {
    pub fn new(
        settings: Settings,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        Self {
            settings,
            shutdown_signal,
            account_client: None,
            feature_client: None,
            goal_publisher: None,
            evaluation_publisher: None,
            features_cache: None,
            segment_users_cache: None,
            env_api_key_cache: None,
            evaluator: None,
        }
    }

    pub fn account_client(
        mut self,
        account_client: Arc<dyn AccountClient>,
    ) -> Self {
        self.account_client = Some(account_client);
        self
    }

    pub fn feature_client(
        mut self,
        feature_client: Arc<dyn FeatureClient>,
    ) -> Self {
        self.feature_client = Some(feature_client);
        self
    }

    /// Publisher receiving goal events from `RegisterEvents` and `Track`
    pub fn goal_publisher(
        mut self,
        goal_publisher: Arc<dyn Publisher>,
    ) -> Self {
        self.goal_publisher = Some(goal_publisher);
        self
    }

    pub fn evaluation_publisher(
        mut self,
        evaluation_publisher: Arc<dyn Publisher>,
    ) -> Self {
        self.evaluation_publisher = Some(evaluation_publisher);
        self
    }

    pub fn features_cache(
        mut self,
        features_cache: Arc<dyn FeaturesCache>,
    ) -> Self {
        self.features_cache = Some(features_cache);
        self
    }

    pub fn segment_users_cache(
        mut self,
        segment_users_cache: Arc<dyn SegmentUsersCache>,
    ) -> Self {
        self.segment_users_cache = Some(segment_users_cache);
        self
    }

    /// Shared tier of the API key cache
    pub fn env_api_key_cache(
        mut self,
        env_api_key_cache: Arc<dyn EnvironmentApiKeyCache>,
    ) -> Self {
        self.env_api_key_cache = Some(env_api_key_cache);
        self
    }

    pub fn evaluator(
        mut self,
        evaluator: Arc<dyn Evaluator>,
    ) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Replaces the settings passed to [`GatewayBuilder::new`]
    pub fn settings(
        mut self,
        settings: Settings,
    ) -> Self {
        self.settings = settings;
        self
    }

    /// Serves `/metrics` on the configured port when monitoring is enabled.
    pub fn start_metrics_server(
        self,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        if !self.settings.monitoring.prometheus_enabled {
            return self;
        }
        let port = self.settings.monitoring.prometheus_port;
        tokio::spawn(async move {
            metrics::start_server(port, shutdown_signal).await;
        });
        self
    }

    /// Assembles the service and spawns its background tasks.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn build(self) -> Result<GatewayService> {
        let account_client = required(self.account_client, "account_client")?;
        let feature_client = required(self.feature_client, "feature_client")?;
        let goal_publisher = required(self.goal_publisher, "goal_publisher")?;
        let evaluation_publisher = required(self.evaluation_publisher, "evaluation_publisher")?;
        let features_cache = required(self.features_cache, "features_cache")?;
        let segment_users_cache = required(self.segment_users_cache, "segment_users_cache")?;
        let env_api_key_cache = required(self.env_api_key_cache, "env_api_key_cache")?;
        let evaluator = required(self.evaluator, "evaluator")?;

        let settings = Arc::new(self.settings);
        metrics::register_metrics();

        // Usage tracker
        let (usage_tx, usage_rx) = mpsc::channel(settings.usage_tracker.queue_capacity);
        let tracker = Arc::new(UsageTracker::new(
            account_client.clone(),
            settings.usage_tracker.flush_interval(),
        ));
        spawn_task(
            "api_key_usage_tracker",
            tracker.run(usage_rx, self.shutdown_signal.clone()),
        );

        // In-memory API key cache
        let in_memory_api_keys = Arc::new(InMemoryApiKeyCache::new(settings.api_key_cache.ttl()));
        spawn_task(
            "api_key_cache_eviction",
            in_memory_api_keys
                .clone()
                .run_eviction(settings.api_key_cache.eviction_interval(), self.shutdown_signal.clone()),
        );

        // Metrics events
        let (metrics_tx, metrics_rx) = mpsc::channel(settings.events.metrics_queue_capacity);
        spawn_task(
            "metrics_event_recorder",
            run_metrics_recorder(metrics_rx, self.shutdown_signal.clone()),
        );

        info!("gateway service built");
        Ok(GatewayService {
            account_client,
            feature_client,
            goal_publisher,
            evaluation_publisher,
            features_cache,
            segment_users_cache,
            env_api_key_cache,
            evaluator,
            in_memory_api_keys,
            api_key_flight: FlightGroup::new(),
            features_flight: FlightGroup::new(),
            segment_users_flight: FlightGroup::new(),
            usage_tracker: UsageTrackerHandle::new(usage_tx),
            metrics_events: MetricsEventSender::new(metrics_tx),
            settings,
        })
    }
}

fn required<T: ?Sized>(
    value: Option<Arc<T>>,
    name: &str,
) -> Result<Arc<T>> {
    value.ok_or_else(|| Error::InvalidConfig(format!("{name} is required")))
}

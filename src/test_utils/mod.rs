//! Fixtures, a deterministic evaluator and a mock-backed service harness
//! shared by the unit tests.

mod evaluator;
mod fixtures;

pub use evaluator::*;
pub use fixtures::*;

use std::sync::Arc;

use once_cell::sync::Lazy;
use tokio::sync::watch;

use crate::proto::account::EnvironmentApiKey;
use crate::proto::account::UpdateApiKeyLastUsedAtResponse;
use crate::proto::feature::Feature;
use crate::proto::feature::Features;
use crate::proto::feature::SegmentUsers;
use crate::CacheError;
use crate::Evaluator;
use crate::GatewayBuilder;
use crate::GatewayService;
use crate::MockAccountClient;
use crate::MockEnvironmentApiKeyCache;
use crate::MockFeatureClient;
use crate::MockFeaturesCache;
use crate::MockPublisher;
use crate::MockSegmentUsersCache;
use crate::Settings;

static LOGGER_INIT: Lazy<()> = Lazy::new(|| {
    env_logger::init();
});

pub fn enable_logger() {
    Lazy::force(&LOGGER_INIT);
}

/// Mocked collaborators of a [`GatewayService`]. Tests set expectations on
/// the fields and call [`MockGateway::build`].
pub struct MockGateway {
    pub account_client: MockAccountClient,
    pub feature_client: MockFeatureClient,
    pub goal_publisher: MockPublisher,
    pub evaluation_publisher: MockPublisher,
    pub features_cache: MockFeaturesCache,
    pub segment_users_cache: MockSegmentUsersCache,
    pub env_api_key_cache: MockEnvironmentApiKeyCache,
    pub evaluator: Arc<dyn Evaluator>,
    pub settings: Settings,
}

impl MockGateway {
    pub fn new() -> Self {
        enable_logger();
        let mut account_client = MockAccountClient::new();
        account_client
            .expect_update_api_key_last_used_at()
            .returning(|_| Ok(UpdateApiKeyLastUsedAtResponse {}));
        Self {
            account_client,
            feature_client: MockFeatureClient::new(),
            goal_publisher: MockPublisher::new(),
            evaluation_publisher: MockPublisher::new(),
            features_cache: MockFeaturesCache::new(),
            segment_users_cache: MockSegmentUsersCache::new(),
            env_api_key_cache: MockEnvironmentApiKeyCache::new(),
            evaluator: Arc::new(TestEvaluator),
            settings: Settings::default(),
        }
    }

    /// Resolves every token to `env_api_key` through the shared cache.
    pub fn with_api_key(
        mut self,
        env_api_key: EnvironmentApiKey,
    ) -> Self {
        self.env_api_key_cache
            .expect_get()
            .returning(move |_| Ok(env_api_key.clone()));
        self
    }

    /// Serves `features` for every environment from the features cache.
    pub fn with_cached_features(
        mut self,
        features: Vec<Feature>,
    ) -> Self {
        self.features_cache.expect_get().returning(move |env| {
            Ok(Features {
                features: features.clone(),
                id: env.to_string(),
            })
        });
        self
    }

    /// Serves the given segments from the segment users cache; others miss.
    pub fn with_cached_segments(
        mut self,
        segments: Vec<SegmentUsers>,
    ) -> Self {
        self.segment_users_cache
            .expect_get()
            .returning(move |segment_id, _| {
                segments
                    .iter()
                    .find(|s| s.segment_id == segment_id)
                    .cloned()
                    .ok_or(CacheError::NotFound)
            });
        self
    }

    /// Builder preloaded with the mocks. Setters called on it replace the
    /// corresponding mock.
    pub fn builder(self) -> (GatewayBuilder, watch::Sender<()>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(());
        let builder = GatewayBuilder::new(self.settings, shutdown_rx)
            .account_client(Arc::new(self.account_client))
            .feature_client(Arc::new(self.feature_client))
            .goal_publisher(Arc::new(self.goal_publisher))
            .evaluation_publisher(Arc::new(self.evaluation_publisher))
            .features_cache(Arc::new(self.features_cache))
            .segment_users_cache(Arc::new(self.segment_users_cache))
            .env_api_key_cache(Arc::new(self.env_api_key_cache))
            .evaluator(self.evaluator);
        (builder, shutdown_tx)
    }

    /// Builds the service. Keep the returned sender alive for the duration
    /// of the test; dropping it stops the background tasks.
    pub fn build(self) -> (GatewayService, watch::Sender<()>) {
        let (builder, shutdown_tx) = self.builder();
        (builder.build().expect("mock gateway builds"), shutdown_tx)
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

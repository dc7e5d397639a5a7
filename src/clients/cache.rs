#[cfg(test)]
use mockall::automock;
use tonic::async_trait;

use crate::proto::account::EnvironmentApiKey;
use crate::proto::feature::Features;
use crate::proto::feature::SegmentUsers;
use crate::CacheError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeaturesCache: Send + Sync + 'static {
    async fn get(
        &self,
        environment_id: &str,
    ) -> std::result::Result<Features, CacheError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SegmentUsersCache: Send + Sync + 'static {
    async fn get(
        &self,
        segment_id: &str,
        environment_id: &str,
    ) -> std::result::Result<SegmentUsers, CacheError>;
}

/// Shared (external) tier of the API key cache, keyed by token.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EnvironmentApiKeyCache: Send + Sync + 'static {
    async fn get(
        &self,
        api_key: &str,
    ) -> std::result::Result<EnvironmentApiKey, CacheError>;

    async fn put(
        &self,
        env_api_key: &EnvironmentApiKey,
    ) -> std::result::Result<(), CacheError>;
}

//! API key resolution and role checks shared by every handler.

use std::sync::Arc;

use tonic::Code;
use tracing::error;
use tracing::warn;

use super::GatewayService;
use crate::metrics::CACHE_REQUESTS_COUNTER;
use crate::metrics::CALLER_GATEWAY_SERVICE;
use crate::metrics::CODE_HIT;
use crate::metrics::CODE_MISS;
use crate::metrics::LAYER_EXTERNAL;
use crate::metrics::LAYER_IN_MEMORY;
use crate::metrics::TYPE_API_KEY;
use crate::proto::account::ApiKeyRole;
use crate::proto::account::EnvironmentApiKey;
use crate::proto::account::GetEnvironmentApiKeyRequest;
use crate::time::get_now_as_secs;
use crate::util::obfuscate_string;
use crate::AccountClient;
use crate::AuthError;
use crate::EnvironmentApiKeyCache;
use crate::Error;
use crate::RequestContext;
use crate::Result;
use crate::OBFUSCATE_VISIBLE_CHARS;

pub(crate) const SDK_CLIENT_ROLES: &[ApiKeyRole] = &[ApiKeyRole::SdkClient];
pub(crate) const SDK_SERVER_ROLES: &[ApiKeyRole] = &[ApiKeyRole::SdkServer];
pub(crate) const SDK_ROLES: &[ApiKeyRole] = &[ApiKeyRole::SdkClient, ApiKeyRole::SdkServer];
pub(crate) const PUBLIC_API_READ_ROLES: &[ApiKeyRole] = &[
    ApiKeyRole::PublicApiReadOnly,
    ApiKeyRole::PublicApiWrite,
    ApiKeyRole::PublicApiAdmin,
];
pub(crate) const PUBLIC_API_WRITE_ROLES: &[ApiKeyRole] =
    &[ApiKeyRole::PublicApiWrite, ApiKeyRole::PublicApiAdmin];

impl GatewayService {
    /// Authorizes the API key carried in the `authorization` metadata.
    pub(crate) async fn check_request(
        &self,
        ctx: &RequestContext,
        roles: &[ApiKeyRole],
    ) -> Result<Arc<EnvironmentApiKey>> {
        if ctx.is_canceled() {
            return Err(Error::ContextCanceled);
        }
        let token = ctx.api_key().ok_or(AuthError::MissingApiKey)?;
        self.authorize(ctx, token, roles).await
    }

    /// Authorizes an API key supplied in the request body rather than in
    /// metadata.
    pub(crate) async fn check_track_request(
        &self,
        ctx: &RequestContext,
        api_key: &str,
        roles: &[ApiKeyRole],
    ) -> Result<Arc<EnvironmentApiKey>> {
        if ctx.is_canceled() {
            return Err(Error::ContextCanceled);
        }
        if api_key.is_empty() {
            return Err(AuthError::MissingApiKey.into());
        }
        self.authorize(ctx, api_key, roles).await
    }

    async fn authorize(
        &self,
        ctx: &RequestContext,
        token: &str,
        roles: &[ApiKeyRole],
    ) -> Result<Arc<EnvironmentApiKey>> {
        let env_api_key = self.get_environment_api_key(ctx, token).await?;
        check_environment_api_key(&env_api_key, roles)?;
        self.usage_tracker.record(
            env_api_key.api_key_id(),
            env_api_key.environment_id(),
            get_now_as_secs(),
        );
        Ok(env_api_key)
    }

    /// In-process cache first, then one coalesced lookup per token through
    /// the shared cache and the account service.
    pub(crate) async fn get_environment_api_key(
        &self,
        ctx: &RequestContext,
        token: &str,
    ) -> Result<Arc<EnvironmentApiKey>> {
        if let Some(cached) = self.in_memory_api_keys.get(token) {
            CACHE_REQUESTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_API_KEY, LAYER_IN_MEMORY, CODE_HIT])
                .inc();
            return Ok(cached);
        }
        CACHE_REQUESTS_COUNTER
            .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_API_KEY, LAYER_IN_MEMORY, CODE_MISS])
            .inc();

        let cache = self.env_api_key_cache.clone();
        let client = self.account_client.clone();
        let owned_token = token.to_string();
        let env_api_key = ctx
            .run(self.api_key_flight.work(token, move || {
                fetch_environment_api_key(cache, client, owned_token)
            }))
            .await?;

        self.in_memory_api_keys.put(token, env_api_key.clone());
        Ok(env_api_key)
    }
}

async fn fetch_environment_api_key(
    cache: Arc<dyn EnvironmentApiKeyCache>,
    client: Arc<dyn AccountClient>,
    token: String,
) -> Result<EnvironmentApiKey> {
    match cache.get(&token).await {
        Ok(env_api_key) => {
            CACHE_REQUESTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_API_KEY, LAYER_EXTERNAL, CODE_HIT])
                .inc();
            return Ok(env_api_key);
        }
        Err(e) => {
            CACHE_REQUESTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_API_KEY, LAYER_EXTERNAL, CODE_MISS])
                .inc();
            warn!(
                "api key not found in the cache: api_key={}, err={}",
                obfuscate_string(&token, OBFUSCATE_VISIBLE_CHARS),
                e
            );
        }
    }

    let resp = client
        .get_environment_api_key(GetEnvironmentApiKeyRequest {
            api_key: token.clone(),
        })
        .await
        .map_err(|status| {
            if status.code() == Code::NotFound {
                return Error::Auth(AuthError::InvalidApiKey);
            }
            error!(
                "failed to get environment api key: api_key={}, status={:?}",
                obfuscate_string(&token, OBFUSCATE_VISIBLE_CHARS),
                status
            );
            Error::Internal
        })?;
    let env_api_key = resp.environment_api_key.ok_or(Error::Internal)?;

    if let Err(e) = cache.put(&env_api_key).await {
        warn!("failed to cache environment api key: {}", e);
    }
    Ok(env_api_key)
}

pub(crate) fn check_environment_api_key(
    env_api_key: &EnvironmentApiKey,
    roles: &[ApiKeyRole],
) -> Result<()> {
    if !roles.contains(&env_api_key.role()) {
        return Err(AuthError::BadRole.into());
    }
    if env_api_key.environment_disabled || env_api_key.is_api_key_disabled() {
        return Err(AuthError::DisabledApiKey.into());
    }
    Ok(())
}

//! Public API pass-throughs to the feature service, performed on behalf of
//! the calling API key.

use super::auth::PUBLIC_API_READ_ROLES;
use super::auth::PUBLIC_API_WRITE_ROLES;
use super::GatewayService;
use crate::proto::feature::CreateFeatureRequest;
use crate::proto::feature::CreateFeatureResponse;
use crate::proto::feature::GetFeatureRequest;
use crate::proto::feature::GetFeatureResponse;
use crate::proto::feature::ListFeaturesRequest;
use crate::proto::feature::ListFeaturesResponse;
use crate::CallerIdentity;
use crate::Error;
use crate::NotFoundError;
use crate::RequestContext;
use crate::Result;
use crate::ValidationError;

impl GatewayService {
    pub async fn get_feature(
        &self,
        ctx: &RequestContext,
        mut req: GetFeatureRequest,
    ) -> Result<GetFeatureResponse> {
        let env_api_key = self.check_request(ctx, PUBLIC_API_READ_ROLES).await?;
        if req.id.is_empty() {
            return Err(ValidationError::FeatureIdRequired.into());
        }
        req.environment_id = env_api_key.environment_id().to_string();

        let caller = CallerIdentity::from_env_api_key(&env_api_key);
        let resp = ctx
            .run(async {
                self.feature_client
                    .get_feature(&caller, req)
                    .await
                    .map_err(Error::from)
            })
            .await?;
        if resp.feature.is_none() {
            return Err(NotFoundError::Feature.into());
        }
        Ok(resp)
    }

    pub async fn list_features(
        &self,
        ctx: &RequestContext,
        mut req: ListFeaturesRequest,
    ) -> Result<ListFeaturesResponse> {
        let env_api_key = self.check_request(ctx, PUBLIC_API_READ_ROLES).await?;
        req.environment_id = env_api_key.environment_id().to_string();

        let caller = CallerIdentity::from_env_api_key(&env_api_key);
        ctx.run(async {
            self.feature_client
                .list_features_as(&caller, req)
                .await
                .map_err(Error::from)
        })
        .await
    }

    pub async fn create_feature(
        &self,
        ctx: &RequestContext,
        mut req: CreateFeatureRequest,
    ) -> Result<CreateFeatureResponse> {
        let env_api_key = self.check_request(ctx, PUBLIC_API_WRITE_ROLES).await?;
        req.environment_id = env_api_key.environment_id().to_string();

        let caller = CallerIdentity::from_env_api_key(&env_api_key);
        let resp = ctx
            .run(async {
                self.feature_client
                    .create_feature(&caller, req)
                    .await
                    .map_err(Error::from)
            })
            .await?;
        if resp.feature.is_none() {
            return Err(Error::Internal);
        }
        Ok(resp)
    }
}

#[cfg(test)]
use mockall::automock;
use tonic::async_trait;
use tonic::Status;

use crate::proto::feature::CreateFeatureRequest;
use crate::proto::feature::CreateFeatureResponse;
use crate::proto::feature::GetFeatureRequest;
use crate::proto::feature::GetFeatureResponse;
use crate::proto::feature::GetSegmentRequest;
use crate::proto::feature::GetSegmentResponse;
use crate::proto::feature::ListFeaturesRequest;
use crate::proto::feature::ListFeaturesResponse;
use crate::proto::feature::ListSegmentUsersRequest;
use crate::proto::feature::ListSegmentUsersResponse;
use crate::CallerIdentity;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeatureClient: Send + Sync + 'static {
    /// One page of features. An empty `cursor` in the request starts from
    /// the beginning.
    async fn list_features(
        &self,
        req: ListFeaturesRequest,
    ) -> std::result::Result<ListFeaturesResponse, Status>;

    async fn list_segment_users(
        &self,
        req: ListSegmentUsersRequest,
    ) -> std::result::Result<ListSegmentUsersResponse, Status>;

    async fn get_segment(
        &self,
        req: GetSegmentRequest,
    ) -> std::result::Result<GetSegmentResponse, Status>;

    async fn get_feature(
        &self,
        caller: &CallerIdentity,
        req: GetFeatureRequest,
    ) -> std::result::Result<GetFeatureResponse, Status>;

    /// Pass-through listing performed on behalf of a public API key.
    async fn list_features_as(
        &self,
        caller: &CallerIdentity,
        req: ListFeaturesRequest,
    ) -> std::result::Result<ListFeaturesResponse, Status>;

    async fn create_feature(
        &self,
        caller: &CallerIdentity,
        req: CreateFeatureRequest,
    ) -> std::result::Result<CreateFeatureResponse, Status>;
}

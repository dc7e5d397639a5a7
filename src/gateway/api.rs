//! gRPC-facing surface of the gateway.
//!
//! [`GatewayApi`] mirrors the RPCs of the gateway service with `tonic`
//! request and response types, so a generated server stub can delegate to
//! it method by method. Every call is counted in `api_requests_total` and
//! failures are logged once here.

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::log_handler_error;
use super::GatewayService;
use crate::metrics::CODE_OK;
use crate::metrics::REQUESTS_COUNTER;
use crate::proto::feature::CreateFeatureRequest;
use crate::proto::feature::CreateFeatureResponse;
use crate::proto::feature::GetFeatureRequest;
use crate::proto::feature::GetFeatureResponse;
use crate::proto::feature::ListFeaturesRequest;
use crate::proto::feature::ListFeaturesResponse;
use crate::proto::gateway::GetEvaluationRequest;
use crate::proto::gateway::GetEvaluationResponse;
use crate::proto::gateway::GetEvaluationsRequest;
use crate::proto::gateway::GetEvaluationsResponse;
use crate::proto::gateway::GetFeatureFlagsRequest;
use crate::proto::gateway::GetFeatureFlagsResponse;
use crate::proto::gateway::GetSegmentUsersRequest;
use crate::proto::gateway::GetSegmentUsersResponse;
use crate::proto::gateway::PingRequest;
use crate::proto::gateway::PingResponse;
use crate::proto::gateway::RegisterEventsRequest;
use crate::proto::gateway::RegisterEventsResponse;
use crate::proto::gateway::TrackRequest;
use crate::proto::gateway::TrackResponse;
use crate::RequestContext;
use crate::Result;

#[tonic::async_trait]
pub trait GatewayApi: Send + Sync + 'static {
    async fn ping(
        &self,
        request: Request<PingRequest>,
    ) -> std::result::Result<Response<PingResponse>, Status>;

    async fn track(
        &self,
        request: Request<TrackRequest>,
    ) -> std::result::Result<Response<TrackResponse>, Status>;

    async fn get_evaluations(
        &self,
        request: Request<GetEvaluationsRequest>,
    ) -> std::result::Result<Response<GetEvaluationsResponse>, Status>;

    async fn get_evaluation(
        &self,
        request: Request<GetEvaluationRequest>,
    ) -> std::result::Result<Response<GetEvaluationResponse>, Status>;

    async fn get_feature_flags(
        &self,
        request: Request<GetFeatureFlagsRequest>,
    ) -> std::result::Result<Response<GetFeatureFlagsResponse>, Status>;

    async fn get_segment_users(
        &self,
        request: Request<GetSegmentUsersRequest>,
    ) -> std::result::Result<Response<GetSegmentUsersResponse>, Status>;

    async fn register_events(
        &self,
        request: Request<RegisterEventsRequest>,
    ) -> std::result::Result<Response<RegisterEventsResponse>, Status>;

    async fn get_feature(
        &self,
        request: Request<GetFeatureRequest>,
    ) -> std::result::Result<Response<GetFeatureResponse>, Status>;

    async fn list_features(
        &self,
        request: Request<ListFeaturesRequest>,
    ) -> std::result::Result<Response<ListFeaturesResponse>, Status>;

    async fn create_feature(
        &self,
        request: Request<CreateFeatureRequest>,
    ) -> std::result::Result<Response<CreateFeatureResponse>, Status>;
}

#[tonic::async_trait]
impl GatewayApi for GatewayService {
    async fn ping(
        &self,
        _request: Request<PingRequest>,
    ) -> std::result::Result<Response<PingResponse>, Status> {
        respond("Ping", Ok(GatewayService::ping(self)))
    }

    async fn track(
        &self,
        request: Request<TrackRequest>,
    ) -> std::result::Result<Response<TrackResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::track(self, &ctx, request.into_inner()).await;
        respond("Track", res)
    }

    async fn get_evaluations(
        &self,
        request: Request<GetEvaluationsRequest>,
    ) -> std::result::Result<Response<GetEvaluationsResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::get_evaluations(self, &ctx, request.into_inner()).await;
        respond("GetEvaluations", res)
    }

    async fn get_evaluation(
        &self,
        request: Request<GetEvaluationRequest>,
    ) -> std::result::Result<Response<GetEvaluationResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::get_evaluation(self, &ctx, request.into_inner()).await;
        respond("GetEvaluation", res)
    }

    async fn get_feature_flags(
        &self,
        request: Request<GetFeatureFlagsRequest>,
    ) -> std::result::Result<Response<GetFeatureFlagsResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::get_feature_flags(self, &ctx, request.into_inner()).await;
        respond("GetFeatureFlags", res)
    }

    async fn get_segment_users(
        &self,
        request: Request<GetSegmentUsersRequest>,
    ) -> std::result::Result<Response<GetSegmentUsersResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::get_segment_users(self, &ctx, request.into_inner()).await;
        respond("GetSegmentUsers", res)
    }

    async fn register_events(
        &self,
        request: Request<RegisterEventsRequest>,
    ) -> std::result::Result<Response<RegisterEventsResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::register_events(self, &ctx, request.into_inner()).await;
        respond("RegisterEvents", res)
    }

    async fn get_feature(
        &self,
        request: Request<GetFeatureRequest>,
    ) -> std::result::Result<Response<GetFeatureResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::get_feature(self, &ctx, request.into_inner()).await;
        respond("GetFeature", res)
    }

    async fn list_features(
        &self,
        request: Request<ListFeaturesRequest>,
    ) -> std::result::Result<Response<ListFeaturesResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::list_features(self, &ctx, request.into_inner()).await;
        respond("ListFeatures", res)
    }

    async fn create_feature(
        &self,
        request: Request<CreateFeatureRequest>,
    ) -> std::result::Result<Response<CreateFeatureResponse>, Status> {
        let ctx = RequestContext::from_request(&request);
        let res = GatewayService::create_feature(self, &ctx, request.into_inner()).await;
        respond("CreateFeature", res)
    }
}

/// Counts the call under its status code and converts the handler result.
fn respond<T>(
    method: &str,
    res: Result<T>,
) -> std::result::Result<Response<T>, Status> {
    match res {
        Ok(resp) => {
            REQUESTS_COUNTER.with_label_values(&[method, CODE_OK]).inc();
            Ok(Response::new(resp))
        }
        Err(e) => {
            log_handler_error(method, &e);
            let status = Status::from(e);
            REQUESTS_COUNTER
                .with_label_values(&[method, &format!("{:?}", status.code())])
                .inc();
            Err(status)
        }
    }
}

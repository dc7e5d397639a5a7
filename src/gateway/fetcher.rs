//! Cache-first retrieval of features and segment users, coalesced per key.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::error;
use tracing::warn;

use super::GatewayService;
use crate::metrics::CACHE_REQUESTS_COUNTER;
use crate::metrics::CALLER_GATEWAY_SERVICE;
use crate::metrics::CODE_HIT;
use crate::metrics::CODE_MISS;
use crate::metrics::LAYER_EXTERNAL;
use crate::metrics::TYPE_FEATURES;
use crate::metrics::TYPE_SEGMENT_USERS;
use crate::proto::feature::Feature;
use crate::proto::feature::GetSegmentRequest;
use crate::proto::feature::ListFeaturesRequest;
use crate::proto::feature::ListSegmentUsersRequest;
use crate::proto::feature::SegmentUsers;
use crate::time::get_now_as_secs;
use crate::Error;
use crate::FeatureClient;
use crate::FeaturesCache;
use crate::RequestContext;
use crate::Result;
use crate::SegmentUsersCache;
use crate::SegmentUsersMap;
use crate::LIST_REQUEST_PAGE_SIZE;

impl GatewayService {
    /// Every servable feature of the environment.
    pub(crate) async fn get_features(
        &self,
        ctx: &RequestContext,
        environment_id: &str,
    ) -> Result<Arc<Vec<Feature>>> {
        let cache = self.features_cache.clone();
        let client = self.feature_client.clone();
        let env = environment_id.to_string();
        ctx.run(
            self.features_flight
                .work(environment_id, move || fetch_features(cache, client, env)),
        )
        .await
    }

    pub(crate) async fn get_segment(
        &self,
        ctx: &RequestContext,
        segment_id: &str,
        environment_id: &str,
    ) -> Result<Arc<SegmentUsers>> {
        let cache = self.segment_users_cache.clone();
        let client = self.feature_client.clone();
        let segment = segment_id.to_string();
        let env = environment_id.to_string();
        let key = segment_flight_key(environment_id, segment_id);
        ctx.run(
            self.segment_users_flight
                .work(&key, move || fetch_segment_users(cache, client, segment, env)),
        )
        .await
    }

    /// Users of every segment referenced by `features`, keyed by segment id.
    pub(crate) async fn get_segment_users_map(
        &self,
        ctx: &RequestContext,
        features: &[Feature],
        environment_id: &str,
    ) -> Result<SegmentUsersMap> {
        let segment_ids = list_segment_ids(features);
        let fetches = segment_ids
            .iter()
            .map(|id| self.get_segment(ctx, id, environment_id));
        let segments = try_join_all(fetches).await?;
        Ok(segment_ids
            .into_iter()
            .zip(segments)
            .map(|(id, s)| (id, s.users.clone()))
            .collect())
    }
}

pub(crate) fn segment_flight_key(
    environment_id: &str,
    segment_id: &str,
) -> String {
    format!("{environment_id}:{segment_id}")
}

/// Union of the segment ids referenced by `features`, in first-seen order.
pub(crate) fn list_segment_ids(features: &[Feature]) -> Vec<String> {
    let mut seen = HashSet::new();
    features
        .iter()
        .flat_map(Feature::segment_ids)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

async fn fetch_features(
    cache: Arc<dyn FeaturesCache>,
    client: Arc<dyn FeatureClient>,
    environment_id: String,
) -> Result<Vec<Feature>> {
    match cache.get(&environment_id).await {
        Ok(features) => {
            CACHE_REQUESTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_FEATURES, LAYER_EXTERNAL, CODE_HIT])
                .inc();
            return Ok(features.features);
        }
        Err(e) => {
            CACHE_REQUESTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_FEATURES, LAYER_EXTERNAL, CODE_MISS])
                .inc();
            warn!(
                "features not found in the cache: environment_id={}, err={}",
                environment_id, e
            );
        }
    }

    list_features(client.as_ref(), &environment_id).await.map_err(|e| {
        error!(
            "failed to list features: environment_id={}, err={:?}",
            environment_id, e
        );
        Error::Internal
    })
}

/// Pages through the feature service until a short or empty page.
async fn list_features(
    client: &dyn FeatureClient,
    environment_id: &str,
) -> std::result::Result<Vec<Feature>, tonic::Status> {
    let now = get_now_as_secs();
    let mut features = Vec::new();
    let mut cursor = String::new();
    loop {
        let resp = client
            .list_features(ListFeaturesRequest {
                page_size: LIST_REQUEST_PAGE_SIZE,
                cursor: cursor.clone(),
                tag: String::new(),
                environment_id: environment_id.to_string(),
            })
            .await?;
        let size = resp.features.len();
        features.extend(
            resp.features
                .into_iter()
                .filter(|f| !f.is_disabled_and_off_variation_empty())
                .filter(|f| !f.is_archived_before_last_thirty_days(now)),
        );
        if size == 0 || (size as i64) < LIST_REQUEST_PAGE_SIZE {
            return Ok(features);
        }
        cursor = resp.cursor;
    }
}

async fn fetch_segment_users(
    cache: Arc<dyn SegmentUsersCache>,
    client: Arc<dyn FeatureClient>,
    segment_id: String,
    environment_id: String,
) -> Result<SegmentUsers> {
    match cache.get(&segment_id, &environment_id).await {
        Ok(segment_users) => {
            CACHE_REQUESTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_SEGMENT_USERS, LAYER_EXTERNAL, CODE_HIT])
                .inc();
            return Ok(segment_users);
        }
        Err(e) => {
            CACHE_REQUESTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_SEGMENT_USERS, LAYER_EXTERNAL, CODE_MISS])
                .inc();
            warn!(
                "segment users not found in the cache: segment_id={}, environment_id={}, err={}",
                segment_id, environment_id, e
            );
        }
    }

    let users = client
        .list_segment_users(ListSegmentUsersRequest {
            page_size: 0,
            cursor: String::new(),
            segment_id: segment_id.clone(),
            environment_id: environment_id.clone(),
        })
        .await
        .map_err(|status| {
            error!(
                "failed to list segment users: segment_id={}, environment_id={}, status={:?}",
                segment_id, environment_id, status
            );
            Error::Internal
        })?
        .users;

    let segment = client
        .get_segment(GetSegmentRequest {
            id: segment_id.clone(),
            environment_id: environment_id.clone(),
        })
        .await
        .map_err(|status| {
            error!(
                "failed to get segment: segment_id={}, environment_id={}, status={:?}",
                segment_id, environment_id, status
            );
            Error::Internal
        })?
        .segment
        .ok_or(Error::Internal)?;

    Ok(SegmentUsers {
        segment_id,
        users,
        updated_at: segment.updated_at,
    })
}

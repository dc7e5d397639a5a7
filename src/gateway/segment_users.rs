//! `GetSegmentUsers`: delta sync of the segments referenced by the
//! environment's features.

use std::collections::HashSet;

use futures::future::try_join_all;

use super::auth::SDK_SERVER_ROLES;
use super::feature_flags::validate_sdk_request;
use super::fetcher::list_segment_ids;
use super::GatewayService;
use crate::metrics::CODE_ALL;
use crate::metrics::CODE_BAD_REQUEST;
use crate::metrics::CODE_DIFF;
use crate::metrics::CODE_INTERNAL_ERROR;
use crate::metrics::CODE_NONE;
use crate::metrics::CODE_NO_SEGMENTS;
use crate::metrics::GET_SEGMENT_USERS_COUNTER;
use crate::proto::feature::Feature;
use crate::proto::feature::SegmentUsers;
use crate::proto::gateway::GetSegmentUsersRequest;
use crate::proto::gateway::GetSegmentUsersResponse;
use crate::time::get_now_as_secs;
use crate::Error;
use crate::RequestContext;
use crate::Result;
use crate::REQUESTED_AT_ADJUSTMENT_IN_SECS;
use crate::RETENTION_WINDOW_IN_SECS;

impl GatewayService {
    pub async fn get_segment_users(
        &self,
        ctx: &RequestContext,
        req: GetSegmentUsersRequest,
    ) -> Result<GetSegmentUsersResponse> {
        let env_api_key = self.check_request(ctx, SDK_SERVER_ROLES).await?;
        let environment_id = env_api_key.environment_id();
        let count = |code: &str| {
            GET_SEGMENT_USERS_COUNTER
                .with_label_values(&[environment_id, code])
                .inc();
        };

        if let Err(e) = validate_sdk_request(req.source_id, &req.sdk_version) {
            count(CODE_BAD_REQUEST);
            return Err(e);
        }

        let res = self.list_target_segments(ctx, environment_id).await;
        let segments = match res {
            Ok(segments) => segments,
            Err(e) => {
                if !matches!(e, Error::ContextCanceled) {
                    count(CODE_INTERNAL_ERROR);
                }
                return Err(e);
            }
        };

        let now = get_now_as_secs();
        if segments.is_empty() {
            count(CODE_NO_SEGMENTS);
            return Ok(GetSegmentUsersResponse {
                segment_users: Vec::new(),
                deleted_segment_ids: Vec::new(),
                requested_at: now,
                force_update: true,
            });
        }

        if req.requested_at < now - RETENTION_WINDOW_IN_SECS {
            count(CODE_ALL);
            return Ok(GetSegmentUsersResponse {
                segment_users: segments,
                deleted_segment_ids: Vec::new(),
                requested_at: now,
                force_update: true,
            });
        }

        let (updated, deleted) = diff_segments(segments, &req.segment_ids, req.requested_at);
        count(if updated.is_empty() && deleted.is_empty() {
            CODE_NONE
        } else {
            CODE_DIFF
        });
        Ok(GetSegmentUsersResponse {
            segment_users: updated,
            deleted_segment_ids: deleted,
            requested_at: now,
            force_update: false,
        })
    }

    /// Every segment targeted by a non-archived feature of the environment.
    async fn list_target_segments(
        &self,
        ctx: &RequestContext,
        environment_id: &str,
    ) -> Result<Vec<SegmentUsers>> {
        let features = self.get_features(ctx, environment_id).await?;
        let active: Vec<Feature> = features.iter().filter(|f| !f.archived).cloned().collect();
        let segment_ids = list_segment_ids(&active);
        let fetches = segment_ids
            .iter()
            .map(|id| self.get_segment(ctx, id, environment_id));
        let segments = try_join_all(fetches).await?;
        Ok(segments.iter().map(|s| s.as_ref().clone()).collect())
    }
}

/// Segments updated since `requested_at` (minus the skew adjustment) and the
/// requested ids that are no longer targeted.
pub(crate) fn diff_segments(
    segments: Vec<SegmentUsers>,
    requested_ids: &[String],
    requested_at: i64,
) -> (Vec<SegmentUsers>, Vec<String>) {
    let targeted: HashSet<&str> = segments.iter().map(|s| s.segment_id.as_str()).collect();
    let deleted = requested_ids
        .iter()
        .filter(|id| !targeted.contains(id.as_str()))
        .cloned()
        .collect();
    let updated_since = requested_at - REQUESTED_AT_ADJUSTMENT_IN_SECS;
    let updated = segments
        .into_iter()
        .filter(|s| s.updated_at > updated_since)
        .collect();
    (updated, deleted)
}

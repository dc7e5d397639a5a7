//! `GetFeatureFlags`: fingerprint-driven delta sync of feature definitions.

use super::auth::SDK_SERVER_ROLES;
use super::GatewayService;
use crate::metrics::CODE_ALL;
use crate::metrics::CODE_BAD_REQUEST;
use crate::metrics::CODE_DIFF;
use crate::metrics::CODE_INTERNAL_ERROR;
use crate::metrics::CODE_NONE;
use crate::metrics::CODE_NO_FEATURES;
use crate::metrics::GET_FEATURE_FLAGS_COUNTER;
use crate::proto::event::SourceId;
use crate::proto::exts::filter_by_tag;
use crate::proto::feature::Feature;
use crate::proto::gateway::GetFeatureFlagsRequest;
use crate::proto::gateway::GetFeatureFlagsResponse;
use crate::time::get_now_as_secs;
use crate::Error;
use crate::RequestContext;
use crate::Result;
use crate::ValidationError;
use crate::REQUESTED_AT_ADJUSTMENT_IN_SECS;
use crate::RETENTION_WINDOW_IN_SECS;

impl GatewayService {
    pub async fn get_feature_flags(
        &self,
        ctx: &RequestContext,
        req: GetFeatureFlagsRequest,
    ) -> Result<GetFeatureFlagsResponse> {
        let env_api_key = self.check_request(ctx, SDK_SERVER_ROLES).await?;
        let environment_id = env_api_key.environment_id();
        let count = |code: &str| {
            GET_FEATURE_FLAGS_COUNTER
                .with_label_values(&[environment_id, req.tag.as_str(), code])
                .inc();
        };

        if let Err(e) = validate_sdk_request(req.source_id, &req.sdk_version) {
            count(CODE_BAD_REQUEST);
            return Err(e);
        }

        let features = match self.get_features(ctx, environment_id).await {
            Ok(features) => features,
            Err(e) => {
                if !matches!(e, Error::ContextCanceled) {
                    count(CODE_INTERNAL_ERROR);
                }
                return Err(e);
            }
        };
        let features = if req.tag.is_empty() {
            features.to_vec()
        } else {
            filter_by_tag(&features, &req.tag)
        };

        let now = get_now_as_secs();
        if features.is_empty() {
            count(CODE_NO_FEATURES);
            return Ok(GetFeatureFlagsResponse {
                feature_flags_id: String::new(),
                features: Vec::new(),
                archived_feature_flag_ids: Vec::new(),
                requested_at: now,
                force_update: false,
            });
        }

        let active: Vec<Feature> = features.iter().filter(|f| !f.archived).cloned().collect();
        let feature_flags_id = self.evaluator.generate_features_id(&active);
        if req.feature_flags_id == feature_flags_id {
            count(CODE_NONE);
            return Ok(GetFeatureFlagsResponse {
                feature_flags_id,
                features: Vec::new(),
                archived_feature_flag_ids: Vec::new(),
                requested_at: now,
                force_update: false,
            });
        }

        if req.feature_flags_id.is_empty() || req.requested_at < now - RETENTION_WINDOW_IN_SECS {
            count(CODE_ALL);
            return Ok(GetFeatureFlagsResponse {
                feature_flags_id,
                features: active,
                archived_feature_flag_ids: Vec::new(),
                requested_at: now,
                force_update: true,
            });
        }

        let (updated, archived_ids) = diff_features(features, req.requested_at, now);
        count(CODE_DIFF);
        Ok(GetFeatureFlagsResponse {
            feature_flags_id,
            features: updated,
            archived_feature_flag_ids: archived_ids,
            requested_at: now,
            force_update: false,
        })
    }
}

/// Splits `features` into those updated since `requested_at` (minus the
/// skew adjustment) and the ids of those archived inside the retention
/// window.
pub(crate) fn diff_features(
    features: Vec<Feature>,
    requested_at: i64,
    now: i64,
) -> (Vec<Feature>, Vec<String>) {
    let updated_since = requested_at - REQUESTED_AT_ADJUSTMENT_IN_SECS;
    let archived_since = now - RETENTION_WINDOW_IN_SECS;
    let mut updated = Vec::new();
    let mut archived_ids = Vec::new();
    for f in features {
        if f.archived {
            if f.updated_at > archived_since {
                archived_ids.push(f.id);
            }
            continue;
        }
        if f.updated_at > updated_since {
            updated.push(f);
        }
    }
    (updated, archived_ids)
}

/// Server-side SDK requests must identify themselves.
pub(crate) fn validate_sdk_request(
    source_id: i32,
    sdk_version: &str,
) -> Result<()> {
    if SourceId::try_from(source_id).unwrap_or(SourceId::Unknown) == SourceId::Unknown {
        return Err(ValidationError::SourceIdRequired.into());
    }
    if sdk_version.is_empty() {
        return Err(ValidationError::SdkVersionRequired.into());
    }
    Ok(())
}

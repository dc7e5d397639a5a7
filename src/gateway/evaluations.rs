//! `GetEvaluations` and `GetEvaluation`: server-side evaluation for client
//! SDKs.

use tracing::error;

use super::auth::SDK_CLIENT_ROLES;
use super::GatewayService;
use crate::metrics::CODE_ALL;
use crate::metrics::CODE_BAD_REQUEST;
use crate::metrics::CODE_DIFF;
use crate::metrics::CODE_INTERNAL_ERROR;
use crate::metrics::CODE_NONE;
use crate::metrics::CODE_NO_FEATURES;
use crate::metrics::CODE_OLD;
use crate::metrics::EVALUATIONS_COUNTER;
use crate::proto::account::EnvironmentApiKey;
use crate::proto::exts::filter_by_tag;
use crate::proto::feature::Feature;
use crate::proto::feature::UserEvaluations;
use crate::proto::feature::UserEvaluationsState;
use crate::proto::gateway::GetEvaluationRequest;
use crate::proto::gateway::GetEvaluationResponse;
use crate::proto::gateway::GetEvaluationsRequest;
use crate::proto::gateway::GetEvaluationsResponse;
use crate::proto::user::User;
use crate::time::get_now_as_secs;
use crate::Error;
use crate::NotFoundError;
use crate::RequestContext;
use crate::Result;
use crate::ValidationError;
use crate::NO_EVALUATIONS_ID;

impl GatewayService {
    pub async fn get_evaluations(
        &self,
        ctx: &RequestContext,
        req: GetEvaluationsRequest,
    ) -> Result<GetEvaluationsResponse> {
        let env_api_key = self.check_request(ctx, SDK_CLIENT_ROLES).await?;
        let count = |code: &str| count_evaluation(&env_api_key, &req.tag, code);

        let user = match validate_get_evaluations_request(&req) {
            Ok(user) => user,
            Err(e) => {
                count(CODE_BAD_REQUEST);
                return Err(e);
            }
        };

        let features = self
            .get_features(ctx, env_api_key.environment_id())
            .await
            .inspect_err(|e| {
                if !matches!(e, Error::ContextCanceled) {
                    count(CODE_INTERNAL_ERROR);
                }
            })?;

        if features.is_empty() {
            count(CODE_NO_FEATURES);
            return Ok(GetEvaluationsResponse {
                state: UserEvaluationsState::Full as i32,
                evaluations: Some(UserEvaluations {
                    id: NO_EVALUATIONS_ID.to_string(),
                    evaluations: Vec::new(),
                    created_at: get_now_as_secs(),
                    archived_feature_ids: Vec::new(),
                    force_update: false,
                }),
                user_evaluations_id: NO_EVALUATIONS_ID.to_string(),
            });
        }

        // The id covers tagged flags only; the evaluator applies the tag itself.
        let tagged = if req.tag.is_empty() {
            features.to_vec()
        } else {
            filter_by_tag(&features, &req.tag)
        };
        let ueid = self
            .evaluator
            .user_evaluations_id(&user.id, &user.data, &tagged);
        if req.user_evaluations_id == ueid {
            count(CODE_NONE);
            return Ok(GetEvaluationsResponse {
                state: UserEvaluationsState::Full as i32,
                evaluations: Some(UserEvaluations {
                    id: ueid.clone(),
                    evaluations: Vec::new(),
                    created_at: get_now_as_secs(),
                    archived_feature_ids: Vec::new(),
                    force_update: false,
                }),
                user_evaluations_id: ueid,
            });
        }

        let segment_users = self
            .get_segment_users_map(ctx, &features, env_api_key.environment_id())
            .await
            .inspect_err(|e| {
                if !matches!(e, Error::ContextCanceled) {
                    count(CODE_INTERNAL_ERROR);
                }
            })?;

        let res = match req.user_evaluation_condition {
            Some(cond) => self.evaluator.evaluate_features_by_evaluated_at(
                &features,
                user,
                &segment_users,
                &req.user_evaluations_id,
                cond.evaluated_at,
                cond.user_attributes_updated,
                &req.tag,
            ),
            None => self
                .evaluator
                .evaluate_features(&features, user, &segment_users, &req.tag),
        };
        let evaluations = res.map_err(|e| {
            error!(
                "failed to evaluate: environment_id={}, user_id={}, err={}",
                env_api_key.environment_id(),
                user.id,
                e
            );
            count(CODE_INTERNAL_ERROR);
            Error::Internal
        })?;

        count(match (&req.user_evaluation_condition, evaluations.force_update) {
            (None, _) => CODE_OLD,
            (Some(_), true) => CODE_ALL,
            (Some(_), false) => CODE_DIFF,
        });
        Ok(GetEvaluationsResponse {
            state: UserEvaluationsState::Full as i32,
            user_evaluations_id: ueid,
            evaluations: Some(evaluations),
        })
    }

    pub async fn get_evaluation(
        &self,
        ctx: &RequestContext,
        req: GetEvaluationRequest,
    ) -> Result<GetEvaluationResponse> {
        let env_api_key = self.check_request(ctx, SDK_CLIENT_ROLES).await?;
        let user = validate_get_evaluation_request(&req)?;

        let features = self.get_features(ctx, env_api_key.environment_id()).await?;
        let features: Vec<Feature> = features.iter().filter(|f| !f.archived).cloned().collect();
        let target = features
            .iter()
            .find(|f| f.id == req.feature_id)
            .ok_or(NotFoundError::Feature)?;

        let evaluated = if target.prerequisites.is_empty() {
            vec![target.clone()]
        } else {
            self.evaluator
                .get_prerequisite_downwards(std::slice::from_ref(target), &features)
                .map_err(|e| {
                    error!(
                        "failed to resolve prerequisites: feature_id={}, err={}",
                        target.id, e
                    );
                    Error::Internal
                })?
        };

        let segment_users = self
            .get_segment_users_map(ctx, &evaluated, env_api_key.environment_id())
            .await?;
        let evaluations = self
            .evaluator
            .evaluate_features(&evaluated, user, &segment_users, &req.tag)
            .map_err(|e| {
                error!(
                    "failed to evaluate: feature_id={}, user_id={}, err={}",
                    req.feature_id, user.id, e
                );
                Error::Internal
            })?;

        let evaluation = evaluations
            .evaluations
            .into_iter()
            .find(|e| e.feature_id == req.feature_id)
            .ok_or(NotFoundError::Evaluation)?;
        count_evaluation(&env_api_key, &req.tag, CODE_ALL);
        Ok(GetEvaluationResponse {
            evaluation: Some(evaluation),
        })
    }

}

fn count_evaluation(
    env_api_key: &EnvironmentApiKey,
    tag: &str,
    code: &str,
) {
    EVALUATIONS_COUNTER
        .with_label_values(&[
            env_api_key.project_id.as_str(),
            env_api_key.project_url_code.as_str(),
            env_api_key.environment_id(),
            env_api_key.environment_url_code(),
            tag,
            code,
        ])
        .inc();
}

/// The tag is optional only on the conditional path.
fn validate_get_evaluations_request(req: &GetEvaluationsRequest) -> Result<&User> {
    if req.user_evaluation_condition.is_none() && req.tag.is_empty() {
        return Err(ValidationError::TagRequired.into());
    }
    validate_user(req.user.as_ref())
}

fn validate_get_evaluation_request(req: &GetEvaluationRequest) -> Result<&User> {
    if req.tag.is_empty() {
        return Err(ValidationError::TagRequired.into());
    }
    let user = validate_user(req.user.as_ref())?;
    if req.feature_id.is_empty() {
        return Err(ValidationError::FeatureIdRequired.into());
    }
    Ok(user)
}

fn validate_user(user: Option<&User>) -> Result<&User> {
    let user = user.ok_or(ValidationError::UserRequired)?;
    if user.id.is_empty() {
        return Err(ValidationError::UserIdRequired.into());
    }
    Ok(user)
}

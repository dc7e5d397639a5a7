use std::collections::HashMap;

#[cfg(test)]
use mockall::automock;

use crate::proto::feature::Feature;
use crate::proto::feature::SegmentUser;
use crate::proto::feature::UserEvaluations;
use crate::proto::user::User;
use crate::EvaluatorError;

/// Segment id to the users included in or excluded from it.
pub type SegmentUsersMap = HashMap<String, Vec<SegmentUser>>;

/// Flag evaluation engine. Pure computation, no I/O.
#[cfg_attr(test, automock)]
pub trait Evaluator: Send + Sync + 'static {
    /// Evaluates every feature for `user`.
    fn evaluate_features(
        &self,
        features: &[Feature],
        user: &User,
        segment_users: &SegmentUsersMap,
        tag: &str,
    ) -> std::result::Result<UserEvaluations, EvaluatorError>;

    /// Evaluates only what changed since `evaluated_at` for a client holding
    /// `prev_user_evaluations_id`.
    #[allow(clippy::too_many_arguments)]
    fn evaluate_features_by_evaluated_at(
        &self,
        features: &[Feature],
        user: &User,
        segment_users: &SegmentUsersMap,
        prev_user_evaluations_id: &str,
        evaluated_at: i64,
        user_attributes_updated: bool,
        tag: &str,
    ) -> std::result::Result<UserEvaluations, EvaluatorError>;

    /// `targets` plus every feature they transitively depend on.
    fn get_prerequisite_downwards(
        &self,
        targets: &[Feature],
        all: &[Feature],
    ) -> std::result::Result<Vec<Feature>, EvaluatorError>;

    fn user_evaluations_id(
        &self,
        user_id: &str,
        user_data: &HashMap<String, String>,
        features: &[Feature],
    ) -> String;

    fn generate_features_id(
        &self,
        features: &[Feature],
    ) -> String;
}

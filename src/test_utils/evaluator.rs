use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::hash::Hash;
use std::hash::Hasher;

use crate::proto::feature::Evaluation;
use crate::proto::feature::Feature;
use crate::proto::feature::Reason;
use crate::proto::feature::ReasonType;
use crate::proto::feature::UserEvaluations;
use crate::proto::user::User;
use crate::time::get_now_as_secs;
use crate::Evaluator;
use crate::EvaluatorError;
use crate::SegmentUsersMap;

/// Deterministic evaluator: ids are hashes of the inputs and every feature
/// evaluates to its first variation. Archived flags are reported by id and
/// a non-empty tag keeps only the evaluations of flags carrying it.
pub struct TestEvaluator;

fn evaluate_all(
    features: &[Feature],
    user: &User,
    tag: &str,
) -> (Vec<Evaluation>, Vec<String>) {
    let mut evaluations = Vec::new();
    let mut archived_feature_ids = Vec::new();
    for f in features {
        if f.archived {
            archived_feature_ids.push(f.id.clone());
            continue;
        }
        if !tag.is_empty() && !f.has_tag(tag) {
            continue;
        }
        evaluations.push(evaluate(f, user));
    }
    (evaluations, archived_feature_ids)
}

fn hash_features(
    hasher: &mut DefaultHasher,
    features: &[Feature],
) {
    for f in features {
        f.id.hash(hasher);
        f.version.hash(hasher);
    }
}

fn evaluate(
    feature: &Feature,
    user: &User,
) -> Evaluation {
    let variation_id = feature
        .variations
        .first()
        .map(|v| v.id.clone())
        .unwrap_or_default();
    Evaluation {
        id: format!("{}:{}:{}", feature.id, feature.version, user.id),
        feature_id: feature.id.clone(),
        feature_version: feature.version,
        user_id: user.id.clone(),
        variation_id,
        reason: Some(Reason {
            r#type: ReasonType::Default as i32,
            rule_id: String::new(),
        }),
        ..Default::default()
    }
}

impl Evaluator for TestEvaluator {
    fn evaluate_features(
        &self,
        features: &[Feature],
        user: &User,
        _segment_users: &SegmentUsersMap,
        tag: &str,
    ) -> Result<UserEvaluations, EvaluatorError> {
        let (evaluations, archived_feature_ids) = evaluate_all(features, user, tag);
        Ok(UserEvaluations {
            id: self.user_evaluations_id(&user.id, &user.data, features),
            evaluations,
            created_at: get_now_as_secs(),
            archived_feature_ids,
            force_update: true,
        })
    }

    fn evaluate_features_by_evaluated_at(
        &self,
        features: &[Feature],
        user: &User,
        segment_users: &SegmentUsersMap,
        prev_user_evaluations_id: &str,
        evaluated_at: i64,
        user_attributes_updated: bool,
        tag: &str,
    ) -> Result<UserEvaluations, EvaluatorError> {
        if prev_user_evaluations_id.is_empty() || user_attributes_updated {
            return self.evaluate_features(features, user, segment_users, tag);
        }
        let updated: Vec<Feature> = features
            .iter()
            .filter(|f| f.updated_at > evaluated_at)
            .cloned()
            .collect();
        let (evaluations, archived_feature_ids) = evaluate_all(&updated, user, tag);
        Ok(UserEvaluations {
            id: self.user_evaluations_id(&user.id, &user.data, features),
            evaluations,
            created_at: get_now_as_secs(),
            archived_feature_ids,
            force_update: false,
        })
    }

    fn get_prerequisite_downwards(
        &self,
        targets: &[Feature],
        all: &[Feature],
    ) -> Result<Vec<Feature>, EvaluatorError> {
        let by_id: HashMap<&str, &Feature> = all.iter().map(|f| (f.id.as_str(), f)).collect();
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        let mut queue: VecDeque<&Feature> = targets.iter().collect();
        while let Some(f) = queue.pop_front() {
            if !seen.insert(f.id.clone()) {
                continue;
            }
            result.push(f.clone());
            for id in f.feature_ids_depends_on() {
                let dep = by_id
                    .get(id.as_str())
                    .ok_or_else(|| EvaluatorError(format!("prerequisite {id} not found")))?;
                queue.push_back(dep);
            }
        }
        Ok(result)
    }

    fn user_evaluations_id(
        &self,
        user_id: &str,
        user_data: &HashMap<String, String>,
        features: &[Feature],
    ) -> String {
        let mut hasher = DefaultHasher::new();
        user_id.hash(&mut hasher);
        user_data
            .iter()
            .collect::<BTreeMap<_, _>>()
            .hash(&mut hasher);
        hash_features(&mut hasher, features);
        format!("{:x}", hasher.finish())
    }

    fn generate_features_id(
        &self,
        features: &[Feature],
    ) -> String {
        let mut hasher = DefaultHasher::new();
        hash_features(&mut hasher, features);
        format!("{:x}", hasher.finish())
    }
}

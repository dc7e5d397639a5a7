use std::collections::HashSet;

use crate::proto::feature::ClauseOperator;
use crate::proto::feature::Feature;
use crate::RETENTION_WINDOW_IN_SECS;

impl Feature {
    /// A disabled flag without an off variation has nothing to serve.
    pub fn is_disabled_and_off_variation_empty(&self) -> bool {
        !self.enabled && self.off_variation.is_empty()
    }

    pub fn is_archived_before_last_thirty_days(
        &self,
        now: i64,
    ) -> bool {
        self.archived && self.updated_at < now - RETENTION_WINDOW_IN_SECS
    }

    pub fn has_tag(
        &self,
        tag: &str,
    ) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Segment ids referenced by `SEGMENT` clauses, deduplicated in
    /// first-seen order.
    pub fn segment_ids(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for rule in &self.rules {
            for clause in &rule.clauses {
                if clause.operator != ClauseOperator::Segment as i32 {
                    continue;
                }
                for value in &clause.values {
                    if seen.insert(value.as_str()) {
                        ids.push(value.clone());
                    }
                }
            }
        }
        ids
    }

    pub fn feature_ids_depends_on(&self) -> Vec<String> {
        self.prerequisites.iter().map(|p| p.feature_id.clone()).collect()
    }
}

/// Keeps the features carrying `tag`.
pub(crate) fn filter_by_tag(
    features: &[Feature],
    tag: &str,
) -> Vec<Feature> {
    features.iter().filter(|f| f.has_tag(tag)).cloned().collect()
}

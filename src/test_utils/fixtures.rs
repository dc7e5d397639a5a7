use std::collections::HashMap;

use crate::proto::account::ApiKey;
use crate::proto::account::ApiKeyRole;
use crate::proto::account::Environment;
use crate::proto::account::EnvironmentApiKey;
use crate::proto::event::Any;
use crate::proto::event::EvaluationEvent;
use crate::proto::event::Event;
use crate::proto::event::GoalEvent;
use crate::proto::feature::Clause;
use crate::proto::feature::ClauseOperator;
use crate::proto::feature::Feature;
use crate::proto::feature::Prerequisite;
use crate::proto::feature::Reason;
use crate::proto::feature::ReasonType;
use crate::proto::feature::Rule;
use crate::proto::feature::SegmentUser;
use crate::proto::feature::SegmentUsers;
use crate::proto::feature::Variation;
use crate::proto::user::User;
use crate::time::get_now_as_secs;
use crate::RequestContext;

pub const TEST_TOKEN: &str = "sdk-token-0123456789";
pub const TEST_ENV: &str = "env-1";
pub const TEST_PROJECT: &str = "project-1";
pub const TEST_SDK_VERSION: &str = "1.0.0";

pub fn env_api_key(
    environment_id: &str,
    role: ApiKeyRole,
) -> EnvironmentApiKey {
    EnvironmentApiKey {
        api_key: Some(ApiKey {
            id: "api-key-id".to_string(),
            name: "api-key-name".to_string(),
            role: role as i32,
            disabled: false,
            api_key: TEST_TOKEN.to_string(),
            maintainer: "dev@example.com".to_string(),
            ..Default::default()
        }),
        environment_disabled: false,
        project_id: TEST_PROJECT.to_string(),
        environment: Some(Environment {
            id: environment_id.to_string(),
            url_code: format!("{environment_id}-code"),
            project_id: TEST_PROJECT.to_string(),
            ..Default::default()
        }),
        project_url_code: "project-code".to_string(),
    }
}

pub fn ctx() -> RequestContext {
    RequestContext::with_api_key(TEST_TOKEN)
}

/// Enabled feature with two variations, last updated an hour ago.
pub fn feature(id: &str) -> Feature {
    Feature {
        id: id.to_string(),
        name: id.to_string(),
        enabled: true,
        version: 1,
        updated_at: get_now_as_secs() - 3600,
        variations: vec![
            Variation {
                id: format!("{id}-on"),
                value: "true".to_string(),
                ..Default::default()
            },
            Variation {
                id: format!("{id}-off"),
                value: "false".to_string(),
                ..Default::default()
            },
        ],
        off_variation: format!("{id}-off"),
        ..Default::default()
    }
}

pub fn tagged_feature(
    id: &str,
    tag: &str,
) -> Feature {
    let mut f = feature(id);
    f.tags = vec![tag.to_string()];
    f
}

pub fn archived_feature(
    id: &str,
    updated_at: i64,
) -> Feature {
    let mut f = feature(id);
    f.archived = true;
    f.updated_at = updated_at;
    f
}

pub fn feature_with_segments(
    id: &str,
    segment_ids: &[&str],
) -> Feature {
    let mut f = feature(id);
    f.rules = vec![Rule {
        id: format!("{id}-rule"),
        strategy: None,
        clauses: vec![Clause {
            id: format!("{id}-clause"),
            attribute: String::new(),
            operator: ClauseOperator::Segment as i32,
            values: segment_ids.iter().map(|s| s.to_string()).collect(),
        }],
    }];
    f
}

pub fn feature_with_prerequisites(
    id: &str,
    depends_on: &[&str],
) -> Feature {
    let mut f = feature(id);
    f.prerequisites = depends_on
        .iter()
        .map(|p| Prerequisite {
            feature_id: p.to_string(),
            variation_id: format!("{p}-on"),
        })
        .collect();
    f
}

pub fn segment_users(
    segment_id: &str,
    updated_at: i64,
) -> SegmentUsers {
    SegmentUsers {
        segment_id: segment_id.to_string(),
        users: vec![SegmentUser {
            id: format!("{segment_id}-user-1"),
            segment_id: segment_id.to_string(),
            user_id: "user-1".to_string(),
            ..Default::default()
        }],
        updated_at,
    }
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        data: HashMap::from([("country".to_string(), "jp".to_string())]),
        ..Default::default()
    }
}

pub fn goal_event(timestamp: i64) -> GoalEvent {
    GoalEvent {
        timestamp,
        goal_id: "goal-1".to_string(),
        user_id: "user-1".to_string(),
        value: 1.0,
        user: Some(user("user-1")),
        tag: "ios".to_string(),
        ..Default::default()
    }
}

pub fn evaluation_event(timestamp: i64) -> EvaluationEvent {
    EvaluationEvent {
        timestamp,
        feature_id: "feature-1".to_string(),
        feature_version: 1,
        user_id: "user-1".to_string(),
        variation_id: "feature-1-on".to_string(),
        user: Some(user("user-1")),
        reason: Some(Reason {
            r#type: ReasonType::Default as i32,
            rule_id: String::new(),
        }),
        tag: "ios".to_string(),
        ..Default::default()
    }
}

/// Event wrapping `payload` with a fixed, valid UUID suffix.
pub fn event(
    n: u8,
    payload: Any,
) -> Event {
    Event {
        id: format!("5f0e1c2a-3b4d-4e5f-8a9b-0c1d2e3f40{n:02x}"),
        event: Some(payload),
        environment_id: String::new(),
    }
}

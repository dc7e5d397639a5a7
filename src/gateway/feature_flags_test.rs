use super::feature_flags::diff_features;
use crate::proto::account::ApiKeyRole;
use crate::proto::event::SourceId;
use crate::proto::feature::Feature;
use crate::proto::gateway::GetFeatureFlagsRequest;
use crate::test_utils::archived_feature;
use crate::test_utils::ctx;
use crate::test_utils::env_api_key;
use crate::test_utils::feature;
use crate::test_utils::tagged_feature;
use crate::test_utils::MockGateway;
use crate::test_utils::TEST_ENV;
use crate::test_utils::TEST_SDK_VERSION;
use crate::time::get_now_as_secs;
use crate::AuthError;
use crate::Error;
use crate::ValidationError;
use crate::RETENTION_WINDOW_IN_SECS;

fn request(
    feature_flags_id: &str,
    requested_at: i64,
) -> GetFeatureFlagsRequest {
    GetFeatureFlagsRequest {
        tag: String::new(),
        feature_flags_id: feature_flags_id.to_string(),
        requested_at,
        source_id: SourceId::GoServer as i32,
        sdk_version: TEST_SDK_VERSION.to_string(),
    }
}

fn ids(features: &[Feature]) -> Vec<&str> {
    features.iter().map(|f| f.id.as_str()).collect()
}

fn server_gateway(features: Vec<Feature>) -> MockGateway {
    MockGateway::new()
        .with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkServer))
        .with_cached_features(features)
}

#[tokio::test]
async fn test_first_sync_returns_full_set_then_no_change() {
    let (service, _shutdown) = server_gateway(vec![feature("f1"), feature("f2")]).build();
    let now = get_now_as_secs();

    let first = service.get_feature_flags(&ctx(), request("", 0)).await.unwrap();
    assert!(first.force_update);
    assert!(!first.feature_flags_id.is_empty());
    assert_eq!(ids(&first.features), vec!["f1", "f2"]);
    assert!(first.requested_at >= now);

    let second = service
        .get_feature_flags(&ctx(), request(&first.feature_flags_id, first.requested_at))
        .await
        .unwrap();
    assert!(!second.force_update);
    assert!(second.features.is_empty());
    assert!(second.archived_feature_flag_ids.is_empty());
    assert_eq!(second.feature_flags_id, first.feature_flags_id);
}

#[tokio::test]
async fn test_stale_client_is_forced_into_full_resync() {
    let now = get_now_as_secs();
    let (service, _shutdown) = server_gateway(vec![
        feature("f1"),
        feature("f2"),
        archived_feature("gone", now - 100),
    ])
    .build();

    let resp = service
        .get_feature_flags(&ctx(), request("outdated-id", now - 31 * 24 * 60 * 60))
        .await
        .unwrap();

    assert!(resp.force_update);
    assert_eq!(ids(&resp.features), vec!["f1", "f2"]);
    assert!(resp.archived_feature_flag_ids.is_empty());
}

#[tokio::test]
async fn test_archived_flags_do_not_affect_fingerprint() {
    let now = get_now_as_secs();
    let (plain, _s1) = server_gateway(vec![feature("f1"), feature("f2")]).build();
    let (with_archived, _s2) = server_gateway(vec![
        feature("f1"),
        archived_feature("gone", now - 100),
        feature("f2"),
    ])
    .build();

    let a = plain.get_feature_flags(&ctx(), request("", 0)).await.unwrap();
    let b = with_archived.get_feature_flags(&ctx(), request("", 0)).await.unwrap();
    assert_eq!(a.feature_flags_id, b.feature_flags_id);
}

#[tokio::test]
async fn test_diff_returns_updated_features_and_recent_archives() {
    let now = get_now_as_secs();
    let mut fresh = feature("fresh");
    fresh.updated_at = now - 5;
    fresh.version = 2;
    let (service, _shutdown) = server_gateway(vec![
        feature("unchanged"),
        fresh,
        archived_feature("recently-archived", now - 100),
        archived_feature("long-archived", now - RETENTION_WINDOW_IN_SECS - 100),
    ])
    .build();

    let resp = service
        .get_feature_flags(&ctx(), request("previous-id", now - 60))
        .await
        .unwrap();

    assert!(!resp.force_update);
    assert_eq!(ids(&resp.features), vec!["fresh"]);
    assert_eq!(resp.archived_feature_flag_ids, vec!["recently-archived".to_string()]);
}

#[tokio::test]
async fn test_no_features_for_tag_returns_empty_response() {
    let (service, _shutdown) = server_gateway(vec![tagged_feature("f1", "ios")]).build();
    let mut req = request("previous-id", 0);
    req.tag = "web".to_string();

    let resp = service.get_feature_flags(&ctx(), req).await.unwrap();
    assert_eq!(resp.feature_flags_id, "");
    assert!(resp.features.is_empty());
    assert!(!resp.force_update);
    assert!(resp.requested_at > 0);
}

#[tokio::test]
async fn test_tag_filter_applies_before_fingerprint() {
    let (service, _shutdown) =
        server_gateway(vec![tagged_feature("f1", "ios"), tagged_feature("f2", "web")]).build();
    let mut req = request("", 0);
    req.tag = "web".to_string();

    let resp = service.get_feature_flags(&ctx(), req).await.unwrap();
    assert_eq!(ids(&resp.features), vec!["f2"]);
}

#[tokio::test]
async fn test_sdk_identification_is_required() {
    let (service, _shutdown) = MockGateway::new()
        .with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkServer))
        .build();

    let mut req = request("", 0);
    req.source_id = SourceId::Unknown as i32;
    let err = service.get_feature_flags(&ctx(), req).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::SourceIdRequired)));

    let mut req = request("", 0);
    req.sdk_version.clear();
    let err = service.get_feature_flags(&ctx(), req).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::SdkVersionRequired)));
}

#[tokio::test]
async fn test_client_key_is_rejected() {
    let (service, _shutdown) = MockGateway::new()
        .with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkClient))
        .build();

    let err = service.get_feature_flags(&ctx(), request("", 0)).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::BadRole)));
}

#[test]
fn test_diff_features_adjustment_boundary() {
    let now = 1_700_000_000;
    let requested_at = now - 600;
    let mut at_boundary = feature("at-boundary");
    at_boundary.updated_at = requested_at - 10;
    let mut inside = feature("inside");
    inside.updated_at = requested_at - 9;

    let (updated, archived) = diff_features(vec![at_boundary, inside], requested_at, now);
    assert_eq!(ids(&updated), vec!["inside"]);
    assert!(archived.is_empty());
}

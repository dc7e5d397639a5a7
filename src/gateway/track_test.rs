use super::track::publish_failure_code;
use crate::metrics::CALLER_GATEWAY_SERVICE;
use crate::metrics::CODE_NON_REPEATABLE_ERROR;
use crate::metrics::CODE_REPEATABLE_ERROR;
use crate::metrics::REGISTER_EVENTS_COUNTER;
use crate::metrics::TYPE_TRACK;
use crate::proto::account::ApiKeyRole;
use crate::proto::event::GoalEvent;
use crate::proto::exts::AnyExt;
use crate::proto::gateway::TrackRequest;
use crate::test_utils::env_api_key;
use crate::test_utils::MockGateway;
use crate::test_utils::TEST_ENV;
use crate::test_utils::TEST_TOKEN;
use crate::time::get_now_as_secs;
use crate::AuthError;
use crate::Error;
use crate::PublishError;
use crate::RequestContext;
use crate::ValidationError;

fn request(timestamp: i64) -> TrackRequest {
    TrackRequest {
        apikey: TEST_TOKEN.to_string(),
        userid: "user-1".to_string(),
        goalid: "goal-1".to_string(),
        tag: "web".to_string(),
        timestamp,
        value: 12.5,
    }
}

#[tokio::test]
async fn test_track_publishes_goal_event() {
    let now = get_now_as_secs();
    let mut gateway = MockGateway::new().with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkClient));
    gateway
        .goal_publisher
        .expect_publish()
        .times(1)
        .returning(move |event| {
            assert_eq!(event.environment_id, TEST_ENV);
            assert!(uuid::Uuid::parse_str(&event.id).is_ok());
            let goal: GoalEvent = event.event.as_ref().unwrap().unpack().unwrap();
            assert_eq!(goal.goal_id, "goal-1");
            assert_eq!(goal.user_id, "user-1");
            assert_eq!(goal.user.as_ref().unwrap().id, "user-1");
            assert_eq!(goal.tag, "web");
            assert_eq!(goal.timestamp, now);
            assert_eq!(goal.value, 12.5);
            Ok(())
        });
    let (service, _shutdown) = gateway.build();

    service
        .track(&RequestContext::default(), request(now))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_track_validation_order() {
    let (service, _shutdown) = MockGateway::new().build();
    let ctx = RequestContext::default();
    let now = get_now_as_secs();

    let mut req = request(now);
    req.apikey.clear();
    req.userid.clear();
    let err = service.track(&ctx, req).await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::MissingApiKey)));

    let mut req = request(now);
    req.userid.clear();
    let err = service.track(&ctx, req).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::UserIdRequired)));

    let mut req = request(now);
    req.goalid.clear();
    let err = service.track(&ctx, req).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::GoalIdRequired)));

    let mut req = request(now);
    req.tag.clear();
    let err = service.track(&ctx, req).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::TagRequired)));

    let err = service
        .track(&ctx, request(now + 2 * 60 * 60))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::InvalidTimestamp)));
}

#[tokio::test]
async fn test_track_requires_client_role() {
    let mut gateway = MockGateway::new().with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkServer));
    gateway.goal_publisher.expect_publish().never();
    let (service, _shutdown) = gateway.build();

    let err = service
        .track(&RequestContext::default(), request(get_now_as_secs()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::BadRole)));
}

#[tokio::test]
async fn test_track_publish_failure_is_internal() {
    let mut gateway = MockGateway::new().with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkClient));
    gateway
        .goal_publisher
        .expect_publish()
        .returning(|_| Err(PublishError::Failed("broker unavailable".to_string())));
    let (service, _shutdown) = gateway.build();
    let counter =
        REGISTER_EVENTS_COUNTER.with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_TRACK, CODE_REPEATABLE_ERROR]);
    let before = counter.get();

    let err = service
        .track(&RequestContext::default(), request(get_now_as_secs()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Internal));
    assert_eq!(counter.get(), before + 1);
}

#[tokio::test]
async fn test_track_bad_message_counts_as_non_repeatable() {
    let mut gateway = MockGateway::new().with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkClient));
    gateway
        .goal_publisher
        .expect_publish()
        .returning(|_| Err(PublishError::BadMessage));
    let (service, _shutdown) = gateway.build();
    let counter =
        REGISTER_EVENTS_COUNTER.with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_TRACK, CODE_NON_REPEATABLE_ERROR]);
    let before = counter.get();

    let err = service
        .track(&RequestContext::default(), request(get_now_as_secs()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Internal));
    assert_eq!(counter.get(), before + 1);
}

#[test]
fn test_publish_failure_code_follows_retriability() {
    assert_eq!(publish_failure_code(&PublishError::BadMessage), CODE_NON_REPEATABLE_ERROR);
    assert_eq!(publish_failure_code(&PublishError::Canceled), CODE_REPEATABLE_ERROR);
    assert_eq!(publish_failure_code(&PublishError::DeadlineExceeded), CODE_REPEATABLE_ERROR);
    assert_eq!(
        publish_failure_code(&PublishError::Failed("down".to_string())),
        CODE_REPEATABLE_ERROR
    );
}

#[tokio::test]
async fn test_ping_returns_current_time() {
    let (service, _shutdown) = MockGateway::new().build();

    let before = get_now_as_secs();
    let resp = service.ping();
    assert!(resp.time >= before);
}

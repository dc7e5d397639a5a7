use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tonic::async_trait;

use crate::proto::account::ApiKeyRole;
use crate::proto::event::Any;
use crate::proto::event::Event;
use crate::proto::event::LatencyMetricsEvent;
use crate::proto::event::MetricsEvent;
use crate::proto::exts::AnyExt;
use crate::proto::gateway::RegisterEventsRequest;
use crate::proto::gateway::RegisterEventsResponse;
use crate::test_utils::ctx;
use crate::test_utils::env_api_key;
use crate::test_utils::evaluation_event;
use crate::test_utils::event;
use crate::test_utils::goal_event;
use crate::test_utils::MockGateway;
use crate::test_utils::TEST_ENV;
use crate::test_utils::TEST_SDK_VERSION;
use crate::time::get_now_as_secs;
use crate::AuthError;
use crate::Error;
use crate::EventValidationError;
use crate::PublishError;
use crate::Publisher;
use crate::ValidationError;
use crate::FAILED_TO_PUBLISH_MESSAGE;
use crate::INVALID_MESSAGE_TYPE_MESSAGE;

fn request(events: Vec<Event>) -> RegisterEventsRequest {
    RegisterEventsRequest {
        events,
        sdk_version: TEST_SDK_VERSION.to_string(),
        source_id: 0,
    }
}

fn unknown_event(n: u8) -> Event {
    event(
        n,
        Any {
            type_url: "type.googleapis.com/gateway.event.UnknownEvent".to_string(),
            value: Vec::new(),
        },
    )
}

fn sdk_gateway() -> MockGateway {
    MockGateway::new().with_api_key(env_api_key(TEST_ENV, ApiKeyRole::SdkServer))
}

fn error_ids(resp: &RegisterEventsResponse) -> Vec<String> {
    let mut ids: Vec<String> = resp.errors.keys().cloned().collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_partial_failure_reports_only_failed_events() {
    let now = get_now_as_secs();
    let goal = event(1, Any::pack(&goal_event(now)));
    let unknown = unknown_event(2);
    let mut bad_evaluation = evaluation_event(now);
    bad_evaluation.feature_id.clear();
    let bad_evaluation = event(3, Any::pack(&bad_evaluation));

    let goal_id = goal.id.clone();
    let mut gateway = sdk_gateway();
    gateway
        .goal_publisher
        .expect_publish_multi()
        .times(1)
        .returning(move |events| {
            assert_eq!(events.len(), 1);
            assert_eq!(events[0].id, goal_id);
            assert_eq!(events[0].environment_id, TEST_ENV);
            HashMap::new()
        });
    gateway.evaluation_publisher.expect_publish_multi().never();
    let (service, _shutdown) = gateway.build();

    let resp = service
        .register_events(&ctx(), request(vec![goal, unknown.clone(), bad_evaluation.clone()]))
        .await
        .unwrap();

    assert_eq!(resp.errors.len(), 2);
    let unknown_err = &resp.errors[&unknown.id];
    assert!(!unknown_err.retriable);
    assert_eq!(unknown_err.message, INVALID_MESSAGE_TYPE_MESSAGE);
    let evaluation_err = &resp.errors[&bad_evaluation.id];
    assert!(!evaluation_err.retriable);
    assert_eq!(evaluation_err.message, EventValidationError::EmptyFeatureId.to_string());
}

#[tokio::test]
async fn test_missing_event_id_aborts_the_call() {
    let now = get_now_as_secs();
    let mut gateway = sdk_gateway();
    gateway.goal_publisher.expect_publish_multi().never();
    gateway.evaluation_publisher.expect_publish_multi().never();
    let (service, _shutdown) = gateway.build();

    let mut no_id = event(2, Any::pack(&goal_event(now)));
    no_id.id.clear();
    let events = vec![
        event(1, Any::pack(&goal_event(now))),
        no_id,
        event(3, Any::pack(&evaluation_event(now))),
    ];

    let err = service.register_events(&ctx(), request(events)).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::MissingEventId)));
}

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let (service, _shutdown) = sdk_gateway().build();

    let err = service.register_events(&ctx(), request(Vec::new())).await.unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::MissingEvents)));
}

#[tokio::test]
async fn test_publisher_failures_carry_retriability() {
    let now = get_now_as_secs();
    let first = event(1, Any::pack(&evaluation_event(now)));
    let second = event(2, Any::pack(&evaluation_event(now)));
    let third = event(3, Any::pack(&evaluation_event(now)));
    let (first_id, second_id) = (first.id.clone(), second.id.clone());

    let mut gateway = sdk_gateway();
    gateway
        .evaluation_publisher
        .expect_publish_multi()
        .times(1)
        .returning(move |events| {
            assert_eq!(events.len(), 3);
            HashMap::from([
                (first_id.clone(), PublishError::BadMessage),
                (second_id.clone(), PublishError::Failed("broker unavailable".to_string())),
            ])
        });
    let (service, _shutdown) = gateway.build();

    let resp = service
        .register_events(&ctx(), request(vec![first.clone(), second.clone(), third.clone()]))
        .await
        .unwrap();

    assert_eq!(error_ids(&resp), vec![first.id.clone(), second.id.clone()]);
    assert!(!resp.errors[&first.id].retriable);
    assert!(resp.errors[&second.id].retriable);
    assert_eq!(resp.errors[&second.id].message, FAILED_TO_PUBLISH_MESSAGE);
}

#[tokio::test]
async fn test_out_of_window_timestamp_is_a_per_item_error() {
    let now = get_now_as_secs();
    let stale = event(1, Any::pack(&goal_event(now - 40 * 24 * 60 * 60)));
    let (service, _shutdown) = sdk_gateway().build();

    let resp = service
        .register_events(&ctx(), request(vec![stale.clone()]))
        .await
        .unwrap();
    let err = &resp.errors[&stale.id];
    assert!(!err.retriable);
    assert_eq!(err.message, EventValidationError::InvalidTimestamp.to_string());
}

#[tokio::test]
async fn test_metrics_events_are_not_published() {
    let metrics = MetricsEvent {
        timestamp: get_now_as_secs(),
        event: Some(Any::pack(&LatencyMetricsEvent {
            api_id: 2,
            labels: HashMap::from([("tag".to_string(), "ios".to_string())]),
            latency_second: 0.25,
        })),
        sdk_version: TEST_SDK_VERSION.to_string(),
        ..Default::default()
    };
    let mut gateway = sdk_gateway();
    gateway.goal_publisher.expect_publish_multi().never();
    gateway.evaluation_publisher.expect_publish_multi().never();
    let (service, _shutdown) = gateway.build();

    let resp = service
        .register_events(&ctx(), request(vec![event(1, Any::pack(&metrics))]))
        .await
        .unwrap();
    assert!(resp.errors.is_empty());
}

#[tokio::test]
async fn test_public_api_key_cannot_register_events() {
    let mut gateway =
        MockGateway::new().with_api_key(env_api_key(TEST_ENV, ApiKeyRole::PublicApiAdmin));
    gateway.goal_publisher.expect_publish_multi().never();
    let (service, _shutdown) = gateway.build();

    let now = get_now_as_secs();
    let err = service
        .register_events(&ctx(), request(vec![event(1, Any::pack(&goal_event(now)))]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::BadRole)));
}

/// Never completes a publish.
struct StalledPublisher;

#[async_trait]
impl Publisher for StalledPublisher {
    async fn publish(
        &self,
        _event: Event,
    ) -> std::result::Result<(), PublishError> {
        std::future::pending().await
    }

    async fn publish_multi(
        &self,
        _events: Vec<Event>,
    ) -> HashMap<String, PublishError> {
        std::future::pending().await
    }
}

#[tokio::test(start_paused = true)]
async fn test_publish_timeout_marks_batch_retriable() {
    let mut gateway = sdk_gateway();
    gateway.settings.events.publish_timeout_in_ms = 100;
    let (builder, _shutdown) = gateway.builder();
    let service = builder.goal_publisher(Arc::new(StalledPublisher)).build().unwrap();

    let now = get_now_as_secs();
    let events = vec![
        event(1, Any::pack(&goal_event(now))),
        event(2, Any::pack(&goal_event(now))),
    ];
    let ids: Vec<String> = events.iter().map(|e| e.id.clone()).collect();

    let resp = tokio::time::timeout(
        Duration::from_secs(5),
        service.register_events(&ctx(), request(events)),
    )
    .await
    .expect("register_events returns once the publish timeout fires")
    .unwrap();

    assert_eq!(error_ids(&resp), ids);
    for id in &ids {
        assert!(resp.errors[id].retriable);
        assert_eq!(resp.errors[id].message, FAILED_TO_PUBLISH_MESSAGE);
    }
}

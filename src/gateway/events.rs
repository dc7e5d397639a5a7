//! `RegisterEvents`: per-event validation and publisher fan-out with
//! per-item error reporting.

use std::collections::HashMap;

use tracing::error;
use tracing::warn;

use super::auth::SDK_ROLES;
use super::metrics_events::MetricsEventBatch;
use super::validation::EventPayload;
use super::validation::EventValidator;
use super::validation::ValidatedEvent;
use super::GatewayService;
use crate::metrics::CALLER_GATEWAY_SERVICE;
use crate::metrics::CODE_EMPTY_FIELD;
use crate::metrics::CODE_INVALID_ID;
use crate::metrics::CODE_INVALID_TIMESTAMP;
use crate::metrics::CODE_INVALID_TYPE;
use crate::metrics::CODE_NON_REPEATABLE_ERROR;
use crate::metrics::CODE_OK;
use crate::metrics::CODE_REPEATABLE_ERROR;
use crate::metrics::CODE_UNMARSHAL_FAILED;
use crate::metrics::REGISTER_EVENTS_COUNTER;
use crate::metrics::TYPE_EVALUATION;
use crate::metrics::TYPE_GOAL;
use crate::metrics::TYPE_METRICS;
use crate::metrics::TYPE_REGISTER_EVENT;
use crate::metrics::TYPE_UNKNOWN;
use crate::proto::event::Event;
use crate::proto::gateway::RegisterEventsRequest;
use crate::proto::gateway::RegisterEventsResponse;
use crate::proto::gateway::RegisterEventsResponseError;
use crate::time::get_now_as_secs;
use crate::EventErrorCode;
use crate::EventValidationError;
use crate::Publisher;
use crate::PublishError;
use crate::RequestContext;
use crate::Result;
use crate::ValidationError;
use crate::FAILED_TO_PUBLISH_MESSAGE;
use crate::INVALID_MESSAGE_TYPE_MESSAGE;

type EventErrors = HashMap<String, RegisterEventsResponseError>;

impl GatewayService {
    pub async fn register_events(
        &self,
        ctx: &RequestContext,
        req: RegisterEventsRequest,
    ) -> Result<RegisterEventsResponse> {
        let env_api_key = self.check_request(ctx, SDK_ROLES).await?;
        if req.events.is_empty() {
            return Err(ValidationError::MissingEvents.into());
        }

        let mut events = req.events;
        for event in events.iter_mut() {
            if event.id.is_empty() {
                return Err(ValidationError::MissingEventId.into());
            }
            event.environment_id = env_api_key.environment_id().to_string();
        }

        let validator = EventValidator {
            oldest: self.settings.events.oldest_event_timestamp_in_secs,
            furthest: self.settings.events.furthest_event_timestamp_in_secs,
            now: get_now_as_secs(),
        };

        let mut errors = EventErrors::new();
        let mut goal_events = Vec::new();
        let mut evaluation_events = Vec::new();
        let mut metrics_events = Vec::new();
        for event in events {
            let payload = EventPayload::classify(&event);
            let typ = payload_type(payload);
            let Some(res) = validator.validate(&event.id, payload) else {
                REGISTER_EVENTS_COUNTER
                    .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_UNKNOWN, CODE_INVALID_TYPE])
                    .inc();
                errors.insert(event.id, non_retriable(INVALID_MESSAGE_TYPE_MESSAGE));
                continue;
            };
            match res {
                Ok(ValidatedEvent::Goal(_)) => goal_events.push(event),
                Ok(ValidatedEvent::Evaluation(_)) => evaluation_events.push(event),
                Ok(ValidatedEvent::Metrics(m)) => metrics_events.push(m),
                Err(e) => {
                    REGISTER_EVENTS_COUNTER
                        .with_label_values(&[CALLER_GATEWAY_SERVICE, typ, validation_code(&e)])
                        .inc();
                    warn!("invalid event: id={}, type={}, err={}", event.id, typ, e);
                    errors.insert(event.id, non_retriable(&e.to_string()));
                }
            }
        }

        self.metrics_events.send(MetricsEventBatch {
            project_id: env_api_key.project_id.clone(),
            environment_url_code: env_api_key.environment_url_code().to_string(),
            events: metrics_events,
        });

        let (goal_errors, evaluation_errors) = tokio::join!(
            self.publish_events(self.goal_publisher.as_ref(), goal_events, TYPE_GOAL),
            self.publish_events(self.evaluation_publisher.as_ref(), evaluation_events, TYPE_EVALUATION),
        );
        errors.extend(goal_errors);
        errors.extend(evaluation_errors);

        if errors.is_empty() {
            REGISTER_EVENTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_REGISTER_EVENT, CODE_OK])
                .inc();
        } else if errors
            .values()
            .any(|e| e.message == EventValidationError::InvalidTimestamp.to_string())
        {
            REGISTER_EVENTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_REGISTER_EVENT, CODE_INVALID_TIMESTAMP])
                .inc();
        }
        Ok(RegisterEventsResponse { errors })
    }

    /// Publishes one batch, bounded by the configured publish timeout. A
    /// timeout fails every event of the batch as retriable.
    async fn publish_events(
        &self,
        publisher: &dyn Publisher,
        events: Vec<Event>,
        typ: &str,
    ) -> EventErrors {
        if events.is_empty() {
            return EventErrors::new();
        }
        let total = events.len();
        let ids: Vec<String> = events.iter().map(|e| e.id.clone()).collect();
        let publish_errors =
            match tokio::time::timeout(self.settings.events.publish_timeout(), publisher.publish_multi(events))
                .await
            {
                Ok(errs) => errs,
                Err(_) => ids
                    .into_iter()
                    .map(|id| (id, PublishError::DeadlineExceeded))
                    .collect(),
            };

        let mut errors = EventErrors::new();
        let mut repeatable = 0;
        let mut non_repeatable = 0;
        for (id, err) in publish_errors {
            let retriable = err.is_retriable();
            if retriable {
                repeatable += 1;
            } else {
                non_repeatable += 1;
            }
            if !matches!(err, PublishError::Canceled | PublishError::DeadlineExceeded) {
                error!("failed to publish event: id={}, type={}, err={}", id, typ, err);
            }
            errors.insert(
                id,
                RegisterEventsResponseError {
                    retriable,
                    message: FAILED_TO_PUBLISH_MESSAGE.to_string(),
                },
            );
        }

        REGISTER_EVENTS_COUNTER
            .with_label_values(&[CALLER_GATEWAY_SERVICE, typ, CODE_NON_REPEATABLE_ERROR])
            .inc_by(non_repeatable);
        REGISTER_EVENTS_COUNTER
            .with_label_values(&[CALLER_GATEWAY_SERVICE, typ, CODE_REPEATABLE_ERROR])
            .inc_by(repeatable);
        REGISTER_EVENTS_COUNTER
            .with_label_values(&[CALLER_GATEWAY_SERVICE, typ, CODE_OK])
            .inc_by(total.saturating_sub(errors.len()) as u64);
        errors
    }
}

fn non_retriable(message: &str) -> RegisterEventsResponseError {
    RegisterEventsResponseError {
        retriable: false,
        message: message.to_string(),
    }
}

fn payload_type(payload: EventPayload<'_>) -> &'static str {
    match payload {
        EventPayload::Goal(_) => TYPE_GOAL,
        EventPayload::Evaluation(_) => TYPE_EVALUATION,
        EventPayload::Metrics(_) => TYPE_METRICS,
        EventPayload::Unknown => TYPE_UNKNOWN,
    }
}

fn validation_code(err: &EventValidationError) -> &'static str {
    match err.code() {
        EventErrorCode::InvalidId => CODE_INVALID_ID,
        EventErrorCode::UnmarshalFailed => CODE_UNMARSHAL_FAILED,
        EventErrorCode::EmptyField => CODE_EMPTY_FIELD,
        EventErrorCode::InvalidTimestamp => CODE_INVALID_TIMESTAMP,
    }
}

//! `Track` (single goal event with the API key in the request body) and
//! `Ping`.

use tracing::error;
use uuid::Uuid;

use super::auth::SDK_CLIENT_ROLES;
use super::validation::is_timestamp_in_window;
use super::GatewayService;
use crate::metrics::CALLER_GATEWAY_SERVICE;
use crate::metrics::CODE_EMPTY_FIELD;
use crate::metrics::CODE_INVALID_TIMESTAMP;
use crate::metrics::CODE_NON_REPEATABLE_ERROR;
use crate::metrics::CODE_OK;
use crate::metrics::CODE_REPEATABLE_ERROR;
use crate::metrics::REGISTER_EVENTS_COUNTER;
use crate::metrics::TYPE_TRACK;
use crate::proto::event::Any;
use crate::proto::event::Event;
use crate::proto::event::GoalEvent;
use crate::proto::exts::AnyExt;
use crate::proto::gateway::PingResponse;
use crate::proto::gateway::TrackRequest;
use crate::proto::gateway::TrackResponse;
use crate::proto::user::User;
use crate::time::get_now_as_secs;
use crate::AuthError;
use crate::Error;
use crate::PublishError;
use crate::RequestContext;
use crate::Result;
use crate::ValidationError;

impl GatewayService {
    pub fn ping(&self) -> PingResponse {
        PingResponse {
            time: get_now_as_secs(),
        }
    }

    pub async fn track(
        &self,
        ctx: &RequestContext,
        req: TrackRequest,
    ) -> Result<TrackResponse> {
        if let Err(e) = self.validate_track_request(&req) {
            let code = match e {
                Error::Validation(ValidationError::InvalidTimestamp) => CODE_INVALID_TIMESTAMP,
                _ => CODE_EMPTY_FIELD,
            };
            count_track(code);
            return Err(e);
        }
        let env_api_key = self
            .check_track_request(ctx, &req.apikey, SDK_CLIENT_ROLES)
            .await?;

        let goal = GoalEvent {
            timestamp: req.timestamp,
            goal_id: req.goalid,
            user_id: req.userid.clone(),
            value: req.value,
            user: Some(User {
                id: req.userid,
                ..Default::default()
            }),
            tag: req.tag,
            ..Default::default()
        };
        let event = Event {
            id: Uuid::new_v4().to_string(),
            event: Some(Any::pack(&goal)),
            environment_id: env_api_key.environment_id().to_string(),
        };
        let event_id = event.id.clone();
        if let Err(e) = self.goal_publisher.publish(event).await {
            count_track(publish_failure_code(&e));
            error!(
                "failed to publish track event: id={}, environment_id={}, err={}",
                event_id,
                env_api_key.environment_id(),
                e
            );
            return Err(Error::Internal);
        }
        count_track(CODE_OK);
        Ok(TrackResponse {})
    }

    fn validate_track_request(
        &self,
        req: &TrackRequest,
    ) -> Result<()> {
        if req.apikey.is_empty() {
            return Err(AuthError::MissingApiKey.into());
        }
        if req.userid.is_empty() {
            return Err(ValidationError::UserIdRequired.into());
        }
        if req.goalid.is_empty() {
            return Err(ValidationError::GoalIdRequired.into());
        }
        if req.tag.is_empty() {
            return Err(ValidationError::TagRequired.into());
        }
        let events = &self.settings.events;
        if !is_timestamp_in_window(
            req.timestamp,
            get_now_as_secs(),
            events.oldest_event_timestamp_in_secs,
            events.furthest_event_timestamp_in_secs,
        ) {
            return Err(ValidationError::InvalidTimestamp.into());
        }
        Ok(())
    }
}

pub(crate) fn publish_failure_code(e: &PublishError) -> &'static str {
    if e.is_retriable() {
        CODE_REPEATABLE_ERROR
    } else {
        CODE_NON_REPEATABLE_ERROR
    }
}

fn count_track(code: &str) {
    REGISTER_EVENTS_COUNTER
        .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_TRACK, code])
        .inc();
}

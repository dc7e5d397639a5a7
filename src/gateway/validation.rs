//! Classification and validation of inbound SDK events.
//!
//! The embedded payload of an [`Event`] is classified once by its type URL
//! into an [`EventPayload`]; [`EventValidator::validate`] then checks, in
//! order, that the payload decodes, that the event id is a UUID, that the
//! type's required fields are present and (goal and evaluation events only)
//! that the timestamp lies inside the accepted window.

use uuid::Uuid;

use crate::proto::event::Any;
use crate::proto::event::EvaluationEvent;
use crate::proto::event::Event;
use crate::proto::event::GoalEvent;
use crate::proto::event::MetricsEvent;
use crate::proto::exts::AnyExt;
use crate::proto::feature::ReasonType;
use crate::proto::user::User;
use crate::EventValidationError;

/// Reasons meaning no variation was selected, so an empty variation id is
/// expected.
const NO_VARIATION_REASONS: &[ReasonType] = &[
    ReasonType::ErrorNoEvaluations,
    ReasonType::ErrorFlagNotFound,
    ReasonType::ErrorWrongType,
    ReasonType::ErrorUserIdNotSpecified,
    ReasonType::ErrorFeatureFlagIdNotSpecified,
    ReasonType::ErrorException,
    ReasonType::ErrorCacheNotFound,
    ReasonType::Client,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum EventPayload<'a> {
    Goal(&'a Any),
    Evaluation(&'a Any),
    Metrics(&'a Any),
    Unknown,
}

impl<'a> EventPayload<'a> {
    pub(crate) fn classify(event: &'a Event) -> Self {
        let Some(any) = event.event.as_ref() else {
            return EventPayload::Unknown;
        };
        if any.is::<GoalEvent>() {
            EventPayload::Goal(any)
        } else if any.is::<EvaluationEvent>() {
            EventPayload::Evaluation(any)
        } else if any.is::<MetricsEvent>() {
            EventPayload::Metrics(any)
        } else {
            EventPayload::Unknown
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ValidatedEvent {
    Goal(GoalEvent),
    Evaluation(EvaluationEvent),
    Metrics(MetricsEvent),
}

/// Accepted event timestamp window relative to `now`, in seconds.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EventValidator {
    pub(crate) oldest: i64,
    pub(crate) furthest: i64,
    pub(crate) now: i64,
}

impl EventValidator {
    /// `None` for [`EventPayload::Unknown`], which has no validator.
    pub(crate) fn validate(
        &self,
        id: &str,
        payload: EventPayload<'_>,
    ) -> Option<Result<ValidatedEvent, EventValidationError>> {
        let res = match payload {
            EventPayload::Goal(any) => self.validate_goal(id, any).map(ValidatedEvent::Goal),
            EventPayload::Evaluation(any) => self
                .validate_evaluation(id, any)
                .map(ValidatedEvent::Evaluation),
            EventPayload::Metrics(any) => validate_metrics(id, any).map(ValidatedEvent::Metrics),
            EventPayload::Unknown => return None,
        };
        Some(res)
    }

    fn validate_goal(
        &self,
        id: &str,
        any: &Any,
    ) -> Result<GoalEvent, EventValidationError> {
        let ev: GoalEvent = any.unpack().map_err(|_| EventValidationError::UnmarshalFailed)?;
        validate_id(id)?;
        if ev.goal_id.is_empty() {
            return Err(EventValidationError::EmptyGoalId);
        }
        validate_user_id(ev.user.as_ref(), &ev.user_id)?;
        self.validate_timestamp(ev.timestamp)?;
        Ok(ev)
    }

    fn validate_evaluation(
        &self,
        id: &str,
        any: &Any,
    ) -> Result<EvaluationEvent, EventValidationError> {
        let ev: EvaluationEvent = any.unpack().map_err(|_| EventValidationError::UnmarshalFailed)?;
        validate_id(id)?;
        if ev.feature_id.is_empty() {
            return Err(EventValidationError::EmptyFeatureId);
        }
        validate_user_id(ev.user.as_ref(), &ev.user_id)?;
        let reason = ev.reason.as_ref().ok_or(EventValidationError::NilReason)?;
        if ev.variation_id.is_empty() && !is_no_variation_reason(reason.r#type) {
            return Err(EventValidationError::EmptyVariationId);
        }
        self.validate_timestamp(ev.timestamp)?;
        Ok(ev)
    }

    fn validate_timestamp(
        &self,
        timestamp: i64,
    ) -> Result<(), EventValidationError> {
        if is_timestamp_in_window(timestamp, self.now, self.oldest, self.furthest) {
            Ok(())
        } else {
            Err(EventValidationError::InvalidTimestamp)
        }
    }
}

fn validate_metrics(
    id: &str,
    any: &Any,
) -> Result<MetricsEvent, EventValidationError> {
    let ev: MetricsEvent = any.unpack().map_err(|_| EventValidationError::UnmarshalFailed)?;
    validate_id(id)?;
    Ok(ev)
}

fn validate_id(id: &str) -> Result<(), EventValidationError> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| EventValidationError::InvalidEventId)
}

/// `user.id` takes precedence over the deprecated `user_id` field.
fn validate_user_id(
    user: Option<&User>,
    deprecated_user_id: &str,
) -> Result<(), EventValidationError> {
    let user_id = user
        .map(|u| u.id.as_str())
        .filter(|id| !id.is_empty())
        .unwrap_or(deprecated_user_id);
    if user_id.is_empty() {
        return Err(EventValidationError::EmptyUserId);
    }
    Ok(())
}

fn is_no_variation_reason(reason_type: i32) -> bool {
    ReasonType::try_from(reason_type)
        .map(|r| NO_VARIATION_REASONS.contains(&r))
        .unwrap_or(false)
}

/// `now - oldest <= timestamp <= now + furthest`
pub(crate) fn is_timestamp_in_window(
    timestamp: i64,
    now: i64,
    oldest: i64,
    furthest: i64,
) -> bool {
    timestamp >= now - oldest && timestamp <= now + furthest
}

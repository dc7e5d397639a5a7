//! Gateway Error Hierarchy
//!
//! Errors are grouped by the concern raising them. Every variant maps to a
//! gRPC status at the edge through `From<Error> for tonic::Status`, and the
//! messages are part of the observable contract with SDKs.

use config::ConfigError;
use tonic::Code;
use tonic::Status;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Caller authentication and authorization failures
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request shape violations, returned without retry
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Requested entity missing
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The caller gave up before the request completed
    #[error("gateway: context canceled")]
    ContextCanceled,

    /// Unexpected backing-store failure or empty downstream response.
    /// Never carries downstream error text.
    #[error("gateway: internal")]
    Internal,

    /// Status returned verbatim by a pass-through downstream call
    #[error(transparent)]
    Downstream(#[from] Box<Status>),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("gateway: missing APIKey")]
    MissingApiKey,

    #[error("gateway: invalid APIKey")]
    InvalidApiKey,

    /// Either the key or its environment is disabled
    #[error("gateway: disabled APIKey")]
    DisabledApiKey,

    #[error("gateway: bad role")]
    BadRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("gateway: sdk version is required")]
    SdkVersionRequired,

    #[error("gateway: source id is required")]
    SourceIdRequired,

    #[error("gateway: user is required")]
    UserRequired,

    #[error("gateway: user id is required")]
    UserIdRequired,

    #[error("gateway: goal id is required")]
    GoalIdRequired,

    #[error("gateway: feature id is required")]
    FeatureIdRequired,

    #[error("gateway: tag is required")]
    TagRequired,

    #[error("gateway: missing events")]
    MissingEvents,

    #[error("gateway: missing event id")]
    MissingEventId,

    #[error("gateway: invalid timestamp")]
    InvalidTimestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("gateway: feature not found")]
    Feature,

    #[error("gateway: evaluation not found")]
    Evaluation,

    #[error("gateway: account not found")]
    Account,

    #[error("gateway: push not found")]
    Push,

    #[error("gateway: not found")]
    Generic,
}

/// Classification of a per-event validation failure, used as the
/// `api_register_events_total` code label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventErrorCode {
    InvalidId,
    UnmarshalFailed,
    EmptyField,
    InvalidTimestamp,
}

/// Per-event validation failure inside `RegisterEvents`. Reported in the
/// response error map, never as a call failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventValidationError {
    #[error("gateway: invalid event id format")]
    InvalidEventId,

    #[error("gateway: failed to unmarshal event")]
    UnmarshalFailed,

    #[error("gateway: feature_id is empty")]
    EmptyFeatureId,

    #[error("gateway: user_id is empty")]
    EmptyUserId,

    #[error("gateway: variation_id is empty")]
    EmptyVariationId,

    #[error("gateway: goal_id is empty")]
    EmptyGoalId,

    #[error("gateway: reason is nil")]
    NilReason,

    #[error("gateway: invalid event timestamp")]
    InvalidTimestamp,
}

impl EventValidationError {
    pub fn code(&self) -> EventErrorCode {
        match self {
            EventValidationError::InvalidEventId => EventErrorCode::InvalidId,
            EventValidationError::UnmarshalFailed => EventErrorCode::UnmarshalFailed,
            EventValidationError::InvalidTimestamp => EventErrorCode::InvalidTimestamp,
            EventValidationError::EmptyFeatureId
            | EventValidationError::EmptyUserId
            | EventValidationError::EmptyVariationId
            | EventValidationError::EmptyGoalId
            | EventValidationError::NilReason => EventErrorCode::EmptyField,
        }
    }
}

/// Failure reported by a cache collaborator. Both kinds fall through to the
/// backing store; they are distinguished only for logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("cache: not found")]
    NotFound,

    #[error("cache: {0}")]
    Backend(String),
}

/// Per-message failure reported by a publisher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    /// Malformed message; resending it will not help
    #[error("publisher: bad message")]
    BadMessage,

    #[error("publisher: context canceled")]
    Canceled,

    #[error("publisher: deadline exceeded")]
    DeadlineExceeded,

    #[error("publisher: {0}")]
    Failed(String),
}

/// Reason a metrics event could not be recorded. Logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsEventError {
    #[error("gateway: unknown metrics event")]
    UnknownEvent,

    #[error("gateway: metrics event has invalid duration")]
    InvalidDuration,

    #[error("gateway: metrics event has unknown api id")]
    UnknownApiId,

    #[error("gateway: failed to unmarshal metrics event: {0}")]
    Unmarshal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("evaluator: {0}")]
pub struct EvaluatorError(pub String);

impl PublishError {
    pub fn is_retriable(&self) -> bool {
        !matches!(self, PublishError::BadMessage)
    }
}

impl Error {
    /// Errors produced by ordinary client behavior (disconnects, unknown or
    /// absent keys). Logged below error level.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Error::ContextCanceled
                | Error::Auth(AuthError::InvalidApiKey)
                | Error::Auth(AuthError::MissingApiKey)
        )
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<Status> for Error {
    fn from(status: Status) -> Self {
        Error::Downstream(Box::new(status))
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::Auth(AuthError::MissingApiKey) => Status::new(Code::Unauthenticated, message),
            Error::Auth(_) => Status::new(Code::PermissionDenied, message),
            Error::Validation(_) => Status::new(Code::InvalidArgument, message),
            Error::NotFound(_) => Status::new(Code::NotFound, message),
            Error::ContextCanceled => Status::new(Code::Cancelled, message),
            Error::Downstream(status) => *status,
            Error::Internal | Error::Config(_) | Error::InvalidConfig(_) => {
                Status::new(Code::Internal, message)
            }
        }
    }
}

// -
// Sync protocol

/// Fixed page size used when listing features from the feature service
pub(crate) const LIST_REQUEST_PAGE_SIZE: i64 = 500;

/// 30 days. Archived flags older than this are dropped, and clients whose
/// last sync is older than this are forced into a full resync.
pub const RETENTION_WINDOW_IN_SECS: i64 = 30 * 24 * 60 * 60;

/// Subtracted from `requested_at` to absorb clock and processing skew
pub(crate) const REQUESTED_AT_ADJUSTMENT_IN_SECS: i64 = 10;

/// Sentinel id returned when an environment has no features to evaluate
pub(crate) const NO_EVALUATIONS_ID: &str = "no_evaluations";

// -
// Authentication

/// Inbound metadata key carrying the API key
pub(crate) const AUTHORIZATION_KEY: &str = "authorization";

/// Inbound metadata key carrying the caller's deadline
pub(crate) const GRPC_TIMEOUT_KEY: &str = "grpc-timeout";

/// Outgoing metadata keys for pass-through calls
pub const API_KEY_TOKEN_KEY: &str = "apikey-token";
pub const API_KEY_MAINTAINER_KEY: &str = "apikey-maintainer";
pub const API_KEY_NAME_KEY: &str = "apikey-name";

/// Characters kept on each side when an API key is written to logs
pub(crate) const OBFUSCATE_VISIBLE_CHARS: usize = 4;

// -
// Event ingestion

pub(crate) const INVALID_MESSAGE_TYPE_MESSAGE: &str = "Invalid message type";
pub(crate) const FAILED_TO_PUBLISH_MESSAGE: &str = "Failed to publish event";

//! Prometheus metrics of the gateway.
//!
//! Collectors are process-wide statics registered into [`REGISTRY`] once by
//! [`register_metrics`]; constructing several services (as tests do) never
//! registers twice. [`start_server`] exposes the registry on `/metrics`.

use std::sync::Once;

use lazy_static::lazy_static;
use prometheus::exponential_buckets;
use prometheus::Encoder;
use prometheus::HistogramOpts;
use prometheus::HistogramVec;
use prometheus::IntCounterVec;
use prometheus::Opts;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

const NAMESPACE: &str = "gateway";

// -
// Label values

pub const CALLER_GATEWAY_SERVICE: &str = "GatewayService";

pub const TYPE_FEATURES: &str = "Features";
pub const TYPE_SEGMENT_USERS: &str = "SegmentUsers";
pub const TYPE_API_KEY: &str = "APIKey";
pub const TYPE_REGISTER_EVENT: &str = "RegisterEvent";
pub const TYPE_EVALUATION: &str = "Evaluation";
pub const TYPE_GOAL: &str = "Goal";
pub const TYPE_METRICS: &str = "Metrics";
pub const TYPE_UNKNOWN: &str = "Unknown";
pub const TYPE_TRACK: &str = "Track";

pub const LAYER_IN_MEMORY: &str = "InMemory";
pub const LAYER_EXTERNAL: &str = "External";

pub const CODE_HIT: &str = "Hit";
pub const CODE_MISS: &str = "Miss";
pub const CODE_OK: &str = "OK";
pub const CODE_INVALID_ID: &str = "InvalidID";
pub const CODE_INVALID_TIMESTAMP: &str = "InvalidTimestamp";
pub const CODE_UNMARSHAL_FAILED: &str = "UnmarshalFailed";
pub const CODE_INVALID_TYPE: &str = "InvalidType";
pub const CODE_NON_REPEATABLE_ERROR: &str = "NonRepeatableError";
pub const CODE_REPEATABLE_ERROR: &str = "RepeatableError";
pub const CODE_EMPTY_FIELD: &str = "EmptyField";
pub const CODE_ALL: &str = "All";
pub const CODE_DIFF: &str = "Diff";
pub const CODE_NONE: &str = "None";
pub const CODE_NO_FEATURES: &str = "NoFeatures";
pub const CODE_NO_SEGMENTS: &str = "NoSegments";
pub const CODE_OLD: &str = "Old";
pub const CODE_INTERNAL_ERROR: &str = "InternalError";
pub const CODE_BAD_REQUEST: &str = "BadRequest";

fn opts(
    name: &str,
    help: &str,
) -> Opts {
    Opts::new(name, help).namespace(NAMESPACE)
}

lazy_static! {
    pub static ref CACHE_REQUESTS_COUNTER: IntCounterVec = IntCounterVec::new(
        opts("api_cache_requests_total", "Total number of cache requests"),
        &["caller", "type", "layer", "code"]
    )
    .expect("metric can not be created");

    pub static ref REGISTER_EVENTS_COUNTER: IntCounterVec = IntCounterVec::new(
        opts("api_register_events_total", "Total number of registered events"),
        &["caller", "type", "code"]
    )
    .expect("metric can not be created");

    pub static ref EVALUATIONS_COUNTER: IntCounterVec = IntCounterVec::new(
        opts("api_evaluations_total", "Total number of evaluations"),
        &[
            "project_id",
            "project_url_code",
            "environment_id",
            "environment_url_code",
            "tag",
            "evaluation_type"
        ]
    )
    .expect("metric can not be created");

    pub static ref GET_FEATURE_FLAGS_COUNTER: IntCounterVec = IntCounterVec::new(
        opts("api_get_feature_flags_total", "Total number of get feature flags requests"),
        &["environment_id", "tag", "code"]
    )
    .expect("metric can not be created");

    pub static ref GET_SEGMENT_USERS_COUNTER: IntCounterVec = IntCounterVec::new(
        opts("api_get_segment_users_total", "Total number of get segment users requests"),
        &["environment_id", "code"]
    )
    .expect("metric can not be created");

    pub static ref REQUESTS_COUNTER: IntCounterVec = IntCounterVec::new(
        opts("api_requests_total", "Total number of requests by method and result"),
        &["method", "code"]
    )
    .expect("metric can not be created");

    pub static ref SDK_LATENCY_HISTOGRAM: HistogramVec = HistogramVec::new(
        HistogramOpts::new("sdk_api_handling_seconds", "Histogram of SDK API handling time in seconds")
            .namespace(NAMESPACE)
            .buckets(exponential_buckets(0.005, 2.0, 14).expect("buckets are valid")),
        &["project", "env", "tag", "api_id", "sdk_version", "source_id"]
    )
    .expect("metric can not be created");

    pub static ref SDK_SIZE_HISTOGRAM: HistogramVec = HistogramVec::new(
        HistogramOpts::new("sdk_response_size_bytes", "Histogram of SDK response size in bytes")
            .namespace(NAMESPACE)
            .buckets(exponential_buckets(100.0, 4.0, 10).expect("buckets are valid")),
        &["project", "env", "tag", "api_id", "sdk_version", "source_id"]
    )
    .expect("metric can not be created");

    pub static ref SDK_ERROR_COUNTER: IntCounterVec = IntCounterVec::new(
        opts("sdk_error_total", "Total number of SDK errors"),
        &["project", "env", "tag", "error_type", "api_id", "sdk_version", "source_id"]
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

static REGISTER: Once = Once::new();

/// Registers every collector into [`REGISTRY`]. Safe to call repeatedly.
pub fn register_metrics() {
    REGISTER.call_once(|| register_custom_metrics(&REGISTRY));
}

fn register_custom_metrics(registry: &Registry) {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CACHE_REQUESTS_COUNTER.clone()),
        Box::new(REGISTER_EVENTS_COUNTER.clone()),
        Box::new(EVALUATIONS_COUNTER.clone()),
        Box::new(GET_FEATURE_FLAGS_COUNTER.clone()),
        Box::new(GET_SEGMENT_USERS_COUNTER.clone()),
        Box::new(REQUESTS_COUNTER.clone()),
        Box::new(SDK_LATENCY_HISTOGRAM.clone()),
        Box::new(SDK_SIZE_HISTOGRAM.clone()),
        Box::new(SDK_ERROR_COUNTER.clone()),
    ];
    for c in collectors {
        if let Err(e) = registry.register(c) {
            error!("collector can not be registered: {:?}", e);
        }
    }
}

pub async fn start_server(
    port: u16,
    mut shutdown_signal: watch::Receiver<()>,
) {
    register_metrics();

    let metrics_route = warp::path!("metrics").and_then(metrics_handler);

    info!("metrics server listening on port {}", port);
    let (_, server) =
        warp::serve(metrics_route).bind_with_graceful_shutdown(([0, 0, 0, 0], port), async move {
            let _ = shutdown_signal.changed().await;
        });
    server.await;
}

async fn metrics_handler() -> Result<impl Reply, Rejection> {
    Ok(gather_metrics())
}

/// Text exposition of every registered collector.
pub fn gather_metrics() -> String {
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY.gather(), &mut buffer) {
        error!("could not encode custom metrics: {}", e);
    };
    match String::from_utf8(buffer) {
        Ok(v) => v,
        Err(e) => {
            error!("custom metrics could not be from_utf8'd: {}", e);
            String::default()
        }
    }
}

#[cfg(test)]
mod metrics_test;

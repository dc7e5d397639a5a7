//! SDK metrics events are recorded into Prometheus off the request path.
//!
//! `RegisterEvents` hands validated metrics events to [`MetricsEventSender`]
//! and returns. [`run_metrics_recorder`] decodes each payload and updates
//! the SDK histograms and error counter.

use std::collections::HashMap;

use prost::Message;
use tokio::sync::mpsc;
use tokio::sync::watch;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::metrics::CALLER_GATEWAY_SERVICE;
use crate::metrics::CODE_NON_REPEATABLE_ERROR;
use crate::metrics::CODE_OK;
use crate::metrics::REGISTER_EVENTS_COUNTER;
use crate::metrics::SDK_ERROR_COUNTER;
use crate::metrics::SDK_LATENCY_HISTOGRAM;
use crate::metrics::SDK_SIZE_HISTOGRAM;
use crate::metrics::TYPE_METRICS;
use crate::proto::event::ApiId;
use crate::proto::event::LatencyMetricsEvent;
use crate::proto::event::MetricsEvent;
use crate::proto::event::SdkErrorMetricsEvent;
use crate::proto::event::SizeMetricsEvent;
use crate::proto::event::SourceId;
use crate::proto::exts::AnyExt;
use crate::MetricsEventError;
use crate::Result;

const TAG_LABEL: &str = "tag";

/// Error-count payload type names and the `error_type` label they feed.
const ERROR_EVENT_TYPES: &[(&str, &str)] = &[
    ("gateway.event.BadRequestErrorMetricsEvent", "BadRequest"),
    ("gateway.event.RedirectionRequestExceptionEvent", "ErrRedirection"),
    ("gateway.event.UnauthorizedErrorMetricsEvent", "Unauthenticated"),
    ("gateway.event.ForbiddenErrorMetricsEvent", "Forbidden"),
    ("gateway.event.NotFoundErrorMetricsEvent", "NotFound"),
    ("gateway.event.PayloadTooLargeExceptionEvent", "ErrPayloadTooLarge"),
    ("gateway.event.ClientClosedRequestErrorMetricsEvent", "ClientClosedRequest"),
    ("gateway.event.InternalServerErrorMetricsEvent", "InternalServerError"),
    ("gateway.event.ServiceUnavailableErrorMetricsEvent", "ServiceUnavailable"),
    ("gateway.event.TimeoutErrorMetricsEvent", "Timeout"),
    ("gateway.event.InternalErrorMetricsEvent", "Internal"),
    ("gateway.event.NetworkErrorMetricsEvent", "Network"),
    ("gateway.event.InternalSdkErrorMetricsEvent", "SDKInternal"),
    ("gateway.event.UnknownErrorMetricsEvent", "Unknown"),
];

/// Metrics events of one `RegisterEvents` call.
#[derive(Debug, Clone)]
pub(crate) struct MetricsEventBatch {
    pub(crate) project_id: String,
    pub(crate) environment_url_code: String,
    pub(crate) events: Vec<MetricsEvent>,
}

#[derive(Debug, Clone)]
pub(crate) struct MetricsEventSender {
    tx: mpsc::Sender<MetricsEventBatch>,
}

impl MetricsEventSender {
    pub(crate) fn new(tx: mpsc::Sender<MetricsEventBatch>) -> Self {
        Self { tx }
    }

    /// Never blocks. A batch that does not fit in the queue is dropped and
    /// counted as failed.
    pub(crate) fn send(
        &self,
        batch: MetricsEventBatch,
    ) {
        if batch.events.is_empty() {
            return;
        }
        if let Err(e) = self.tx.try_send(batch) {
            let dropped = match &e {
                mpsc::error::TrySendError::Full(b) | mpsc::error::TrySendError::Closed(b) => {
                    b.events.len()
                }
            };
            warn!("dropped {} metrics events: {}", dropped, e);
            REGISTER_EVENTS_COUNTER
                .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_METRICS, CODE_NON_REPEATABLE_ERROR])
                .inc_by(dropped as u64);
        }
    }
}

/// Records batches until shutdown or until every sender is gone.
pub(crate) async fn run_metrics_recorder(
    mut rx: mpsc::Receiver<MetricsEventBatch>,
    mut shutdown_signal: watch::Receiver<()>,
) -> Result<()> {
    loop {
        tokio::select! {
            _ = shutdown_signal.changed() => {
                info!("metrics event recorder stopped");
                return Ok(());
            }
            batch = rx.recv() => {
                match batch {
                    Some(batch) => record_batch(&batch),
                    None => return Ok(()),
                }
            }
        }
    }
}

pub(crate) fn record_batch(batch: &MetricsEventBatch) {
    for event in &batch.events {
        let code = match save_metrics_event(event, &batch.project_id, &batch.environment_url_code) {
            Ok(()) => CODE_OK,
            Err(e) => {
                error!("failed to store metrics event: {}", e);
                CODE_NON_REPEATABLE_ERROR
            }
        };
        REGISTER_EVENTS_COUNTER
            .with_label_values(&[CALLER_GATEWAY_SERVICE, TYPE_METRICS, code])
            .inc();
    }
}

pub(crate) fn save_metrics_event(
    event: &MetricsEvent,
    project_id: &str,
    environment_url_code: &str,
) -> std::result::Result<(), MetricsEventError> {
    let payload = event.event.as_ref().ok_or(MetricsEventError::UnknownEvent)?;
    let labels = SdkLabels {
        project_id,
        environment_url_code,
        sdk_version: &event.sdk_version,
        source_id: source_id_label(event.source_id),
    };

    if payload.is::<LatencyMetricsEvent>() {
        let ev: LatencyMetricsEvent = payload
            .unpack()
            .map_err(|e| MetricsEventError::Unmarshal(e.to_string()))?;
        if ev.latency_second == 0.0 {
            return Err(MetricsEventError::InvalidDuration);
        }
        let api_id = known_api_id(ev.api_id)?;
        SDK_LATENCY_HISTOGRAM
            .with_label_values(&labels.values(tag(&ev.labels), api_id))
            .observe(ev.latency_second);
        return Ok(());
    }

    if payload.is::<SizeMetricsEvent>() {
        let ev: SizeMetricsEvent = payload
            .unpack()
            .map_err(|e| MetricsEventError::Unmarshal(e.to_string()))?;
        let api_id = known_api_id(ev.api_id)?;
        SDK_SIZE_HISTOGRAM
            .with_label_values(&labels.values(tag(&ev.labels), api_id))
            .observe(ev.size_byte as f64);
        return Ok(());
    }

    let error_type = ERROR_EVENT_TYPES
        .iter()
        .find(|(name, _)| *name == payload.type_name())
        .map(|(_, error_type)| *error_type)
        .ok_or(MetricsEventError::UnknownEvent)?;
    let ev = SdkErrorMetricsEvent::decode(payload.value.as_slice())
        .map_err(|e| MetricsEventError::Unmarshal(e.to_string()))?;
    let [project, env, tag_value, api_id, sdk_version, source_id] =
        labels.values(tag(&ev.labels), api_id_label(ev.api_id));
    SDK_ERROR_COUNTER
        .with_label_values(&[project, env, tag_value, error_type, api_id, sdk_version, source_id])
        .inc();
    Ok(())
}

struct SdkLabels<'a> {
    project_id: &'a str,
    environment_url_code: &'a str,
    sdk_version: &'a str,
    source_id: &'static str,
}

impl SdkLabels<'_> {
    fn values<'b>(
        &'b self,
        tag: &'b str,
        api_id: &'static str,
    ) -> [&'b str; 6] {
        [
            self.project_id,
            self.environment_url_code,
            tag,
            api_id,
            self.sdk_version,
            self.source_id,
        ]
    }
}

fn tag(labels: &HashMap<String, String>) -> &str {
    labels.get(TAG_LABEL).map(String::as_str).unwrap_or_default()
}

fn known_api_id(api_id: i32) -> std::result::Result<&'static str, MetricsEventError> {
    match ApiId::try_from(api_id) {
        Ok(ApiId::UnknownApi) | Err(_) => Err(MetricsEventError::UnknownApiId),
        Ok(_) => Ok(api_id_label(api_id)),
    }
}

pub(crate) fn api_id_label(api_id: i32) -> &'static str {
    match ApiId::try_from(api_id) {
        Ok(ApiId::GetEvaluation) => "GET_EVALUATION",
        Ok(ApiId::GetEvaluations) => "GET_EVALUATIONS",
        Ok(ApiId::RegisterEvents) => "REGISTER_EVENTS",
        Ok(ApiId::GetFeatureFlags) => "GET_FEATURE_FLAGS",
        Ok(ApiId::GetSegmentUsers) => "GET_SEGMENT_USERS",
        Ok(ApiId::SdkGetVariation) => "SDK_GET_VARIATION",
        Ok(ApiId::UnknownApi) | Err(_) => "UNKNOWN_API",
    }
}

pub(crate) fn source_id_label(source_id: i32) -> &'static str {
    match SourceId::try_from(source_id) {
        Ok(SourceId::Android) => "ANDROID",
        Ok(SourceId::Ios) => "IOS",
        Ok(SourceId::Web) => "WEB",
        Ok(SourceId::GoalBatch) => "GOAL_BATCH",
        Ok(SourceId::GoServer) => "GO_SERVER",
        Ok(SourceId::NodeServer) => "NODE_SERVER",
        Ok(SourceId::JavaScript) => "JAVASCRIPT",
        Ok(SourceId::Flutter) => "FLUTTER",
        Ok(SourceId::React) => "REACT",
        Ok(SourceId::ReactNative) => "REACT_NATIVE",
        Ok(SourceId::Unknown) | Err(_) => "UNKNOWN",
    }
}

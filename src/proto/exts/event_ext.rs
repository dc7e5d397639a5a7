use prost::DecodeError;
use prost::Message;
use prost::Name;

use crate::proto::event::Any;
use crate::proto::event::EvaluationEvent;
use crate::proto::event::GoalEvent;
use crate::proto::event::LatencyMetricsEvent;
use crate::proto::event::MetricsEvent;
use crate::proto::event::SizeMetricsEvent;

const TYPE_URL_PREFIX: &str = "type.googleapis.com/";
const EVENT_PACKAGE: &str = "gateway.event";

macro_rules! impl_event_name {
    ($($message:ident),* $(,)?) => {
        $(
            impl Name for $message {
                const NAME: &'static str = stringify!($message);
                const PACKAGE: &'static str = EVENT_PACKAGE;

                fn type_url() -> String {
                    format!("{TYPE_URL_PREFIX}{}", Self::full_name())
                }
            }
        )*
    };
}

impl_event_name!(
    GoalEvent,
    EvaluationEvent,
    MetricsEvent,
    LatencyMetricsEvent,
    SizeMetricsEvent,
);

/// Packing helpers for event payloads carried in an [`Any`].
pub trait AnyExt {
    fn pack<M: Name>(message: &M) -> Self;

    /// Full type name with the `type.googleapis.com/` prefix removed.
    fn type_name(&self) -> &str;

    fn is<M: Name>(&self) -> bool;

    /// Decodes the payload as `M` without checking the type URL.
    fn unpack<M: Message + Default>(&self) -> Result<M, DecodeError>;
}

impl AnyExt for Any {
    fn pack<M: Name>(message: &M) -> Self {
        Any {
            type_url: M::type_url(),
            value: message.encode_to_vec(),
        }
    }

    fn type_name(&self) -> &str {
        self.type_url
            .strip_prefix(TYPE_URL_PREFIX)
            .unwrap_or(&self.type_url)
    }

    fn is<M: Name>(&self) -> bool {
        self.type_name() == M::full_name()
    }

    fn unpack<M: Message + Default>(&self) -> Result<M, DecodeError> {
        M::decode(self.value.as_slice())
    }
}

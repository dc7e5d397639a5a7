#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub event: ::core::option::Option<::prost_types::Any>,
    #[prost(string, tag = "3")]
    pub environment_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GoalEvent {
    #[prost(int64, tag = "1")]
    pub timestamp: i64,
    #[prost(string, tag = "2")]
    pub goal_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(double, tag = "4")]
    pub value: f64,
    #[prost(message, optional, tag = "5")]
    pub user: ::core::option::Option<super::user::User>,
    #[prost(string, tag = "7")]
    pub tag: ::prost::alloc::string::String,
    #[prost(enumeration = "SourceId", tag = "8")]
    pub source_id: i32,
    #[prost(string, tag = "9")]
    pub sdk_version: ::prost::alloc::string::String,
    #[prost(map = "string, string", tag = "10")]
    pub metadata: ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvaluationEvent {
    #[prost(int64, tag = "1")]
    pub timestamp: i64,
    #[prost(string, tag = "2")]
    pub feature_id: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub feature_version: i32,
    #[prost(string, tag = "4")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub variation_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "6")]
    pub user: ::core::option::Option<super::user::User>,
    #[prost(message, optional, tag = "7")]
    pub reason: ::core::option::Option<super::feature::Reason>,
    #[prost(string, tag = "8")]
    pub tag: ::prost::alloc::string::String,
    #[prost(enumeration = "SourceId", tag = "9")]
    pub source_id: i32,
    #[prost(string, tag = "10")]
    pub sdk_version: ::prost::alloc::string::String,
    #[prost(map = "string, string", tag = "11")]
    pub metadata: ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MetricsEvent {
    #[prost(int64, tag = "1")]
    pub timestamp: i64,
    #[prost(message, optional, tag = "2")]
    pub event: ::core::option::Option<::prost_types::Any>,
    #[prost(string, tag = "3")]
    pub sdk_version: ::prost::alloc::string::String,
    #[prost(map = "string, string", tag = "4")]
    pub metadata: ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(enumeration = "SourceId", tag = "5")]
    pub source_id: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LatencyMetricsEvent {
    #[prost(enumeration = "ApiId", tag = "1")]
    pub api_id: i32,
    #[prost(map = "string, string", tag = "2")]
    pub labels: ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(double, tag = "3")]
    pub latency_second: f64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SizeMetricsEvent {
    #[prost(enumeration = "ApiId", tag = "1")]
    pub api_id: i32,
    #[prost(map = "string, string", tag = "2")]
    pub labels: ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
    #[prost(int32, tag = "3")]
    pub size_byte: i32,
}
/// Payload shared by every SDK error-count metrics event. The concrete error
/// type is carried by the `Any.type_url` of the enclosing metrics event.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SdkErrorMetricsEvent {
    #[prost(enumeration = "ApiId", tag = "1")]
    pub api_id: i32,
    #[prost(map = "string, string", tag = "2")]
    pub labels: ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SourceId {
    Unknown = 0,
    Android = 1,
    Ios = 2,
    Web = 3,
    GoalBatch = 4,
    GoServer = 5,
    NodeServer = 6,
    JavaScript = 7,
    Flutter = 8,
    React = 9,
    ReactNative = 10,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ApiId {
    UnknownApi = 0,
    GetEvaluation = 1,
    GetEvaluations = 2,
    RegisterEvents = 3,
    GetFeatureFlags = 4,
    GetSegmentUsers = 5,
    SdkGetVariation = 100,
}

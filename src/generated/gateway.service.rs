#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PingRequest {}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PingResponse {
    #[prost(int64, tag = "1")]
    pub time: i64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UserEvaluationCondition {
    #[prost(int64, tag = "1")]
    pub evaluated_at: i64,
    #[prost(bool, tag = "2")]
    pub user_attributes_updated: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEvaluationsRequest {
    #[prost(string, tag = "1")]
    pub tag: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub user: ::core::option::Option<super::user::User>,
    #[prost(string, tag = "3")]
    pub user_evaluations_id: ::prost::alloc::string::String,
    #[prost(enumeration = "super::event::SourceId", tag = "5")]
    pub source_id: i32,
    #[prost(message, optional, tag = "6")]
    pub user_evaluation_condition: ::core::option::Option<UserEvaluationCondition>,
    #[prost(string, tag = "7")]
    pub sdk_version: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEvaluationsResponse {
    #[prost(enumeration = "super::feature::UserEvaluationsState", tag = "1")]
    pub state: i32,
    #[prost(message, optional, tag = "2")]
    pub evaluations: ::core::option::Option<super::feature::UserEvaluations>,
    #[prost(string, tag = "3")]
    pub user_evaluations_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEvaluationRequest {
    #[prost(string, tag = "1")]
    pub tag: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub user: ::core::option::Option<super::user::User>,
    #[prost(string, tag = "3")]
    pub feature_id: ::prost::alloc::string::String,
    #[prost(enumeration = "super::event::SourceId", tag = "4")]
    pub source_id: i32,
    #[prost(string, tag = "5")]
    pub sdk_version: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEvaluationResponse {
    #[prost(message, optional, tag = "1")]
    pub evaluation: ::core::option::Option<super::feature::Evaluation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFeatureFlagsRequest {
    #[prost(string, tag = "1")]
    pub tag: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub feature_flags_id: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub requested_at: i64,
    #[prost(enumeration = "super::event::SourceId", tag = "4")]
    pub source_id: i32,
    #[prost(string, tag = "5")]
    pub sdk_version: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFeatureFlagsResponse {
    #[prost(string, tag = "1")]
    pub feature_flags_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub features: ::prost::alloc::vec::Vec<super::feature::Feature>,
    #[prost(string, repeated, tag = "3")]
    pub archived_feature_flag_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(int64, tag = "4")]
    pub requested_at: i64,
    #[prost(bool, tag = "5")]
    pub force_update: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSegmentUsersRequest {
    #[prost(string, repeated, tag = "1")]
    pub segment_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(int64, tag = "2")]
    pub requested_at: i64,
    #[prost(enumeration = "super::event::SourceId", tag = "3")]
    pub source_id: i32,
    #[prost(string, tag = "4")]
    pub sdk_version: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSegmentUsersResponse {
    #[prost(message, repeated, tag = "1")]
    pub segment_users: ::prost::alloc::vec::Vec<super::feature::SegmentUsers>,
    #[prost(string, repeated, tag = "2")]
    pub deleted_segment_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(int64, tag = "3")]
    pub requested_at: i64,
    #[prost(bool, tag = "4")]
    pub force_update: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterEventsRequest {
    #[prost(message, repeated, tag = "1")]
    pub events: ::prost::alloc::vec::Vec<super::event::Event>,
    #[prost(string, tag = "2")]
    pub sdk_version: ::prost::alloc::string::String,
    #[prost(enumeration = "super::event::SourceId", tag = "3")]
    pub source_id: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterEventsResponseError {
    #[prost(bool, tag = "1")]
    pub retriable: bool,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RegisterEventsResponse {
    #[prost(map = "string, message", tag = "1")]
    pub errors: ::std::collections::HashMap<::prost::alloc::string::String, RegisterEventsResponseError>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TrackRequest {
    #[prost(string, tag = "1")]
    pub apikey: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub userid: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub goalid: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub tag: ::prost::alloc::string::String,
    #[prost(int64, tag = "5")]
    pub timestamp: i64,
    #[prost(double, tag = "6")]
    pub value: f64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TrackResponse {}

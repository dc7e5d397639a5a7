#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Variation {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub description: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Target {
    #[prost(string, tag = "1")]
    pub variation: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub users: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Clause {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub attribute: ::prost::alloc::string::String,
    #[prost(enumeration = "ClauseOperator", tag = "3")]
    pub operator: i32,
    #[prost(string, repeated, tag = "4")]
    pub values: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ClauseOperator {
    Equals = 0,
    In = 1,
    EndsWith = 2,
    StartsWith = 3,
    Segment = 4,
    Greater = 5,
    GreaterOrEqual = 6,
    Less = 7,
    LessOrEqual = 8,
    Before = 9,
    After = 10,
    FeatureFlag = 11,
    PartiallyMatch = 12,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FixedStrategy {
    #[prost(string, tag = "1")]
    pub variation: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RolloutVariation {
    #[prost(string, tag = "1")]
    pub variation: ::prost::alloc::string::String,
    #[prost(int32, tag = "2")]
    pub weight: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RolloutStrategy {
    #[prost(message, repeated, tag = "1")]
    pub variations: ::prost::alloc::vec::Vec<RolloutVariation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Strategy {
    #[prost(enumeration = "StrategyType", tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub fixed_strategy: ::core::option::Option<FixedStrategy>,
    #[prost(message, optional, tag = "3")]
    pub rollout_strategy: ::core::option::Option<RolloutStrategy>,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum StrategyType {
    Fixed = 0,
    Rollout = 1,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Rule {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "2")]
    pub strategy: ::core::option::Option<Strategy>,
    #[prost(message, repeated, tag = "3")]
    pub clauses: ::prost::alloc::vec::Vec<Clause>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Prerequisite {
    #[prost(string, tag = "1")]
    pub feature_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub variation_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Feature {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(bool, tag = "4")]
    pub enabled: bool,
    #[prost(bool, tag = "5")]
    pub deleted: bool,
    #[prost(bool, tag = "6")]
    pub evaluation_undelayable: bool,
    #[prost(int32, tag = "7")]
    pub ttl: i32,
    #[prost(int32, tag = "8")]
    pub version: i32,
    #[prost(int64, tag = "9")]
    pub created_at: i64,
    #[prost(int64, tag = "10")]
    pub updated_at: i64,
    #[prost(message, repeated, tag = "11")]
    pub variations: ::prost::alloc::vec::Vec<Variation>,
    #[prost(message, repeated, tag = "12")]
    pub targets: ::prost::alloc::vec::Vec<Target>,
    #[prost(message, repeated, tag = "13")]
    pub rules: ::prost::alloc::vec::Vec<Rule>,
    #[prost(message, optional, tag = "14")]
    pub default_strategy: ::core::option::Option<Strategy>,
    #[prost(string, tag = "15")]
    pub off_variation: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "16")]
    pub tags: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag = "18")]
    pub maintainer: ::prost::alloc::string::String,
    #[prost(enumeration = "VariationType", tag = "19")]
    pub variation_type: i32,
    #[prost(bool, tag = "20")]
    pub archived: bool,
    #[prost(message, repeated, tag = "21")]
    pub prerequisites: ::prost::alloc::vec::Vec<Prerequisite>,
    #[prost(string, tag = "22")]
    pub sampling_seed: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum VariationType {
    String = 0,
    Boolean = 1,
    Number = 2,
    Json = 3,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Features {
    #[prost(message, repeated, tag = "1")]
    pub features: ::prost::alloc::vec::Vec<Feature>,
    #[prost(string, tag = "2")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Segment {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "4")]
    pub rules: ::prost::alloc::vec::Vec<Rule>,
    #[prost(int64, tag = "5")]
    pub created_at: i64,
    #[prost(int64, tag = "6")]
    pub updated_at: i64,
    #[prost(int64, tag = "7")]
    pub version: i64,
    #[prost(bool, tag = "8")]
    pub deleted: bool,
    #[prost(int64, tag = "9")]
    pub included_user_count: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SegmentUser {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub segment_id: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(enumeration = "SegmentUserState", tag = "4")]
    pub state: i32,
    #[prost(bool, tag = "5")]
    pub deleted: bool,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum SegmentUserState {
    Included = 0,
    Excluded = 1,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SegmentUsers {
    #[prost(string, tag = "1")]
    pub segment_id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub users: ::prost::alloc::vec::Vec<SegmentUser>,
    #[prost(int64, tag = "3")]
    pub updated_at: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Reason {
    #[prost(enumeration = "ReasonType", tag = "1")]
    pub r#type: i32,
    #[prost(string, tag = "2")]
    pub rule_id: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ReasonType {
    Target = 0,
    Rule = 1,
    Default = 3,
    Client = 4,
    OffVariation = 5,
    Prerequisite = 6,
    ErrorNoEvaluations = 7,
    ErrorFlagNotFound = 8,
    ErrorWrongType = 9,
    ErrorUserIdNotSpecified = 10,
    ErrorFeatureFlagIdNotSpecified = 11,
    ErrorException = 12,
    ErrorCacheNotFound = 13,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Evaluation {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub feature_id: ::prost::alloc::string::String,
    #[prost(int32, tag = "3")]
    pub feature_version: i32,
    #[prost(string, tag = "4")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub variation_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "7")]
    pub reason: ::core::option::Option<Reason>,
    #[prost(string, tag = "8")]
    pub variation_value: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub variation_name: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserEvaluations {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "2")]
    pub evaluations: ::prost::alloc::vec::Vec<Evaluation>,
    #[prost(int64, tag = "3")]
    pub created_at: i64,
    #[prost(string, repeated, tag = "4")]
    pub archived_feature_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(bool, tag = "5")]
    pub force_update: bool,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum UserEvaluationsState {
    Queued = 0,
    Partial = 1,
    Full = 2,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListFeaturesRequest {
    #[prost(int64, tag = "1")]
    pub page_size: i64,
    #[prost(string, tag = "2")]
    pub cursor: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub tag: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub environment_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListFeaturesResponse {
    #[prost(message, repeated, tag = "1")]
    pub features: ::prost::alloc::vec::Vec<Feature>,
    #[prost(string, tag = "2")]
    pub cursor: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub total_count: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFeatureRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub environment_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetFeatureResponse {
    #[prost(message, optional, tag = "1")]
    pub feature: ::core::option::Option<Feature>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateFeatureRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub description: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "4")]
    pub variations: ::prost::alloc::vec::Vec<Variation>,
    #[prost(string, repeated, tag = "5")]
    pub tags: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(int32, tag = "6")]
    pub default_on_variation_index: i32,
    #[prost(int32, tag = "7")]
    pub default_off_variation_index: i32,
    #[prost(enumeration = "VariationType", tag = "8")]
    pub variation_type: i32,
    #[prost(string, tag = "9")]
    pub environment_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateFeatureResponse {
    #[prost(message, optional, tag = "1")]
    pub feature: ::core::option::Option<Feature>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSegmentUsersRequest {
    #[prost(int64, tag = "1")]
    pub page_size: i64,
    #[prost(string, tag = "2")]
    pub cursor: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub segment_id: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub environment_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListSegmentUsersResponse {
    #[prost(message, repeated, tag = "1")]
    pub users: ::prost::alloc::vec::Vec<SegmentUser>,
    #[prost(string, tag = "2")]
    pub cursor: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSegmentRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub environment_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSegmentResponse {
    #[prost(message, optional, tag = "1")]
    pub segment: ::core::option::Option<Segment>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ApiKey {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "ApiKeyRole", tag = "3")]
    pub role: i32,
    #[prost(bool, tag = "4")]
    pub disabled: bool,
    #[prost(int64, tag = "5")]
    pub created_at: i64,
    #[prost(int64, tag = "6")]
    pub updated_at: i64,
    #[prost(string, tag = "7")]
    pub description: ::prost::alloc::string::String,
    #[prost(string, tag = "8")]
    pub api_key: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub maintainer: ::prost::alloc::string::String,
    #[prost(int64, tag = "10")]
    pub last_used_at: i64,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ApiKeyRole {
    Unknown = 0,
    SdkClient = 1,
    SdkServer = 2,
    PublicApiReadOnly = 3,
    PublicApiWrite = 4,
    PublicApiAdmin = 5,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Environment {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub url_code: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub project_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub organization_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "6")]
    pub archived: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnvironmentApiKey {
    #[prost(message, optional, tag = "2")]
    pub api_key: ::core::option::Option<ApiKey>,
    #[prost(bool, tag = "3")]
    pub environment_disabled: bool,
    #[prost(string, tag = "4")]
    pub project_id: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "5")]
    pub environment: ::core::option::Option<Environment>,
    #[prost(string, tag = "6")]
    pub project_url_code: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEnvironmentApiKeyRequest {
    #[prost(string, tag = "1")]
    pub api_key: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetEnvironmentApiKeyResponse {
    #[prost(message, optional, tag = "1")]
    pub environment_api_key: ::core::option::Option<EnvironmentApiKey>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateApiKeyLastUsedAtRequest {
    #[prost(string, tag = "1")]
    pub api_key_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub environment_id: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub last_used_at: i64,
}
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UpdateApiKeyLastUsedAtResponse {}

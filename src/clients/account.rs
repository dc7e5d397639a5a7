#[cfg(test)]
use mockall::automock;
use tonic::async_trait;
use tonic::Status;

use crate::proto::account::GetEnvironmentApiKeyRequest;
use crate::proto::account::GetEnvironmentApiKeyResponse;
use crate::proto::account::UpdateApiKeyLastUsedAtRequest;
use crate::proto::account::UpdateApiKeyLastUsedAtResponse;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountClient: Send + Sync + 'static {
    /// Resolves an API key token. Unknown tokens fail with
    /// [`tonic::Code::NotFound`].
    async fn get_environment_api_key(
        &self,
        req: GetEnvironmentApiKeyRequest,
    ) -> std::result::Result<GetEnvironmentApiKeyResponse, Status>;

    async fn update_api_key_last_used_at(
        &self,
        req: UpdateApiKeyLastUsedAtRequest,
    ) -> std::result::Result<UpdateApiKeyLastUsedAtResponse, Status>;
}

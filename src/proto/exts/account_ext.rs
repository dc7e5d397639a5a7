use crate::proto::account::ApiKeyRole;
use crate::proto::account::EnvironmentApiKey;

impl EnvironmentApiKey {
    pub fn environment_id(&self) -> &str {
        self.environment.as_ref().map(|e| e.id.as_str()).unwrap_or_default()
    }

    pub fn environment_url_code(&self) -> &str {
        self.environment
            .as_ref()
            .map(|e| e.url_code.as_str())
            .unwrap_or_default()
    }

    pub fn api_key_id(&self) -> &str {
        self.api_key.as_ref().map(|k| k.id.as_str()).unwrap_or_default()
    }

    pub fn role(&self) -> ApiKeyRole {
        self.api_key
            .as_ref()
            .and_then(|k| ApiKeyRole::try_from(k.role).ok())
            .unwrap_or(ApiKeyRole::Unknown)
    }

    pub fn is_api_key_disabled(&self) -> bool {
        self.api_key.as_ref().map(|k| k.disabled).unwrap_or(true)
    }
}

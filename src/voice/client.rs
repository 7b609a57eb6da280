use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::config::SessionRequest;
use super::messages::{MessageList, SessionCreated, SessionMessage, SessionStatus};
use crate::error::{ensure_success, ApiError};

/// Conversational voice-session service
#[async_trait]
pub trait VoiceSessionApi: Send + Sync {
    /// Create a session; the response carries the join URL and session id
    async fn create_session(&self, request: &SessionRequest) -> Result<SessionCreated, ApiError>;

    /// Current status of a session
    async fn session_status(&self, session_id: &str) -> Result<SessionStatus, ApiError>;

    /// Raw message list of a session
    async fn session_messages(&self, session_id: &str) -> Result<Vec<SessionMessage>, ApiError>;
}

/// HTTP implementation authenticated with an `X-API-Key` header
pub struct HttpVoiceSessionClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpVoiceSessionClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn session_url(&self, session_id: &str) -> String {
        format!("{}/{}", self.base_url, session_id)
    }
}

#[async_trait]
impl VoiceSessionApi for HttpVoiceSessionClient {
    async fn create_session(&self, request: &SessionRequest) -> Result<SessionCreated, ApiError> {
        info!("Creating voice session at {}", self.base_url);

        let response = self
            .http
            .post(&self.base_url)
            .header("X-API-Key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let created: SessionCreated = ensure_success(response).await?.json().await?;
        Ok(created)
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus, ApiError> {
        debug!("Polling voice session {}", session_id);

        let response = self
            .http
            .get(self.session_url(session_id))
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let status: SessionStatus = ensure_success(response).await?.json().await?;
        Ok(status)
    }

    async fn session_messages(&self, session_id: &str) -> Result<Vec<SessionMessage>, ApiError> {
        let response = self
            .http
            .get(format!("{}/messages", self.session_url(session_id)))
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;

        let list: MessageList = ensure_success(response).await?.json().await?;
        Ok(list.results)
    }
}

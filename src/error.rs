use thiserror::Error;

/// Failure talking to an upstream HTTP API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Everything that can stop a call from being placed or its transcript read
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    #[error("required API keys missing: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("invalid call request: {0}")]
    InvalidRequest(String),

    #[error("voice session error: {0}")]
    VoiceSession(String),

    #[error("telephony call creation failed: {0}")]
    Telephony(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("Max wait time exceeded")]
    Timeout,
}

impl CallError {
    /// Map a voice-session API failure, keeping transport faults distinct
    pub fn from_voice_session(err: ApiError) -> Self {
        match err {
            ApiError::Transport(msg) => CallError::Transport(msg),
            other => CallError::VoiceSession(other.to_string()),
        }
    }
}

/// Turn a non-2xx response into `ApiError::Status` with the body text
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

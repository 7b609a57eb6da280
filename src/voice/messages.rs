use serde::{Deserialize, Serialize};

/// Response to session creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreated {
    pub join_url: Option<String>,
    pub call_id: Option<String>,
}

/// Response to a session status query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    #[serde(default)]
    pub ended: bool,
    pub end_reason: Option<String>,
}

/// Response to a message list query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub results: Vec<SessionMessage>,
}

/// One message as recorded by the voice-session service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionMessage {
    /// e.g. `MESSAGE_ROLE_AGENT`
    pub role: Option<String>,
    pub text: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::CallError;
use crate::voice::{SessionMessage, VoiceSessionApi};

const ROLE_PREFIX: &str = "MESSAGE_ROLE_";

/// Fixed-interval polling budget for transcript retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep before every status query
    pub interval: Duration,
    /// Total wait budget; `max_wait / interval` status queries are made
    pub max_wait: Duration,
}

impl PollSettings {
    /// Number of status queries allowed (0 when the interval is zero)
    pub fn max_iterations(&self) -> u64 {
        let interval = self.interval.as_millis();
        if interval == 0 {
            return 0;
        }
        (self.max_wait.as_millis() / interval) as u64
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TranscriptRole {
    Agent,
    User,
}

impl TranscriptRole {
    /// Parse a raw role, with or without the `MESSAGE_ROLE_` prefix
    pub fn from_raw(role: &str) -> Option<Self> {
        match role.strip_prefix(ROLE_PREFIX).unwrap_or(role) {
            "AGENT" => Some(TranscriptRole::Agent),
            "USER" => Some(TranscriptRole::User),
            _ => None,
        }
    }
}

/// One utterance of a finished conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: TranscriptRole,
    pub text: String,
    /// When the entry was retrieved
    pub timestamp: DateTime<Utc>,
}

/// Result of a completed transcript wait
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptOutcome {
    pub transcript: Vec<TranscriptEntry>,
    pub end_reason: Option<String>,
}

/// Keep agent and user messages with text; drop tool messages and blanks
pub fn filter_transcript(messages: &[SessionMessage], retrieved_at: DateTime<Utc>) -> Vec<TranscriptEntry> {
    messages
        .iter()
        .filter_map(|message| {
            let text = message.text.as_deref().filter(|t| !t.is_empty())?;
            let role = TranscriptRole::from_raw(message.role.as_deref().unwrap_or("UNKNOWN"))?;
            Some(TranscriptEntry {
                role,
                text: text.to_string(),
                timestamp: retrieved_at,
            })
        })
        .collect()
}

/// Poll the session until it reports `ended`, then fetch its messages.
///
/// Any request failure ends the wait immediately. Running out of iterations
/// yields `CallError::Timeout`.
pub async fn wait_for_transcript(
    api: &dyn VoiceSessionApi,
    session_id: &str,
    settings: &PollSettings,
) -> Result<TranscriptOutcome, CallError> {
    let max_iterations = settings.max_iterations();
    info!(
        "Waiting for session {} to end (up to {} checks every {:?})",
        session_id, max_iterations, settings.interval
    );

    for attempt in 1..=max_iterations {
        tokio::time::sleep(settings.interval).await;

        let status = api
            .session_status(session_id)
            .await
            .map_err(CallError::from_voice_session)?;

        if !status.ended {
            continue;
        }

        info!("Session {} ended after {} check(s)", session_id, attempt);

        let messages = api
            .session_messages(session_id)
            .await
            .map_err(CallError::from_voice_session)?;

        let transcript = filter_transcript(&messages, Utc::now());
        info!(
            "Transcript for {}: {} of {} messages kept",
            session_id,
            transcript.len(),
            messages.len()
        );

        return Ok(TranscriptOutcome {
            transcript,
            end_reason: status.end_reason,
        });
    }

    warn!("Session {} did not end within {:?}", session_id, settings.max_wait);
    Err(CallError::Timeout)
}

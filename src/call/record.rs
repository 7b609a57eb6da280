use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::transcript::{TranscriptEntry, TranscriptOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Both upstream APIs accepted the call
    Initiated,
    /// The session ended and its transcript was retrieved
    Completed,
}

/// A successfully placed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Voice-session id
    pub session_id: String,
    /// Telephony provider call id
    pub telephony_call_id: String,
    pub timestamp: DateTime<Utc>,
    pub customer_name: String,
    pub destination_phone: String,
    pub status: CallStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<TranscriptEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<String>,
}

impl CallRecord {
    pub fn attach_transcript(&mut self, outcome: TranscriptOutcome) {
        self.transcript = Some(outcome.transcript);
        self.end_reason = outcome.end_reason;
        self.status = CallStatus::Completed;
    }
}

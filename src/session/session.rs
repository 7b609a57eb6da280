use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;

use super::history::CallHistory;
use super::stats::SessionStats;
use crate::call::{CallRecord, TranscriptOutcome};
use crate::prompt::CustomParam;

/// One operator's in-memory workspace: custom parameters and call history.
/// Nothing here outlives the session.
pub struct OperatorSession {
    id: String,

    created_at: DateTime<Utc>,

    /// Ad-hoc template parameters, in the order they were added
    custom_params: Mutex<Vec<CustomParam>>,

    /// Calls placed from this session
    history: RwLock<CallHistory>,

    /// Last time the operator touched this session
    last_activity: RwLock<Instant>,
}

impl OperatorSession {
    pub fn new() -> Self {
        Self::with_id(format!("op-{}", uuid::Uuid::new_v4()))
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        let id = id.into();
        info!("Opening operator session: {}", id);

        Self {
            id,
            created_at: Utc::now(),
            custom_params: Mutex::new(Vec::new()),
            history: RwLock::new(CallHistory::new()),
            last_activity: RwLock::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub async fn touch(&self) {
        *self.last_activity.write().await = Instant::now();
    }

    /// No operator activity for longer than `timeout`
    pub async fn is_idle(&self, timeout: Duration) -> bool {
        self.last_activity.read().await.elapsed() > timeout
    }

    pub async fn add_param(&self, param: CustomParam) -> Vec<CustomParam> {
        let mut params = self.custom_params.lock().await;
        params.push(param);
        params.clone()
    }

    /// Remove by position; `None` if out of range
    pub async fn remove_param(&self, index: usize) -> Option<CustomParam> {
        let mut params = self.custom_params.lock().await;
        if index < params.len() {
            Some(params.remove(index))
        } else {
            None
        }
    }

    pub async fn custom_params(&self) -> Vec<CustomParam> {
        self.custom_params.lock().await.clone()
    }

    pub async fn record_call(&self, record: CallRecord) {
        info!(
            "Session {}: recorded call {} to {}",
            self.id, record.session_id, record.destination_phone
        );
        self.history.write().await.push(record);
    }

    /// Oldest first
    pub async fn history(&self) -> Vec<CallRecord> {
        self.history.read().await.records().to_vec()
    }

    pub async fn active_call(&self) -> Option<CallRecord> {
        self.history.read().await.latest().cloned()
    }

    pub async fn find_call(&self, session_id: &str) -> Option<CallRecord> {
        self.history.read().await.find(session_id).cloned()
    }

    pub async fn attach_transcript(&self, session_id: &str, outcome: TranscriptOutcome) -> Option<CallRecord> {
        self.history
            .write()
            .await
            .attach_transcript(session_id, outcome)
            .cloned()
    }

    pub async fn get_stats(&self) -> SessionStats {
        let history = self.history.read().await;
        SessionStats {
            session_id: self.id.clone(),
            created_at: self.created_at,
            calls_count: history.len(),
            completed_count: history.completed_count(),
            custom_params_count: self.custom_params.lock().await.len(),
        }
    }
}

impl Default for OperatorSession {
    fn default() -> Self {
        Self::new()
    }
}

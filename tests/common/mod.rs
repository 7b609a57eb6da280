// In-memory stand-ins for the upstream APIs, shared by integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use dialdesk::error::ApiError;
use dialdesk::telephony::{OutboundCall, TelephonyApi};
use dialdesk::voice::{SessionCreated, SessionMessage, SessionRequest, SessionStatus, VoiceSessionApi};
use dialdesk::{CallOrchestrator, Credentials, PollSettings};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct FakeVoiceSession {
    pub create_result: Result<SessionCreated, ApiError>,
    /// Returned in order; once drained every status is "not ended"
    pub statuses: Mutex<VecDeque<Result<SessionStatus, ApiError>>>,
    pub messages: Result<Vec<SessionMessage>, ApiError>,
    pub requests: Mutex<Vec<SessionRequest>>,
    pub status_calls: AtomicUsize,
    pub message_calls: AtomicUsize,
}

impl FakeVoiceSession {
    pub fn new() -> Self {
        Self {
            create_result: Ok(SessionCreated {
                join_url: Some("wss://voice.example/join/abc?token=1&x=2".to_string()),
                call_id: Some("session-123".to_string()),
            }),
            statuses: Mutex::new(VecDeque::new()),
            messages: Ok(Vec::new()),
            requests: Mutex::new(Vec::new()),
            status_calls: AtomicUsize::new(0),
            message_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_create_result(mut self, result: Result<SessionCreated, ApiError>) -> Self {
        self.create_result = result;
        self
    }

    pub fn with_statuses(self, statuses: Vec<Result<SessionStatus, ApiError>>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    pub fn with_messages(mut self, messages: Vec<SessionMessage>) -> Self {
        self.messages = Ok(messages);
        self
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn message_calls(&self) -> usize {
        self.message_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl VoiceSessionApi for FakeVoiceSession {
    async fn create_session(&self, request: &SessionRequest) -> Result<SessionCreated, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.create_result.clone()
    }

    async fn session_status(&self, _session_id: &str) -> Result<SessionStatus, ApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SessionStatus::default()))
    }

    async fn session_messages(&self, _session_id: &str) -> Result<Vec<SessionMessage>, ApiError> {
        self.message_calls.fetch_add(1, Ordering::SeqCst);
        self.messages.clone()
    }
}

pub struct FakeTelephony {
    pub result: Result<String, ApiError>,
    pub calls: Mutex<Vec<OutboundCall>>,
}

impl FakeTelephony {
    pub fn succeeding(sid: &str) -> Self {
        Self {
            result: Ok(sid.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            result: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TelephonyApi for FakeTelephony {
    async fn create_call(&self, call: &OutboundCall) -> Result<String, ApiError> {
        self.calls.lock().unwrap().push(call.clone());
        self.result.clone()
    }
}

pub fn full_credentials() -> Credentials {
    Credentials::from_lookup(|name| Some(format!("{}-value", name.to_lowercase())))
}

pub fn ended(reason: &str) -> Result<SessionStatus, ApiError> {
    Ok(SessionStatus {
        ended: true,
        end_reason: Some(reason.to_string()),
    })
}

pub fn running() -> Result<SessionStatus, ApiError> {
    Ok(SessionStatus::default())
}

pub fn message(role: &str, text: &str) -> SessionMessage {
    SessionMessage {
        role: Some(role.to_string()),
        text: Some(text.to_string()),
    }
}

pub fn default_poll() -> PollSettings {
    PollSettings {
        interval: Duration::from_secs(5),
        max_wait: Duration::from_secs(120),
    }
}

pub fn orchestrator(
    credentials: Credentials,
    voice: Arc<FakeVoiceSession>,
    telephony: Arc<FakeTelephony>,
) -> CallOrchestrator {
    CallOrchestrator::new(credentials, voice, telephony, default_poll(), "fixie-ai/ultravox")
}

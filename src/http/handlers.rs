use super::state::AppState;
use crate::call::{render_prompt, CallForm, CallPlan, CallRecord};
use crate::catalog::{UseCase, UseCaseSummary};
use crate::error::CallError;
use crate::prompt::{placeholders, CustomParam, CustomerOverrides};
use crate::session::{OperatorSession, SessionStats};
use crate::voice::{VoiceConfig, ELEVENLABS_MODELS};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct UseCaseDetails {
    pub id: String,
    #[serde(flatten)]
    pub use_case: UseCase,
    /// Voice resolved from the call settings
    pub resolved_voice: VoiceConfig,
    pub resolved_temperature: f64,
    /// Placeholder keys the prompt template references
    pub placeholders: Vec<String>,
    pub elevenlabs_models: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub use_case_id: String,

    /// Include this operator session's custom parameters
    pub session_id: Option<String>,

    /// Edited template (defaults to the use case prompt)
    pub system_prompt: Option<String>,

    #[serde(default)]
    pub customer: CustomerOverrides,

    #[serde(default)]
    pub custom_params: Vec<CustomParam>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub formatted_prompt: String,
    /// Placeholders left without a value
    pub unresolved: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct AddParamRequest {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct InitiateCallResponse {
    pub message: String,
    pub summary: String,
    pub record: CallRecord,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Missing credential names, when that is the cause
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<&'static str>,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            missing: Vec::new(),
        }),
    )
        .into_response()
}

fn call_error_response(err: CallError) -> Response {
    let status = match &err {
        CallError::MissingCredentials(_) => StatusCode::PRECONDITION_FAILED,
        CallError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        CallError::VoiceSession(_) | CallError::Telephony(_) | CallError::Transport(_) => {
            StatusCode::BAD_GATEWAY
        }
        CallError::Timeout => StatusCode::GATEWAY_TIMEOUT,
    };

    let missing = match &err {
        CallError::MissingCredentials(names) => names.clone(),
        _ => Vec::new(),
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            missing,
        }),
    )
        .into_response()
}

fn session_not_found(session_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Session {} not found", session_id),
    )
}

fn use_case_not_found(use_case_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Use case {} not found", use_case_id),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /use-cases
pub async fn list_use_cases(State(state): State<AppState>) -> Json<Vec<UseCaseSummary>> {
    Json(state.catalog.summaries())
}

/// GET /use-cases/:use_case_id
pub async fn get_use_case(
    State(state): State<AppState>,
    Path(use_case_id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.get(&use_case_id) {
        Some(use_case) => (
            StatusCode::OK,
            Json(UseCaseDetails {
                id: use_case_id.clone(),
                resolved_voice: use_case.voice_config(),
                resolved_temperature: use_case.temperature(),
                placeholders: placeholders(&use_case.ai_prompt),
                elevenlabs_models: ELEVENLABS_MODELS.to_vec(),
                use_case: use_case.clone(),
            }),
        )
            .into_response(),
        None => use_case_not_found(&use_case_id),
    }
}

/// GET /credentials/status
pub async fn credential_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.orchestrator.credential_status())
}

/// POST /prompt/preview
/// Render the prompt exactly as it would be sent, without placing a call
pub async fn preview_prompt(
    State(state): State<AppState>,
    Json(req): Json<PreviewRequest>,
) -> impl IntoResponse {
    let Some(use_case) = state.catalog.get(&req.use_case_id) else {
        return use_case_not_found(&req.use_case_id);
    };

    let session_params = match &req.session_id {
        Some(session_id) => match state.session(session_id).await {
            Some(session) => session.custom_params().await,
            None => return session_not_found(session_id),
        },
        None => Vec::new(),
    };

    let template = req.system_prompt.as_deref().unwrap_or(&use_case.ai_prompt);
    let formatted_prompt = render_prompt(
        use_case,
        template,
        &req.customer,
        &session_params,
        &req.custom_params,
    );
    let unresolved = placeholders(&formatted_prompt);

    (
        StatusCode::OK,
        Json(PreviewResponse {
            formatted_prompt,
            unresolved,
        }),
    )
        .into_response()
}

/// POST /sessions
/// Open a new operator session
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session = Arc::new(OperatorSession::new());
    let response = CreateSessionResponse {
        session_id: session.id().to_string(),
        created_at: session.created_at(),
    };

    state
        .sessions
        .write()
        .await
        .insert(response.session_id.clone(), session);

    (StatusCode::CREATED, Json(response))
}

/// GET /sessions/:session_id
pub async fn get_session_stats(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => {
            let stats: SessionStats = session.get_stats().await;
            (StatusCode::OK, Json(stats)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// DELETE /sessions/:session_id
/// End an operator session; its history is discarded
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => {
            info!("Operator session {} ended", session_id);
            (StatusCode::OK, Json(session.get_stats().await)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/params
pub async fn list_params(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => (StatusCode::OK, Json(session.custom_params().await)).into_response(),
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/params
pub async fn add_param(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<AddParamRequest>,
) -> impl IntoResponse {
    let Some(session) = state.session(&session_id).await else {
        return session_not_found(&session_id);
    };

    match CustomParam::new(req.key, req.value) {
        Some(param) => (StatusCode::OK, Json(session.add_param(param).await)).into_response(),
        None => error_response(
            StatusCode::BAD_REQUEST,
            "Parameter key and value must both be non-empty",
        ),
    }
}

/// DELETE /sessions/:session_id/params/:index
pub async fn remove_param(
    State(state): State<AppState>,
    Path((session_id, index)): Path<(String, usize)>,
) -> impl IntoResponse {
    let Some(session) = state.session(&session_id).await else {
        return session_not_found(&session_id);
    };

    match session.remove_param(index).await {
        Some(_) => (StatusCode::OK, Json(session.custom_params().await)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No custom parameter at index {}", index),
        ),
    }
}

/// POST /sessions/:session_id/calls
/// Place a call; the record is kept only when both upstream steps succeed
pub async fn initiate_call(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(form): Json<CallForm>,
) -> impl IntoResponse {
    let Some(session) = state.session(&session_id).await else {
        return session_not_found(&session_id);
    };
    let Some(use_case) = state.catalog.get(&form.use_case_id) else {
        return use_case_not_found(&form.use_case_id);
    };

    let session_params = session.custom_params().await;
    let plan = match CallPlan::resolve(
        use_case,
        &form,
        &session_params,
        state.orchestrator.default_model(),
    ) {
        Ok(plan) => plan,
        Err(e) => {
            warn!("Rejected call request: {}", e);
            return call_error_response(e);
        }
    };

    match state.orchestrator.initiate_call(&plan).await {
        Ok(record) => {
            session.record_call(record.clone()).await;
            (
                StatusCode::OK,
                Json(InitiateCallResponse {
                    message: format!(
                        "Call initiated successfully! Twilio SID: {}",
                        record.telephony_call_id
                    ),
                    summary: plan.summary(),
                    record,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Call failed: {}", e);
            call_error_response(e)
        }
    }
}

/// GET /sessions/:session_id/calls
/// Call history, oldest first
pub async fn list_calls(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.session(&session_id).await {
        Some(session) => (StatusCode::OK, Json(session.history().await)).into_response(),
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/calls/active
/// Most recently placed call
pub async fn active_call(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(session) = state.session(&session_id).await else {
        return session_not_found(&session_id);
    };

    match session.active_call().await {
        Some(record) => (StatusCode::OK, Json(record)).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "No call placed in this session yet"),
    }
}

/// POST /sessions/:session_id/calls/:call_id/transcript
/// Wait for the call to end and store its transcript on the record
pub async fn fetch_transcript(
    State(state): State<AppState>,
    Path((session_id, call_id)): Path<(String, String)>,
) -> impl IntoResponse {
    let Some(session) = state.session(&session_id).await else {
        return session_not_found(&session_id);
    };

    if session.find_call(&call_id).await.is_none() {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Call {} not found in session {}", call_id, session_id),
        );
    }

    match state.orchestrator.fetch_transcript(&call_id).await {
        Ok(outcome) => match session.attach_transcript(&call_id, outcome).await {
            Some(record) => (StatusCode::OK, Json(record)).into_response(),
            None => error_response(
                StatusCode::NOT_FOUND,
                format!("Call {} not found in session {}", call_id, session_id),
            ),
        },
        Err(e) => {
            error!("Transcript retrieval for {} failed: {}", call_id, e);
            call_error_response(e)
        }
    }
}

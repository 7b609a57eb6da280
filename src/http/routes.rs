use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all API routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Configuration
        .route("/use-cases", get(handlers::list_use_cases))
        .route("/use-cases/:use_case_id", get(handlers::get_use_case))
        .route("/credentials/status", get(handlers::credential_status))
        .route("/prompt/preview", post(handlers::preview_prompt))
        // Operator sessions
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:session_id",
            get(handlers::get_session_stats).delete(handlers::end_session),
        )
        .route(
            "/sessions/:session_id/params",
            get(handlers::list_params).post(handlers::add_param),
        )
        .route(
            "/sessions/:session_id/params/:index",
            delete(handlers::remove_param),
        )
        // Calls
        .route(
            "/sessions/:session_id/calls",
            get(handlers::list_calls).post(handlers::initiate_call),
        )
        .route(
            "/sessions/:session_id/calls/active",
            get(handlers::active_call),
        )
        .route(
            "/sessions/:session_id/calls/:call_id/transcript",
            post(handlers::fetch_transcript),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes plus the operator form page served from `static_dir`
pub fn create_app(state: AppState, static_dir: &str) -> Router {
    create_router(state).fallback_service(ServeDir::new(static_dir))
}

//! HTTP API server backing the operator control panel
//!
//! This module provides a REST API for configuring and placing calls:
//! - GET /use-cases, GET /use-cases/:id - Browse use cases
//! - GET /credentials/status - Required/optional secret status
//! - POST /prompt/preview - Render the prompt without calling
//! - POST /sessions, GET|DELETE /sessions/:id - Operator sessions
//! - GET|POST /sessions/:id/params, DELETE /sessions/:id/params/:index - Custom parameters
//! - GET|POST /sessions/:id/calls - Call history / place a call
//! - GET /sessions/:id/calls/active - Most recent call
//! - POST /sessions/:id/calls/:call_id/transcript - Wait for and store the transcript
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::{create_app, create_router};
pub use state::AppState;

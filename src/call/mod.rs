//! Call orchestration
//!
//! This module turns an operator's form into an outbound call:
//! - resolving the use case, overrides and custom parameters into a plan
//! - creating the voice session and bridging it into a telephony call
//! - polling the finished session for its transcript

mod orchestrator;
mod plan;
mod record;
mod transcript;

pub use orchestrator::CallOrchestrator;
pub use plan::{render_prompt, CallForm, CallPlan, VoiceForm, DEFAULT_CUSTOMER_NAME};
pub use record::{CallRecord, CallStatus};
pub use transcript::{
    filter_transcript, wait_for_transcript, PollSettings, TranscriptEntry, TranscriptOutcome,
    TranscriptRole,
};

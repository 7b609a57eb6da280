pub mod call;
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod prompt;
pub mod session;
pub mod telephony;
pub mod voice;

pub use call::{
    CallForm, CallOrchestrator, CallPlan, CallRecord, CallStatus, PollSettings, TranscriptEntry,
    TranscriptOutcome, TranscriptRole,
};
pub use catalog::{UseCase, UseCaseCatalog};
pub use config::Config;
pub use credentials::{CredentialStatus, Credentials};
pub use error::{ApiError, CallError};
pub use http::{create_app, create_router, AppState};
pub use prompt::{format_prompt, CustomParam, CustomerData, CustomerOverrides};
pub use session::{CallHistory, OperatorSession, SessionStats};
pub use telephony::{OutboundCall, TelephonyApi, TwilioClient};
pub use voice::{HttpVoiceSessionClient, SessionRequest, VoiceConfig, VoiceSessionApi};

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::plan::CallPlan;
use super::record::{CallRecord, CallStatus};
use super::transcript::{wait_for_transcript, PollSettings, TranscriptOutcome};
use crate::config::Config;
use crate::credentials::{CredentialStatus, Credentials};
use crate::error::CallError;
use crate::telephony::{connect_stream_twiml, OutboundCall, TelephonyApi, TwilioClient};
use crate::voice::{HttpVoiceSessionClient, VoiceSessionApi};

/// Places calls by bridging a voice session into a telephony call
pub struct CallOrchestrator {
    credentials: Credentials,
    voice_api: Arc<dyn VoiceSessionApi>,
    telephony: Arc<dyn TelephonyApi>,
    poll: PollSettings,
    default_model: String,
}

impl CallOrchestrator {
    pub fn new(
        credentials: Credentials,
        voice_api: Arc<dyn VoiceSessionApi>,
        telephony: Arc<dyn TelephonyApi>,
        poll: PollSettings,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            voice_api,
            telephony,
            poll,
            default_model: default_model.into(),
        }
    }

    /// Wire the HTTP clients from service configuration and secrets
    pub fn from_config(config: &Config, credentials: Credentials) -> Self {
        let voice_url = credentials
            .voice_session_api_url
            .clone()
            .unwrap_or_else(|| config.voice_session.base_url.clone());

        let voice_api = HttpVoiceSessionClient::new(
            voice_url,
            credentials.voice_session_api_key.clone().unwrap_or_default(),
        );
        let telephony = TwilioClient::new(
            &config.telephony.base_url,
            credentials.telephony_account_sid.clone().unwrap_or_default(),
            credentials.telephony_auth_token.clone().unwrap_or_default(),
        );

        Self::new(
            credentials,
            Arc::new(voice_api),
            Arc::new(telephony),
            config.poll_settings(),
            &config.voice_session.default_model,
        )
    }

    pub fn credential_status(&self) -> CredentialStatus {
        CredentialStatus::from(&self.credentials)
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn poll_settings(&self) -> PollSettings {
        self.poll
    }

    /// Create the voice session, then the telephony call bridged to it.
    ///
    /// A record is returned only when both steps succeed; a failure at either
    /// step is reported as that step's error.
    pub async fn initiate_call(&self, plan: &CallPlan) -> Result<CallRecord, CallError> {
        let missing = self.credentials.missing_required();
        if !missing.is_empty() {
            warn!("Refusing to place call, missing credentials: {}", missing.join(", "));
            return Err(CallError::MissingCredentials(missing));
        }

        let optional_missing = self.credentials.missing_optional();
        if !optional_missing.is_empty() {
            info!("Optional API keys not configured: {}", optional_missing.join(", "));
        }

        info!("{}", plan.summary());

        let created = self
            .voice_api
            .create_session(&plan.session_request())
            .await
            .map_err(|e| {
                error!("Voice session creation failed: {}", e);
                CallError::VoiceSession(e.to_string())
            })?;

        let join_url = created
            .join_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| CallError::VoiceSession("API did not return a valid joinUrl".to_string()))?;
        let session_id = created
            .call_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CallError::VoiceSession("API did not return a callId".to_string()))?;

        info!("Voice session {} created", session_id);

        let outbound = OutboundCall {
            to: plan.destination_phone.clone(),
            from: plan.from_phone.clone(),
            twiml: connect_stream_twiml(&join_url),
        };

        let telephony_call_id = self.telephony.create_call(&outbound).await.map_err(|e| {
            error!(
                "Telephony call failed after voice session {} was created: {}",
                session_id, e
            );
            CallError::Telephony(e.to_string())
        })?;

        info!(
            "Call initiated successfully! session={} telephony_sid={}",
            session_id, telephony_call_id
        );

        Ok(CallRecord {
            session_id,
            telephony_call_id,
            timestamp: Utc::now(),
            customer_name: plan.customer_name.clone(),
            destination_phone: plan.destination_phone.clone(),
            status: CallStatus::Initiated,
            transcript: None,
            end_reason: None,
        })
    }

    /// Block until the session ends (or the wait budget runs out) and return
    /// its filtered transcript
    pub async fn fetch_transcript(&self, session_id: &str) -> Result<TranscriptOutcome, CallError> {
        wait_for_transcript(self.voice_api.as_ref(), session_id, &self.poll).await
    }
}

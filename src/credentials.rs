//! Credential store for the upstream services.
//!
//! Secrets come from an optional TOML file with a `[secrets]` table and from
//! process environment variables of the same names. The environment wins.
//! Empty values count as absent.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use tracing::info;

pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const ULTRAVOX_API_KEY: &str = "ULTRAVOX_API_KEY";
pub const ELEVENLABS_API_KEY: &str = "ELEVENLABS_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ULTRAVOX_API_URL: &str = "ULTRAVOX_API_URL";

/// Secrets that must be present before a call can be placed, in report order
pub const REQUIRED_SECRETS: [&str; 4] = [
    TWILIO_ACCOUNT_SID,
    TWILIO_AUTH_TOKEN,
    ULTRAVOX_API_KEY,
    ELEVENLABS_API_KEY,
];

/// Extended AI backend keys; reported but never block a call
pub const OPTIONAL_SECRETS: [&str; 3] = [OPENAI_API_KEY, ANTHROPIC_API_KEY, GOOGLE_API_KEY];

#[derive(Clone, Default)]
pub struct Credentials {
    pub telephony_account_sid: Option<String>,
    pub telephony_auth_token: Option<String>,
    pub voice_session_api_key: Option<String>,
    pub tts_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    /// Overrides the configured voice-session base URL when set
    pub voice_session_api_url: Option<String>,
}

impl Credentials {
    /// Build from any name → value lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            telephony_account_sid: get(TWILIO_ACCOUNT_SID),
            telephony_auth_token: get(TWILIO_AUTH_TOKEN),
            voice_session_api_key: get(ULTRAVOX_API_KEY),
            tts_api_key: get(ELEVENLABS_API_KEY),
            openai_api_key: get(OPENAI_API_KEY),
            anthropic_api_key: get(ANTHROPIC_API_KEY),
            google_api_key: get(GOOGLE_API_KEY),
            voice_session_api_url: get(ULTRAVOX_API_URL),
        }
    }

    /// Secrets file (if given and present) overlaid by the process environment
    pub fn load(path: Option<&str>) -> Result<Self> {
        let file_secrets = match path {
            Some(path) => read_secrets_file(path)?,
            None => HashMap::new(),
        };

        let credentials = Self::from_lookup(|name| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| lookup_ignore_case(&file_secrets, name))
        });

        info!(
            "Credentials loaded ({} of {} required present)",
            REQUIRED_SECRETS.len() - credentials.missing_required().len(),
            REQUIRED_SECRETS.len()
        );

        Ok(credentials)
    }

    fn value(&self, name: &str) -> Option<&str> {
        let value = match name {
            TWILIO_ACCOUNT_SID => &self.telephony_account_sid,
            TWILIO_AUTH_TOKEN => &self.telephony_auth_token,
            ULTRAVOX_API_KEY => &self.voice_session_api_key,
            ELEVENLABS_API_KEY => &self.tts_api_key,
            OPENAI_API_KEY => &self.openai_api_key,
            ANTHROPIC_API_KEY => &self.anthropic_api_key,
            GOOGLE_API_KEY => &self.google_api_key,
            ULTRAVOX_API_URL => &self.voice_session_api_url,
            _ => return None,
        };
        value.as_deref()
    }

    /// Names of absent required secrets, always in `REQUIRED_SECRETS` order
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_SECRETS
            .into_iter()
            .filter(|name| self.value(name).is_none())
            .collect()
    }

    /// Names of absent optional secrets, always in `OPTIONAL_SECRETS` order
    pub fn missing_optional(&self) -> Vec<&'static str> {
        OPTIONAL_SECRETS
            .into_iter()
            .filter(|name| self.value(name).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| if v.is_some() { "[REDACTED]" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("telephony_account_sid", &redact(&self.telephony_account_sid))
            .field("telephony_auth_token", &redact(&self.telephony_auth_token))
            .field("voice_session_api_key", &redact(&self.voice_session_api_key))
            .field("tts_api_key", &redact(&self.tts_api_key))
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("google_api_key", &redact(&self.google_api_key))
            .field("voice_session_api_url", &self.voice_session_api_url)
            .finish()
    }
}

/// Snapshot of which secrets are configured, as shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CredentialStatus {
    pub missing_required: Vec<&'static str>,
    pub missing_optional: Vec<&'static str>,
}

impl From<&Credentials> for CredentialStatus {
    fn from(credentials: &Credentials) -> Self {
        Self {
            missing_required: credentials.missing_required(),
            missing_optional: credentials.missing_optional(),
        }
    }
}

fn read_secrets_file(path: &str) -> Result<HashMap<String, String>> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .build()
        .with_context(|| format!("Failed to read secrets file {}", path))?;

    match settings.get::<HashMap<String, String>>("secrets") {
        Ok(table) => Ok(table),
        Err(config::ConfigError::NotFound(_)) => Ok(HashMap::new()),
        Err(e) => Err(e).with_context(|| format!("Invalid [secrets] table in {}", path)),
    }
}

fn lookup_ignore_case(table: &HashMap<String, String>, name: &str) -> Option<String> {
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.clone())
}

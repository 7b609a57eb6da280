use anyhow::{Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::call::PollSettings;

/// Default voice-session endpoint (create / status / messages live under it)
pub const DEFAULT_VOICE_SESSION_URL: &str = "https://api.ultravox.ai/api/calls";

/// Default telephony REST host
pub const DEFAULT_TELEPHONY_URL: &str = "https://api.twilio.com";

/// Default conversation model sent with every session request
pub const DEFAULT_MODEL: &str = "fixie-ai/ultravox";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub use_cases: UseCasesConfig,
    pub voice_session: VoiceSessionConfig,
    pub telephony: TelephonyConfig,
    pub transcript: TranscriptConfig,
    pub sessions: SessionsConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    /// Directory holding the operator form page
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UseCasesConfig {
    /// JSON document with `use_cases` (or the flat single-use-case layout)
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceSessionConfig {
    pub base_url: String,
    pub default_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelephonyConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptConfig {
    pub poll_interval_secs: u64,
    pub max_wait_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionsConfig {
    /// Operator sessions untouched for this long are discarded
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl SessionsConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Never zero; `tokio::time::interval` rejects a zero period
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretsConfig {
    /// Optional TOML file with a `[secrets]` table; environment variables win
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

impl Config {
    /// Load configuration from `path` (any format the `config` crate detects,
    /// extension optional), falling back to built-in defaults for missing keys.
    ///
    /// Environment overrides use the `DIALDESK__` prefix with `__` between
    /// sections, e.g. `DIALDESK__SERVICE__HTTP__PORT=9000`.
    pub fn load(path: &str) -> Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("DIALDESK").separator("__"))
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Built-in defaults only, without reading files or the environment
    pub fn defaults() -> Result<Self> {
        let settings = Self::builder()?.build()?;
        Ok(settings.try_deserialize()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("service.name", "dialdesk")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8080_i64)?
            .set_default("service.static_dir", "static")?
            .set_default("use_cases.path", "config/call_config.json")?
            .set_default("voice_session.base_url", DEFAULT_VOICE_SESSION_URL)?
            .set_default("voice_session.default_model", DEFAULT_MODEL)?
            .set_default("telephony.base_url", DEFAULT_TELEPHONY_URL)?
            .set_default("transcript.poll_interval_secs", 5_i64)?
            .set_default("transcript.max_wait_secs", 120_i64)?
            .set_default("sessions.idle_timeout_secs", 3600_i64)?
            .set_default("sessions.sweep_interval_secs", 60_i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?)
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(self.transcript.poll_interval_secs),
            max_wait: Duration::from_secs(self.transcript.max_wait_secs),
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::prompt::CustomerData;
use crate::voice::{clamp_temperature, VoiceConfig, DEFAULT_TEMPERATURE};

/// Named bundle of customer defaults, call settings and prompt template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UseCase {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Default template values (field → JSON scalar)
    #[serde(default)]
    pub customer_info: BTreeMap<String, Value>,

    #[serde(default)]
    pub call_settings: CallSettings,

    /// Prompt template with `{{field}}` placeholders
    #[serde(default)]
    pub ai_prompt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallSettings {
    /// Caller id used for the outbound leg
    pub twilio_phone_number: Option<String>,
    pub voice: Option<VoiceSettings>,
    pub temperature: Option<f64>,
    pub model: Option<String>,
}

/// Voice as written in the use case file: either a bare built-in voice name
/// or an object with a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VoiceSettings {
    Named(String),
    Detailed {
        provider: Option<String>,
        #[serde(rename = "voiceId")]
        voice_id: Option<String>,
        model: Option<String>,
        voice: Option<String>,
    },
}

impl VoiceSettings {
    pub fn to_voice_config(&self) -> VoiceConfig {
        match self {
            VoiceSettings::Named(name) => VoiceConfig::from_parts(None, None, None, Some(name.as_str())),
            VoiceSettings::Detailed {
                provider,
                voice_id,
                model,
                voice,
            } => VoiceConfig::from_parts(
                provider.as_deref(),
                voice_id.as_deref(),
                model.as_deref(),
                voice.as_deref(),
            ),
        }
    }
}

impl UseCase {
    pub fn customer_defaults(&self) -> CustomerData {
        CustomerData::from_defaults(&self.customer_info)
    }

    /// A string-valued customer field, if present and non-empty
    pub fn customer_field(&self, key: &str) -> Option<String> {
        self.customer_info
            .get(key)
            .map(crate::prompt::value_to_string)
            .filter(|v| !v.is_empty())
    }

    pub fn voice_config(&self) -> VoiceConfig {
        self.call_settings
            .voice
            .as_ref()
            .map(VoiceSettings::to_voice_config)
            .unwrap_or_default()
    }

    pub fn temperature(&self) -> f64 {
        clamp_temperature(self.call_settings.temperature.unwrap_or(DEFAULT_TEMPERATURE))
    }

    pub fn from_phone(&self) -> Option<&str> {
        self.call_settings
            .twilio_phone_number
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }

    pub fn model(&self) -> Option<&str> {
        self.call_settings.model.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// Listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseCaseSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

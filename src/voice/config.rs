use serde::{Deserialize, Serialize};

/// Provider string that selects the external (ElevenLabs) voice
pub const ELEVENLABS_PROVIDER: &str = "elevenlabs";

/// Built-in voice used when none is configured
pub const DEFAULT_BUILT_IN_VOICE: &str = "Maansvi";

pub const DEFAULT_ELEVENLABS_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

pub const DEFAULT_ELEVENLABS_MODEL: &str = "eleven_turbo_v2_5";

/// ElevenLabs models offered on the operator form
pub const ELEVENLABS_MODELS: [&str; 3] = [
    "eleven_turbo_v2_5",
    "eleven_multilingual_v2",
    "eleven_monolingual_v1",
];

pub const DEFAULT_TEMPERATURE: f64 = 0.3;

/// Which voice speaks for the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "kebab-case")]
pub enum VoiceConfig {
    /// Voice hosted by the voice-session service itself
    BuiltIn { voice: String },
    /// ElevenLabs voice streamed through the voice-session service
    #[serde(rename = "elevenlabs")]
    ElevenLabs {
        #[serde(rename = "voiceId")]
        voice_id: String,
        model: String,
    },
}

impl VoiceConfig {
    pub fn built_in(voice: impl Into<String>) -> Self {
        VoiceConfig::BuiltIn {
            voice: voice.into(),
        }
    }

    pub fn eleven_labs(voice_id: impl Into<String>, model: impl Into<String>) -> Self {
        VoiceConfig::ElevenLabs {
            voice_id: voice_id.into(),
            model: model.into(),
        }
    }

    /// Resolve loosely-typed settings: `"elevenlabs"` picks the external voice,
    /// any other provider (or none) picks the built-in one. Missing fields fall
    /// back to the defaults.
    pub fn from_parts(
        provider: Option<&str>,
        voice_id: Option<&str>,
        model: Option<&str>,
        voice: Option<&str>,
    ) -> Self {
        fn non_empty(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if provider == Some(ELEVENLABS_PROVIDER) {
            Self::eleven_labs(
                non_empty(voice_id).unwrap_or(DEFAULT_ELEVENLABS_VOICE_ID),
                non_empty(model).unwrap_or(DEFAULT_ELEVENLABS_MODEL),
            )
        } else {
            Self::built_in(non_empty(voice).unwrap_or(DEFAULT_BUILT_IN_VOICE))
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            VoiceConfig::BuiltIn { .. } => "built-in",
            VoiceConfig::ElevenLabs { .. } => ELEVENLABS_PROVIDER,
        }
    }

    /// Voice id (external) or voice name (built-in)
    pub fn label(&self) -> &str {
        match self {
            VoiceConfig::BuiltIn { voice } => voice,
            VoiceConfig::ElevenLabs { voice_id, .. } => voice_id,
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::built_in(DEFAULT_BUILT_IN_VOICE)
    }
}

/// Body of the session-creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub system_prompt: String,
    pub model: String,
    pub temperature: f64,
    pub first_speaker_settings: FirstSpeakerSettings,
    pub medium: Medium,
    /// Sent as `null` when an external voice is used
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_voice: Option<ExternalVoice>,
}

/// The callee speaks first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstSpeakerSettings {
    pub user: EmptyObject,
}

/// Media is delivered over a telephony stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medium {
    pub twilio: EmptyObject,
}

/// Serializes as `{}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyObject {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalVoice {
    pub eleven_labs: ElevenLabsVoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevenLabsVoice {
    pub voice_id: String,
    pub model: String,
}

impl SessionRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        voice: &VoiceConfig,
        model: impl Into<String>,
        temperature: f64,
    ) -> Self {
        let (voice, external_voice) = match voice {
            VoiceConfig::BuiltIn { voice } => (Some(voice.clone()), None),
            VoiceConfig::ElevenLabs { voice_id, model } => (
                None,
                Some(ExternalVoice {
                    eleven_labs: ElevenLabsVoice {
                        voice_id: voice_id.clone(),
                        model: model.clone(),
                    },
                }),
            ),
        };

        Self {
            system_prompt: system_prompt.into(),
            model: model.into(),
            temperature: clamp_temperature(temperature),
            first_speaker_settings: FirstSpeakerSettings::default(),
            medium: Medium::default(),
            voice,
            external_voice,
        }
    }
}

/// Keep temperature within [0.0, 1.0]; NaN becomes the default
pub fn clamp_temperature(temperature: f64) -> f64 {
    if temperature.is_nan() {
        DEFAULT_TEMPERATURE
    } else {
        temperature.clamp(0.0, 1.0)
    }
}

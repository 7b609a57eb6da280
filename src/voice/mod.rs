//! Voice-session API: request construction, wire types and HTTP client

mod client;
mod config;
mod messages;

pub use client::{HttpVoiceSessionClient, VoiceSessionApi};
pub use config::{
    clamp_temperature, ElevenLabsVoice, ExternalVoice, SessionRequest, VoiceConfig,
    DEFAULT_BUILT_IN_VOICE, DEFAULT_ELEVENLABS_MODEL, DEFAULT_ELEVENLABS_VOICE_ID,
    DEFAULT_TEMPERATURE, ELEVENLABS_MODELS, ELEVENLABS_PROVIDER,
};
pub use messages::{MessageList, SessionCreated, SessionMessage, SessionStatus};

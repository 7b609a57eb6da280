//! Telephony provider: outbound call creation bridged to a media stream

mod client;
mod twiml;

pub use client::{OutboundCall, TelephonyApi, TwilioClient};
pub use twiml::{connect_stream_twiml, escape_attribute};

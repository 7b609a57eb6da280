use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::{ensure_success, ApiError};

/// Parameters for one outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCall {
    pub to: String,
    pub from: String,
    /// Signaling document executed when the callee answers
    pub twiml: String,
}

/// Telephony provider that can place outbound calls
#[async_trait]
pub trait TelephonyApi: Send + Sync {
    /// Place the call; returns the provider's call id
    async fn create_call(&self, call: &OutboundCall) -> Result<String, ApiError>;
}

#[derive(Debug, Deserialize)]
struct CallResource {
    sid: Option<String>,
}

/// Twilio REST client (basic auth with account sid / auth token)
pub struct TwilioClient {
    http: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
}

impl TwilioClient {
    pub fn new(
        base_url: impl Into<String>,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
        }
    }

    fn calls_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl TelephonyApi for TwilioClient {
    async fn create_call(&self, call: &OutboundCall) -> Result<String, ApiError> {
        info!("Placing outbound call {} -> {}", call.from, call.to);

        let form = [
            ("To", call.to.as_str()),
            ("From", call.from.as_str()),
            ("Twiml", call.twiml.as_str()),
        ];

        let response = self
            .http
            .post(self.calls_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let resource: CallResource = ensure_success(response).await?.json().await?;

        resource
            .sid
            .filter(|sid| !sid.is_empty())
            .ok_or_else(|| ApiError::Decode("telephony response did not include a call sid".to_string()))
    }
}

use serde::{Deserialize, Serialize};

use crate::catalog::UseCase;
use crate::error::CallError;
use crate::prompt::{format_prompt, CustomParam, CustomerData, CustomerOverrides};
use crate::voice::{clamp_temperature, SessionRequest, VoiceConfig};

/// Customer name used when neither the form nor the use case sets one
pub const DEFAULT_CUSTOMER_NAME: &str = "Amit Lodha";

/// Voice fields as entered on the form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceForm {
    pub provider: Option<String>,
    #[serde(rename = "voiceId")]
    pub voice_id: Option<String>,
    pub model: Option<String>,
    pub voice: Option<String>,
}

impl VoiceForm {
    pub fn to_voice_config(&self) -> VoiceConfig {
        VoiceConfig::from_parts(
            self.provider.as_deref(),
            self.voice_id.as_deref(),
            self.model.as_deref(),
            self.voice.as_deref(),
        )
    }
}

/// Everything the operator submits to place a call. Unset fields fall back
/// to the selected use case.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallForm {
    pub use_case_id: String,
    pub destination_phone: Option<String>,
    pub from_phone: Option<String>,
    #[serde(default)]
    pub customer: CustomerOverrides,
    pub voice: Option<VoiceForm>,
    pub temperature: Option<f64>,
    pub model: Option<String>,
    /// Edited prompt template; the use case's `ai_prompt` when absent
    pub system_prompt: Option<String>,
    /// Applied after the operator session's own custom parameters
    #[serde(default)]
    pub custom_params: Vec<CustomParam>,
}

/// A fully resolved call, ready to send upstream
#[derive(Debug, Clone, PartialEq)]
pub struct CallPlan {
    pub destination_phone: String,
    pub from_phone: String,
    pub customer_name: String,
    /// Template with customer data substituted
    pub system_prompt: String,
    pub voice: VoiceConfig,
    pub model: String,
    pub temperature: f64,
}

impl CallPlan {
    pub fn resolve(
        use_case: &UseCase,
        form: &CallForm,
        session_params: &[CustomParam],
        default_model: &str,
    ) -> Result<Self, CallError> {
        let destination_phone = first_non_empty([
            form.destination_phone.clone(),
            form.customer.phone_number.clone(),
            use_case.customer_field("phone_number"),
        ])
        .ok_or_else(|| CallError::InvalidRequest("destination phone number is required".to_string()))?;

        let from_phone = first_non_empty([
            form.from_phone.clone(),
            use_case.from_phone().map(str::to_string),
        ])
        .ok_or_else(|| CallError::InvalidRequest("caller phone number is required".to_string()))?;

        let customer_name = first_non_empty([
            form.customer.name.clone(),
            use_case.customer_field("name"),
        ])
        .unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string());

        let mut overrides = form.customer.clone();
        overrides.name = Some(customer_name.clone());
        overrides.phone_number = Some(destination_phone.clone());

        let template = form.system_prompt.as_deref().unwrap_or(&use_case.ai_prompt);
        let system_prompt = render_prompt(use_case, template, &overrides, session_params, &form.custom_params);

        let voice = form
            .voice
            .as_ref()
            .map(VoiceForm::to_voice_config)
            .unwrap_or_else(|| use_case.voice_config());

        let model = first_non_empty([form.model.clone(), use_case.model().map(str::to_string)])
            .unwrap_or_else(|| default_model.to_string());

        let temperature = form
            .temperature
            .map(clamp_temperature)
            .unwrap_or_else(|| use_case.temperature());

        Ok(Self {
            destination_phone,
            from_phone,
            customer_name,
            system_prompt,
            voice,
            model,
            temperature,
        })
    }

    pub fn session_request(&self) -> SessionRequest {
        SessionRequest::new(&self.system_prompt, &self.voice, &self.model, self.temperature)
    }

    /// One-line description shown to the operator before dialing
    pub fn summary(&self) -> String {
        format!(
            "Calling {} ({}) | Voice: {} - {} | Model: {}",
            self.destination_phone,
            self.customer_name,
            self.voice.provider(),
            self.voice.label(),
            self.model
        )
    }
}

/// Fill `template` from the use case defaults, operator overrides, session
/// parameters and per-request parameters (later layers win)
pub fn render_prompt(
    use_case: &UseCase,
    template: &str,
    overrides: &CustomerOverrides,
    session_params: &[CustomParam],
    extra_params: &[CustomParam],
) -> String {
    let mut data = CustomerData::assemble(&use_case.customer_info, overrides, session_params);
    data.apply_custom_params(extra_params);
    format_prompt(template, &data)
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

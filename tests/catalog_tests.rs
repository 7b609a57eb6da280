// Tests for use case loading and service configuration

use dialdesk::catalog::{UseCaseCatalog, DEFAULT_USE_CASE_ID};
use dialdesk::voice::VoiceConfig;
use dialdesk::Config;
use std::io::Write;
use std::time::Duration;

const MULTI: &str = r#"{
    "use_cases": {
        "loan_reminder": {
            "name": "Loan EMI Reminder",
            "description": "Reminder call",
            "customer_info": {"name": "Amit Lodha", "phone_number": "+919800000000", "loan_amount": 50000},
            "call_settings": {
                "twilio_phone_number": "+15005550006",
                "voice": {"provider": "elevenlabs", "voiceId": "z3L1naUiX6l4xiMWzigO"},
                "temperature": 0.6
            },
            "ai_prompt": "Hello {{name}}, your loan of {{loan_amount}} is due."
        },
        "survey": {
            "name": "Survey",
            "call_settings": {"voice": "Riya"},
            "ai_prompt": "Survey for {{name}}"
        }
    }
}"#;

#[test]
fn test_load_multiple_use_cases() {
    let catalog = UseCaseCatalog::from_json_str(MULTI).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["loan_reminder", "survey"]);

    let loan = catalog.get("loan_reminder").unwrap();
    assert_eq!(loan.name, "Loan EMI Reminder");
    assert_eq!(loan.from_phone(), Some("+15005550006"));
    assert_eq!(loan.temperature(), 0.6);
    assert_eq!(
        loan.voice_config(),
        VoiceConfig::eleven_labs("z3L1naUiX6l4xiMWzigO", "eleven_turbo_v2_5")
    );
    assert_eq!(loan.customer_defaults().get("loan_amount"), Some("50000"));
    assert_eq!(loan.customer_field("phone_number").as_deref(), Some("+919800000000"));
}

#[test]
fn test_bare_voice_name_is_built_in() {
    let catalog = UseCaseCatalog::from_json_str(MULTI).unwrap();
    let survey = catalog.get("survey").unwrap();

    assert_eq!(survey.voice_config(), VoiceConfig::built_in("Riya"));
    assert_eq!(survey.temperature(), 0.3);
    assert_eq!(survey.from_phone(), None);
    assert!(survey.description.is_empty());
}

#[test]
fn test_flat_layout_becomes_default_use_case() {
    let raw = r#"{
        "customer_info": {"name": "Amit"},
        "call_settings": {"twilio_phone_number": "+15005550006"},
        "ai_prompt": "Hi {{name}}"
    }"#;

    let catalog = UseCaseCatalog::from_json_str(raw).unwrap();
    assert_eq!(catalog.len(), 1);

    let use_case = catalog.get(DEFAULT_USE_CASE_ID).unwrap();
    assert_eq!(use_case.name, "Default");
    assert_eq!(use_case.ai_prompt, "Hi {{name}}");
    assert_eq!(use_case.voice_config(), VoiceConfig::default());
}

#[test]
fn test_summaries() {
    let catalog = UseCaseCatalog::from_json_str(MULTI).unwrap();
    let summaries = catalog.summaries();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].id, "loan_reminder");
    assert_eq!(summaries[0].description, "Reminder call");
}

#[test]
fn test_malformed_json_is_rejected() {
    assert!(UseCaseCatalog::from_json_str("{ not json").is_err());
    assert!(UseCaseCatalog::from_json_str(r#"{"use_cases": {}}"#).is_err());
}

#[test]
fn test_missing_file_reports_path() {
    let err = UseCaseCatalog::load("/nonexistent/dialdesk/call_config.json").unwrap_err();
    assert!(format!("{:#}", err).contains("call_config.json not found"));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(MULTI.as_bytes()).unwrap();

    let catalog = UseCaseCatalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_config_defaults() {
    let cfg = Config::defaults().unwrap();

    assert_eq!(cfg.service.name, "dialdesk");
    assert_eq!(cfg.service.http.port, 8080);
    assert_eq!(cfg.voice_session.base_url, "https://api.ultravox.ai/api/calls");
    assert_eq!(cfg.voice_session.default_model, "fixie-ai/ultravox");
    assert_eq!(cfg.telephony.base_url, "https://api.twilio.com");
    assert!(cfg.secrets.path.is_none());
    assert_eq!(cfg.sessions.idle_timeout(), Duration::from_secs(3600));
    assert_eq!(cfg.sessions.sweep_interval(), Duration::from_secs(60));

    let poll = cfg.poll_settings();
    assert_eq!(poll.interval, Duration::from_secs(5));
    assert_eq!(poll.max_wait, Duration::from_secs(120));
    assert_eq!(poll.max_iterations(), 24);
}

#[test]
fn test_config_file_overrides_defaults() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[service.http]\nport = 9123\n\n[transcript]\npoll_interval_secs = 2\nmax_wait_secs = 7\n\n[secrets]\npath = \"config/secrets.toml\""
    )
    .unwrap();

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.http.port, 9123);
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.secrets.path.as_deref(), Some("config/secrets.toml"));
    assert_eq!(cfg.poll_settings().max_iterations(), 3);
}

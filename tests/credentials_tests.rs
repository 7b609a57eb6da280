// Tests for credential validation and secrets loading

use dialdesk::credentials::{CredentialStatus, Credentials, OPTIONAL_SECRETS, REQUIRED_SECRETS};
use std::collections::HashMap;
use std::io::Write;

fn lookup_from(pairs: &[(&str, &str)]) -> Credentials {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Credentials::from_lookup(|name| map.get(name).cloned())
}

#[test]
fn test_all_required_missing_when_nothing_configured() {
    let credentials = lookup_from(&[]);

    assert_eq!(
        credentials.missing_required(),
        vec![
            "TWILIO_ACCOUNT_SID",
            "TWILIO_AUTH_TOKEN",
            "ULTRAVOX_API_KEY",
            "ELEVENLABS_API_KEY"
        ]
    );
    assert_eq!(credentials.missing_optional(), OPTIONAL_SECRETS.to_vec());
    assert!(!credentials.is_complete());
}

#[test]
fn test_nothing_missing_when_all_configured() {
    let credentials = Credentials::from_lookup(|name| Some(format!("{}-value", name)));

    assert!(credentials.missing_required().is_empty());
    assert!(credentials.missing_optional().is_empty());
    assert!(credentials.is_complete());
}

#[test]
fn test_missing_order_is_stable() {
    let credentials = lookup_from(&[("TWILIO_AUTH_TOKEN", "tok"), ("ULTRAVOX_API_KEY", "uv")]);

    let first = credentials.missing_required();
    let second = credentials.missing_required();
    assert_eq!(first, second);
    assert_eq!(first, vec!["TWILIO_ACCOUNT_SID", "ELEVENLABS_API_KEY"]);
}

#[test]
fn test_empty_values_count_as_missing() {
    let credentials = lookup_from(&[
        ("TWILIO_ACCOUNT_SID", ""),
        ("TWILIO_AUTH_TOKEN", "   "),
        ("ULTRAVOX_API_KEY", "uv"),
        ("ELEVENLABS_API_KEY", "el"),
    ]);

    assert_eq!(
        credentials.missing_required(),
        vec!["TWILIO_ACCOUNT_SID", "TWILIO_AUTH_TOKEN"]
    );
}

#[test]
fn test_status_snapshot() {
    let credentials = lookup_from(&[("OPENAI_API_KEY", "sk")]);
    let status = CredentialStatus::from(&credentials);

    assert_eq!(status.missing_required, REQUIRED_SECRETS.to_vec());
    assert_eq!(status.missing_optional, vec!["ANTHROPIC_API_KEY", "GOOGLE_API_KEY"]);
}

#[test]
fn test_debug_redacts_secrets() {
    let credentials = lookup_from(&[("TWILIO_AUTH_TOKEN", "super-secret-token")]);
    let debug = format!("{:?}", credentials);

    assert!(!debug.contains("super-secret-token"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn test_load_without_secrets_file() {
    let missing = std::env::temp_dir().join("dialdesk-no-such-secrets.toml");
    let credentials = Credentials::load(missing.to_str());

    assert!(credentials.is_ok(), "a missing secrets file is not an error");
}

#[test]
fn test_load_reads_secrets_table() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "[secrets]\nDIALDESK_TEST_ONLY = \"ignored\"\nGOOGLE_API_KEY = \"g-key\"\nULTRAVOX_API_URL = \"http://localhost:9999/api/calls\""
    )
    .unwrap();

    let credentials = Credentials::load(file.path().to_str()).unwrap();

    let from_env = std::env::var("GOOGLE_API_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty());
    assert_eq!(
        credentials.google_api_key.as_deref(),
        from_env.as_deref().or(Some("g-key"))
    );
    assert!(credentials.voice_session_api_url.is_some());
}

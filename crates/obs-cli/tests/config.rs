//! Integration tests for run config loading.

use obs_cli::config::load_config;
use obs_core::PerformerRef;

#[test]
fn loads_config_from_disk() {
    let file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("create temp file");
    std::fs::write(
        file.path(),
        r#"{
  "subject": "Patient/example",
  "performer": "unknown",
  "terminology_url": "https://tx.example.org/fhir"
}"#,
    )
    .expect("write config");

    let config = load_config(file.path()).expect("load config");
    assert_eq!(config.subject.as_deref(), Some("Patient/example"));
    assert_eq!(
        config.terminology_url.as_deref(),
        Some("https://tx.example.org/fhir")
    );
    assert_eq!(config.build_options().performer, Some(PerformerRef::Unknown));
}

#[test]
fn malformed_config_is_an_error() {
    let file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("create temp file");
    std::fs::write(file.path(), "{ not json").expect("write config");

    let error = load_config(file.path()).unwrap_err();
    assert!(error.to_string().contains("parse config"));
}

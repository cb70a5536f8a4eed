//! Integration tests for loading documents through the public API.

use std::path::PathBuf;

use alerting_definition::config::SECRET_TOKEN;
use alerting_definition::{ConfigError, ReceiverType, load, load_json, marshal_json_with_secrets};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn fixtures_load_with_expected_receiver_types() {
    let mimir = load(fixture("mimir_config.yaml")).unwrap();
    assert_eq!(mimir.reachable_receiver_type(), Some(ReceiverType::Alertmanager));
    assert!(!mimir.has_grafana_receivers());

    let grafana = load(fixture("grafana_config.yaml")).unwrap();
    assert_eq!(grafana.reachable_receiver_type(), Some(ReceiverType::Grafana));
    assert!(grafana.has_grafana_receivers());
}

#[test]
fn secrets_survive_explicit_plaintext_marshal() {
    let config = load(fixture("all_integrations.yaml")).unwrap();

    let masked = serde_json::to_string(&config).unwrap();
    assert!(masked.contains(SECRET_TOKEN));
    assert!(!masked.contains("hunter2"));

    let plain = marshal_json_with_secrets(&config).unwrap();
    assert!(plain.contains("hunter2"));
    assert_eq!(load_json(plain).unwrap(), config);
}

#[test]
fn duplicate_receiver_json_fixture_is_rejected() {
    let err = load_json(fixture("duplicate_receiver.json")).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateReceiver(ref name) if name == "r"), "{err:?}");
}

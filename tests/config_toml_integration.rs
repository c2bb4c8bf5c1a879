use task_analyzer::{ServiceConfig, Strategy};
use tempfile::NamedTempFile;

#[test]
fn test_config_serialization_roundtrip() {
    let original_config = ServiceConfig::default();

    let toml_str = original_config
        .to_toml_string()
        .expect("Should be able to serialize config to TOML");

    assert!(!toml_str.is_empty(), "TOML string should not be empty");
    assert!(toml_str.contains("bind_address"), "Should contain bind_address field");
    assert!(
        toml_str.contains("default_strategy = \"smart_balance\""),
        "Strategy should serialize by name"
    );

    let deserialized_config = ServiceConfig::from_toml_str(&toml_str)
        .expect("Should be able to deserialize TOML string");

    assert_eq!(
        original_config.server.bind_address,
        deserialized_config.server.bind_address
    );
    assert_eq!(
        original_config.server.max_body_bytes,
        deserialized_config.server.max_body_bytes
    );
    assert_eq!(
        original_config.scoring.default_strategy,
        deserialized_config.scoring.default_strategy
    );
    assert_eq!(original_config.logging.filter, deserialized_config.logging.filter);
}

#[test]
fn test_config_file_operations() {
    let mut original_config = ServiceConfig::default();
    original_config.server.bind_address = "0.0.0.0:8080".to_string();
    original_config.server.permissive_cors = false;
    original_config.scoring.default_strategy = Strategy::HighImpact;

    let temp_file = NamedTempFile::new().expect("Should be able to create temporary file");
    let temp_path = temp_file.path();

    original_config
        .to_toml_file(temp_path)
        .expect("Should be able to save config to file");

    let loaded_config =
        ServiceConfig::from_toml_file(temp_path).expect("Should be able to load config from file");

    assert_eq!(loaded_config.server.bind_address, "0.0.0.0:8080");
    assert!(!loaded_config.server.permissive_cors);
    assert_eq!(loaded_config.scoring.default_strategy, Strategy::HighImpact);
}

#[test]
fn test_unknown_strategy_in_config_falls_back() {
    let config = ServiceConfig::from_toml_str(
        r#"
        [scoring]
        default_strategy = "whatever_works"
        "#,
    )
    .expect("Unknown strategy names should not be a parse error");

    assert_eq!(config.scoring.default_strategy, Strategy::SmartBalance);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let result = ServiceConfig::from_toml_file(temp_dir.path().join("absent.toml"));

    let error = result.expect_err("Loading a missing file should fail");
    assert!(format!("{:#}", error).contains("absent.toml"));
}

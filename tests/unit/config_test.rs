//! Tests for configuration loading

use std::fs;
use std::path::Path;

use regtools::config::{Config, ConfigError};
use tempfile::TempDir;

// =============================================================================
// DEFAULTS
// =============================================================================

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.fixer.root, Path::new("."));
    assert_eq!(config.fixer.module, "react");
    assert_eq!(config.fixer.default_name, "React");
    assert!(config.fixer.extensions.contains(&"tsx".to_string()));
    assert!(config.fixer.skip_dirs.contains(&"node_modules".to_string()));

    assert_eq!(config.database.host, "localhost");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.database.table, "customers");

    assert_eq!(config.verifier.minutes_back, 2);
    assert_eq!(config.verifier.test_prefix, "AUTO_TEST");
    assert_eq!(config.verifier.key_fields.len(), 9);
}

#[test]
fn test_empty_toml_is_default() {
    let config = Config::from_toml_str("").unwrap();
    assert_eq!(config.database.database, "aisdb");
    assert_eq!(config.verifier.minutes_back, 2);
}

// =============================================================================
// PARSING
// =============================================================================

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::from_toml_str(
        r#"
[database]
host = "db.internal"
password = "secret"

[verifier]
minutes_back = 10
"#,
    )
    .unwrap();

    assert_eq!(config.database.host, "db.internal");
    assert_eq!(config.database.password, "secret");
    assert_eq!(config.database.port, 5432);
    assert_eq!(config.verifier.minutes_back, 10);
    assert_eq!(config.verifier.test_prefix, "AUTO_TEST");
    assert_eq!(config.fixer.module, "react");
}

#[test]
fn test_fixer_section() {
    let config = Config::from_toml_str(
        r#"
[fixer]
root = "frontend"
extensions = ["ts"]
skip_dirs = ["generated"]
"#,
    )
    .unwrap();

    assert_eq!(config.fixer.root, Path::new("frontend"));
    assert_eq!(config.fixer.extensions, ["ts"]);
    assert_eq!(config.fixer.skip_dirs, ["generated"]);
}

#[test]
fn test_wrong_type_rejected() {
    assert!(Config::from_toml_str("[database]\nport = \"five\"\n").is_err());
}

// =============================================================================
// LOADING
// =============================================================================

#[test]
fn test_load_explicit_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("regtools.toml");
    fs::write(&path, "[database]\ndatabase = \"staging\"\n").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.database.database, "staging");
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(Some(temp.path().join("missing.toml").as_path())).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn test_load_leaves_validation_to_commands() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("regtools.toml");
    fs::write(&path, "[database]\ntable = \"customers; drop table x\"\n").unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config.fixer.validate(), Ok(()));
    assert!(matches!(config.database.validate(), Err(ConfigError::InvalidTable(_))));
    assert!(matches!(config.validate(), Err(ConfigError::InvalidTable(_))));
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn test_validate_empty_module() {
    let mut config = Config::default();
    config.fixer.module = "  ".to_string();
    assert_eq!(config.validate(), Err(ConfigError::EmptyModule));
    assert_eq!(config.fixer.validate(), Err(ConfigError::EmptyModule));
    assert_eq!(config.database.validate(), Ok(()));
}

#[test]
fn test_validate_default_ok() {
    assert_eq!(Config::default().validate(), Ok(()));
}

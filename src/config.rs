//! Configuration management
//!
//! Settings for both tools live in one TOML file, by default
//! `~/.regtools/config.toml`. Every key is optional; missing keys fall back
//! to the defaults below. CLI flags are applied on top by the binary.
//!
//! ```toml
//! [fixer]
//! root = "./frontend"
//! extensions = ["js", "jsx", "ts", "tsx"]
//!
//! [database]
//! host = "localhost"
//! port = 5432
//! database = "aisdb"
//! user = "app"
//! password = "secret"
//!
//! [verifier]
//! minutes_back = 2
//! test_prefix = "AUTO_TEST"
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Errors raised when a loaded configuration is not usable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Table name is not a plain SQL identifier
    #[error("invalid table name: {0:?} (expected letters, digits and underscores)")]
    InvalidTable(String),

    /// Import module specifier is empty
    #[error("fixer module must not be empty")]
    EmptyModule,
}

/// Top-level regtools configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Duplicate-import fixer settings
    #[serde(default)]
    pub fixer: FixerConfig,
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Submission verifier settings
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Duplicate-import fixer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixerConfig {
    /// Directory to scan when none is given on the command line
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Module specifier whose imports are inspected
    #[serde(default = "default_module")]
    pub module: String,
    /// Binding name of the canonical default import
    #[serde(default = "default_name")]
    pub default_name: String,
    /// File extensions (without the dot) that are scanned
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory names that are never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_module() -> String {
    "react".to_string()
}

fn default_name() -> String {
    "React".to_string()
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "ts", "tsx"].iter().map(ToString::to_string).collect()
}

fn default_skip_dirs() -> Vec<String> {
    ["node_modules", ".next", "dist", "build", "out", "coverage", ".git"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            module: default_module(),
            default_name: default_name(),
            extensions: default_extensions(),
            skip_dirs: default_skip_dirs(),
        }
    }
}

/// Database connection settings
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Server host name
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Database name
    #[serde(default = "default_database")]
    pub database: String,
    /// Login role
    #[serde(default = "default_user")]
    pub user: String,
    /// Login password
    #[serde(default)]
    pub password: String,
    /// Table holding customer records
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "aisdb".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_table() -> String {
    "customers".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: String::new(),
            table: default_table(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"***")
            .field("table", &self.table)
            .finish()
    }
}

/// Submission verifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Lookback window in minutes for "recent" customers
    #[serde(default = "default_minutes_back")]
    pub minutes_back: u32,
    /// Customer id prefix used by automated test submissions
    #[serde(default = "default_test_prefix")]
    pub test_prefix: String,
    /// Fields whose emptiness is flagged in the report
    #[serde(default = "default_key_fields")]
    pub key_fields: Vec<String>,
}

const fn default_minutes_back() -> u32 {
    2
}

fn default_test_prefix() -> String {
    "AUTO_TEST".to_string()
}

fn default_key_fields() -> Vec<String> {
    [
        "customer_id",
        "full_name",
        "phone_number",
        "id_number",
        "email",
        "monthly_income",
        "employment_status",
        "region",
        "city",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            minutes_back: default_minutes_back(),
            test_prefix: default_test_prefix(),
            key_fields: default_key_fields(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the global config file is
    /// read when present and defaults are used otherwise. Values are not
    /// validated here; see [`Config::validate`].
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let global = paths::global_config();
                if global.exists() {
                    Self::from_file(&global)?
                } else {
                    log::debug!("No config at {}, using defaults", global.display());
                    Self::default()
                }
            },
        };
        Ok(config)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check values that would otherwise fail deep inside a tool run.
    ///
    /// Each command only validates the section it uses; this checks all of them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fixer.validate()?;
        self.database.validate()
    }
}

impl FixerConfig {
    /// Reject an empty module specifier
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module.trim().is_empty() {
            return Err(ConfigError::EmptyModule);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Reject a table name that is not a plain SQL identifier
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_identifier(&self.table) {
            return Err(ConfigError::InvalidTable(self.table.clone()));
        }
        Ok(())
    }
}

/// Table names are interpolated into SQL, so only bare identifiers pass
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

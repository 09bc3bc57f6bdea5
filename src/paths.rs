//! Centralized path definitions for regtools
//!
//! ```text
//! ~/.regtools/
//! └── config.toml               # Fixer, database and verifier settings
//! ```

use std::path::PathBuf;

/// Global config directory name
const GLOBAL_DIR: &str = ".regtools";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global regtools directory.
///
/// Returns `~/.regtools/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.regtools/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

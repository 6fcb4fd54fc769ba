//! Admin allow-list loading from config.toml
//!
//! The set of identities permitted administrative capability is supplied as
//! configuration rather than being embedded in code, so deployments can
//! rotate administrators without a rebuild.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the allow-list file
#[derive(Debug, Deserialize)]
pub struct AccessConfig {
    /// Email addresses granted administrative capability
    pub admins: Vec<String>,
}

/// Loads the admin allow-list from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - The `admins` field is missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AccessConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the admin allow-list from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<AccessConfig> {
    load_config("config.toml")
}

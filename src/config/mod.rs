//! Configuration management for the store, the admin allow-list, and the
//! payment gateway.

/// Admin allow-list loading from config.toml
pub mod access;

/// Store connection and schema creation
pub mod database;

/// Payment gateway configuration from environment variables
pub mod gateway;

use crate::errors::Result;

/// Aggregated application configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Connection string for the reference data store
    pub database_url: String,
    /// Identities granted administrative capability (exact string match)
    pub admins: Vec<String>,
    /// Checkout gateway settings
    pub gateway: gateway::GatewayConfig,
}

/// Loads the complete application configuration from the environment and
/// the default `config.toml` allow-list file.
///
/// # Errors
/// Returns an error if the allow-list file cannot be read or parsed, or if
/// the gateway key is not configured.
pub fn load_app_config() -> Result<AppConfig> {
    let access = access::load_default_config()?;

    Ok(AppConfig {
        database_url: database::get_database_url(),
        admins: access.admins,
        gateway: gateway::GatewayConfig::from_env()?,
    })
}

//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > .env file > config.toml > defaults
//!
//! The group id, the bot account's session cookie, and the caller secret have
//! no defaults: a process missing any of them must not come up, so `init()`
//! fails before a listener is ever bound.

use serde::Deserialize;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the global application configuration.
///
/// # Panics
/// Panics if config has not been initialized via [`init`].
pub fn get() -> &'static AppConfig {
    CONFIG.get().expect("Config not initialized. Call rankgate_common::config::init() first.")
}

/// Initialize the global configuration from environment.
///
/// Should be called once at application startup, before any other code accesses config.
pub fn init() -> Result<&'static AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::builder()
        // Defaults
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("ranks.filter_guest_role", true)?
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (RANKGATE__ROBLOX__GROUP_ID, RANKGATE__AUTH__SECRET_KEY, etc.)
        .add_source(
            config::Environment::with_prefix("RANKGATE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    Ok(CONFIG.get_or_init(|| app_config))
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub roblox: RobloxConfig,
    pub auth: AuthConfig,
    pub ranks: RanksConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RobloxConfig {
    /// Numeric id of the one group this process manages.
    pub group_id: u64,
    /// The bot account's long-lived `.ROBLOSECURITY` cookie value.
    pub cookie: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret callers must present in the `X-Secret-Key` header.
    pub secret_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RanksConfig {
    /// Drop the rank-0 "Guest" tier from role listings.
    pub filter_guest_role: bool,
}

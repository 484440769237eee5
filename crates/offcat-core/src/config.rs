use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://world.openfoodfacts.org";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("OFFCAT_ENV", "development"));
    let bind_addr = parse_addr("OFFCAT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("OFFCAT_LOG_LEVEL", "info");

    let upstream_base_url = or_default("OFFCAT_UPSTREAM_BASE_URL", DEFAULT_UPSTREAM_BASE_URL);
    let request_timeout_secs = parse_u64("OFFCAT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("OFFCAT_USER_AGENT", "offcat/0.1 (product-catalog-proxy)");

    let default_page_size = parse_u32("OFFCAT_DEFAULT_PAGE_SIZE", "24")?;
    let max_page_size = parse_u32("OFFCAT_MAX_PAGE_SIZE", "100")?;
    let categories_limit = parse_usize("OFFCAT_CATEGORIES_LIMIT", "50")?;
    let cart_path = PathBuf::from(or_default("OFFCAT_CART_PATH", "./cart.json"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        upstream_base_url,
        request_timeout_secs,
        user_agent,
        default_page_size,
        max_page_size,
        categories_limit,
        cart_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

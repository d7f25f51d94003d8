use std::env::VarError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{ClientConfig, Environment, ServerConfig};
use crate::ConfigError;

pub(crate) const DEFAULT_BASE_ORIGIN: &str = "http://localhost:1337";
pub(crate) const DEFAULT_LISTING_PLACEHOLDER_URL: &str =
    "https://images.unsplash.com/photo-1441986300917-64674bd600d8?w=400&h=300&fit=crop";
pub(crate) const DEFAULT_DETAIL_PLACEHOLDER_URL: &str =
    "https://images.unsplash.com/photo-1505740420928-5e560c06f2e0?w=800&h=600&fit=crop";

/// Load client configuration, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_client_config() -> Result<ClientConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_client_config_from_env()
}

/// Load client configuration from the process environment only.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_client_config_from_env() -> Result<ClientConfig, ConfigError> {
    build_client_config(|key| std::env::var(key))
}

/// Load server configuration, reading `.env` first.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_server_config() -> Result<ServerConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_server_config_from_env()
}

/// Load server configuration from the process environment only.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_server_config_from_env() -> Result<ServerConfig, ConfigError> {
    build_server_config(|key| std::env::var(key))
}

/// Typed env-var reader over an injectable lookup so parsing can be tested
/// against a plain map.
struct Env<F> {
    lookup: F,
}

impl<F> Env<F>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    fn require(&self, var: &str) -> Result<String, ConfigError> {
        (self.lookup)(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    }

    fn or_default(&self, var: &str, default: &str) -> String {
        (self.lookup)(var).unwrap_or_else(|_| default.to_string())
    }

    fn parse<T>(&self, var: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.or_default(var, default);
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    }
}

fn build_client_config<F>(lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let env = Env { lookup };

    let base_origin = parse_origin(
        "SHOPFRONT_BASE_ORIGIN",
        &env.or_default("SHOPFRONT_BASE_ORIGIN", DEFAULT_BASE_ORIGIN),
    )?;
    let api_prefix = normalize_prefix(&env.or_default("SHOPFRONT_API_PREFIX", "/api"));

    let listing_placeholder_url = env.or_default(
        "SHOPFRONT_LISTING_PLACEHOLDER_URL",
        DEFAULT_LISTING_PLACEHOLDER_URL,
    );
    let detail_placeholder_url = env.or_default(
        "SHOPFRONT_DETAIL_PLACEHOLDER_URL",
        DEFAULT_DETAIL_PLACEHOLDER_URL,
    );

    let log_level = env.or_default("SHOPFRONT_LOG_LEVEL", "info");
    let request_timeout_secs = env.parse::<u64>("SHOPFRONT_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = env.or_default("SHOPFRONT_USER_AGENT", "shopfront/0.1");
    let max_retries = env.parse::<u32>("SHOPFRONT_MAX_RETRIES", "0")?;
    let retry_backoff_base_ms = env.parse::<u64>("SHOPFRONT_RETRY_BACKOFF_BASE_MS", "500")?;
    let storage_path = PathBuf::from(env.or_default(
        "SHOPFRONT_STORAGE_PATH",
        "./.shopfront/storage.json",
    ));

    Ok(ClientConfig {
        base_origin,
        api_prefix,
        listing_placeholder_url,
        detail_placeholder_url,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        storage_path,
    })
}

fn build_server_config<F>(lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let env = Env { lookup };

    let database_url = env.require("DATABASE_URL")?;
    let jwt_secret = env.require("SHOPFRONT_JWT_SECRET")?;

    let env_name = parse_environment(&env.or_default("SHOPFRONT_ENV", "development"))?;
    let bind_addr = env.parse::<SocketAddr>("SHOPFRONT_BIND_ADDR", "0.0.0.0:1337")?;
    let log_level = env.or_default("SHOPFRONT_LOG_LEVEL", "info");

    let db_max_connections = env.parse::<u32>("SHOPFRONT_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = env.parse::<u32>("SHOPFRONT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = env.parse::<u64>("SHOPFRONT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    Ok(ServerConfig {
        database_url,
        env: env_name,
        bind_addr,
        log_level,
        jwt_secret,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SHOPFRONT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Validates an `http(s)://` origin and strips any trailing `/`.
fn parse_origin(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("\"{raw}\" is not an http(s) origin"),
        });
    }
    Ok(trimmed.to_string())
}

/// `"api"`, `"/api/"` and `"/api"` all become `"/api"`; empty stays empty.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

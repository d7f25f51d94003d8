pub mod app_config;
pub mod config;
pub mod products;
pub mod theme;

pub use app_config::{ClientConfig, Environment, ServerConfig};
pub use config::{
    load_client_config, load_client_config_from_env, load_server_config,
    load_server_config_from_env,
};
pub use products::{CanonicalProduct, Category};
pub use theme::Theme;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid theme: {0} (expected \"light\" or \"dark\")")]
    InvalidTheme(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

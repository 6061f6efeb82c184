//! Application configuration
//!
//! Read from the environment once at startup and threaded through
//! component constructors; nothing reads ambient process state after
//! that.

use std::net::SocketAddr;

use thiserror::Error;

use crate::store::DEFAULT_DATABASE_URL;

/// Default Ollama daemon address
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3030";

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The shared bearer secret is mandatory; the process refuses to
    /// start without it
    #[error("API_BEARER_TOKEN must be set")]
    MissingBearerToken,

    #[error("Invalid BIND_ADDR: {0}")]
    InvalidBindAddr(String),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string
    pub database_url: String,
    /// Base URL of the Ollama daemon
    pub ollama_url: String,
    /// Configured model name; the client falls back to its default
    /// when unset
    pub model_name: Option<String>,
    /// Shared secret every request must present as a bearer token
    pub api_token: String,
    /// Listen address
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let ollama_url = lookup("OLLAMA_URL").unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        let model_name = lookup("OLLAMA_MODEL_NAME");
        let api_token = lookup("API_BEARER_TOKEN").ok_or(ConfigError::MissingBearerToken)?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr))?;

        Ok(Self {
            database_url,
            ollama_url,
            model_name,
            api_token,
            bind_addr,
        })
    }
}

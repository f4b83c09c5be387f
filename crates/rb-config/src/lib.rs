//! # rb-config
//!
//! Layered runtime settings for Retro-Board.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `retro-board.toml` in the working directory (optional)
//! 3. `RETRO_*` environment variables, `__` between sections
//!    (e.g. `RETRO_SERVER__PORT=8080`)
//! 4. plain `PORT`, for hosts that inject it
//!
//! A `.env` file is loaded into the environment first if present.

use std::collections::HashMap;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Mount point of the board API, e.g. `/api`.
    pub path_prefix: String,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// May carry credentials, so it is never logged.
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Loads settings from `.env`, `retro-board.toml` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::build(None, std::env::var("PORT").ok())
    }

    /// Same layering as `load`, with the environment supplied by the caller.
    pub fn from_env_map(env: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env.get("PORT").cloned();
        Self::build(Some(env), port)
    }

    fn build(env: Option<HashMap<String, String>>, port: Option<String>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000_i64)?
            .set_default("server.path_prefix", "/api")?
            .set_default("database.url", "sqlite:retro_board.db")?
            .set_default("database.max_connections", 5_i64)?
            .set_default("log.filter", "info")?
            .set_default("log.format", "pretty")?
            .add_source(File::with_name("retro-board").required(false))
            .add_source(
                Environment::with_prefix("RETRO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .set_override_option("server.port", port)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use strum::{Display as StrumDisplay, EnumString};

/// Which persistence engine backs the HTTP handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    MySql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    pub api_prefix: String,

    // Rate limiting, requests per minute per peer IP (0 = off)
    pub rate_per_min: u32,

    pub log_dir: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:8000".to_string(),
            database_url: None,
            store_backend: StoreBackend::MySql,
            db_max_connections: 10,
            run_migrations: true,
            api_prefix: "/api".to_string(),
            rate_per_min: 600,
            log_dir: "logs".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            server_addr: lookup("SERVER_ADDR").unwrap_or(defaults.server_addr),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            store_backend: parse_or(&lookup, "STORE_BACKEND", defaults.store_backend)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", defaults.run_migrations)?,
            api_prefix: lookup("API_PREFIX").unwrap_or(defaults.api_prefix),
            rate_per_min: parse_or(&lookup, "RATE_PER_MIN", defaults.rate_per_min)?,
            log_dir: lookup("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        if config.store_backend == StoreBackend::MySql && config.database_url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND=mysql");
        }
        if config.db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be greater than zero");
        }

        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("invalid value {raw:?} for {key}: {e}")),
    }
}

// ABOUTME: Server configuration read from the environment
// ABOUTME: Parses listen address, database settings, CORS origin and the default caller

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use featureboard_core::default_database_path;
use featureboard_storage::DatabaseConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4010;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid host address: {0}")]
    InvalidHost(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{0} must not be empty")]
    EmptyValue(&'static str),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub db_max_connections: u32,
    pub db_busy_timeout: Duration,
    pub cors_origin: String,
    /// Caller used for requests without an identity header
    pub default_user_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the process env in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host.trim().to_string();
        if host.is_empty() {
            return Err(ConfigError::EmptyValue("HOST"));
        }

        let port = match lookup("PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let database_path = match lookup("DATABASE_PATH") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::EmptyValue("DATABASE_PATH"))
            }
            Some(raw) => PathBuf::from(raw.trim()),
            None => default_database_path(),
        };

        let db_max_connections = parse_number(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }

        let busy_timeout_secs = parse_number(
            "DB_BUSY_TIMEOUT_SECS",
            lookup("DB_BUSY_TIMEOUT_SECS"),
            DEFAULT_BUSY_TIMEOUT_SECS,
        )?;

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let default_user_id = lookup("DEFAULT_USER_ID")
            .map(|user| user.trim().to_string())
            .filter(|user| !user.is_empty());

        Ok(Config {
            host,
            port,
            database_path,
            db_max_connections,
            db_busy_timeout: Duration::from_secs(busy_timeout_secs),
            cors_origin,
            default_user_id,
        })
    }

    /// Pool settings for the storage layer
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            path: self.database_path.clone(),
            max_connections: self.db_max_connections,
            busy_timeout: self.db_busy_timeout,
            ..DatabaseConfig::default()
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Parse a TCP port, rejecting 0
pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    let port = raw.trim().parse::<u16>()?;
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port)
}

fn parse_number<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use interfaces_wazirx_tickers::index::WAZIRX_TICKERS_URL;
use thiserror::Error;
use utils_trace::TraceFormat;

pub const DEFAULT_TICKER_LIMIT: usize = 10;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_POOL_SIZE: u32 = 10;
const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MissingVar: {name} is not set")]
    MissingVar { name: &'static str },

    #[error("InvalidVar: {name}={value:?}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Process settings, read from the environment.
#[derive(Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_pool_size: u32,
    pub server_port: u16,
    pub ticker_feed_url: String,
    pub ticker_limit: usize,
    pub static_dir: PathBuf,
    pub log_level: String,
    pub log_format: TraceFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset. `DB_PASSWORD` is the exception: it may
    /// be unset or empty for trust/peer auth, and is taken verbatim.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::MissingVar { name });

        let ticker_limit = parse_or(&get, "TICKER_LIMIT", DEFAULT_TICKER_LIMIT)?;
        if ticker_limit == 0 {
            return Err(ConfigError::InvalidVar {
                name: "TICKER_LIMIT",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let db_pool_size = parse_or(&get, "DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE)?;
        if db_pool_size == 0 {
            return Err(ConfigError::InvalidVar {
                name: "DB_POOL_SIZE",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Config {
            db_host: required("DB_HOST")?,
            db_port: parse_or(&get, "DB_PORT", DEFAULT_DB_PORT)?,
            db_user: required("DB_USER")?,
            db_password: lookup("DB_PASSWORD").unwrap_or_default(),
            db_name: required("DB_NAME")?,
            db_pool_size,
            server_port: parse_or(&get, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            ticker_feed_url: get("TICKER_FEED_URL")
                .unwrap_or_else(|| WAZIRX_TICKERS_URL.to_string()),
            ticker_limit,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_static_dir),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format: parse_or(&get, "LOG_FORMAT", TraceFormat::default())?,
        })
    }

    /// libpq keyword/value string; values are quoted so any character is allowed.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            quote_conninfo(&self.db_host),
            self.db_port,
            quote_conninfo(&self.db_user),
            quote_conninfo(&self.db_password),
            quote_conninfo(&self.db_name),
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("db_pool_size", &self.db_pool_size)
            .field("server_port", &self.server_port)
            .field("ticker_feed_url", &self.ticker_feed_url)
            .field("ticker_limit", &self.ticker_limit)
            .field("static_dir", &self.static_dir)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public"))
}

fn parse_or<G, T>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match get(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(ConfigError::InvalidVar {
                name,
                reason: err.to_string(),
                value,
            }),
        },
    }
}

fn quote_conninfo(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

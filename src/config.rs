use crate::locale::{Locale, UnknownLocale};
use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

pub const ADDR_VAR: &str = "OFFICE_HOURS_HTTP_ADDR";
pub const DATASET_VAR: &str = "OFFICE_HOURS_DATASET";
pub const LANG_VAR: &str = "OFFICE_HOURS_LANG";

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATASET: &str = "ordinacni_hodiny.json";

/// Settings of the HTTP binary, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub dataset_path: PathBuf,
    pub locale: Locale,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidAddr { value: String, source: AddrParseError },
    UnknownLocale(UnknownLocale),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAddr { value, source } => {
                write!(f, "{ADDR_VAR}={value} is not a socket address: {source}")
            }
            ConfigError::UnknownLocale(err) => write!(f, "{LANG_VAR}: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys use defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr_value = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_value
            .parse()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr_value.clone(),
                source,
            })?;
        let dataset_path = lookup(DATASET_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
        let locale = match lookup(LANG_VAR) {
            Some(code) => code.parse().map_err(ConfigError::UnknownLocale)?,
            None => Locale::default(),
        };
        Ok(Self {
            addr,
            dataset_path,
            locale,
        })
    }
}

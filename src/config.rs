//! Server configuration from environment variables.
//!
//! HOST, PORT, DATA_DIR (empty = keep the roster in memory), DICTIONARY_URL,
//! VALIDATION_TIMEOUT_MS.

use crate::dictionary::DEFAULT_DICTIONARY_URL;
use crate::logic::DEFAULT_VALIDATION_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: Option<PathBuf>,
    pub dictionary_url: String,
    pub validation_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: Some(default_data_dir()),
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; unset or unparsable values use defaults.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: var("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_dir: match var("DATA_DIR") {
                Some(dir) if dir.trim().is_empty() => None,
                Some(dir) => Some(PathBuf::from(dir)),
                None => defaults.data_dir,
            },
            dictionary_url: var("DICTIONARY_URL").unwrap_or(defaults.dictionary_url),
            validation_timeout: var("VALIDATION_TIMEOUT_MS")
                .and_then(|ms| ms.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.validation_timeout),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

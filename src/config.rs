//! Runtime configuration, read from the environment (and a `.env` file).

use std::{path::PathBuf, str::FromStr};

use log::LevelFilter;
use thiserror::Error;

use crate::consts::{
    DEFAULT_LOG_FILE, DEFAULT_LOG_LEVEL, ENV_LOG_FILE, ENV_LOG_LEVEL, ENV_RESET_ON_SUCCESS,
};
use crate::form::FormOptions;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid log level {0:?} (expected off, error, warn, info, debug or trace)")]
    InvalidLogLevel(String),

    #[error("Invalid boolean {value:?} for {key}")]
    InvalidFlag { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub form: FormOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: DEFAULT_LOG_LEVEL,
            form: FormOptions::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; missing keys keep their
    /// default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            config.log_file = PathBuf::from(path);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = LevelFilter::from_str(level.trim())
                .map_err(|_| ConfigError::InvalidLogLevel(level))?;
        }

        if let Some(flag) = lookup(ENV_RESET_ON_SUCCESS) {
            config.form.reset_on_success = parse_flag(ENV_RESET_ON_SUCCESS, &flag)?;
        }

        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_owned(),
        }),
    }
}

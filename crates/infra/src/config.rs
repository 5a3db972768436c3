//! Environment-driven configuration for the quote store.

use std::path::PathBuf;

use thiserror::Error;

use happyhome_quote::DEFAULT_QUOTE_RECIPIENT;

use crate::persistence::QUOTE_STORAGE_KEY;
use crate::storage::file::is_valid_key;

pub const ENV_QUOTE_KEY: &str = "HAPPYHOME_QUOTE_KEY";
pub const ENV_DATA_DIR: &str = "HAPPYHOME_DATA_DIR";
pub const ENV_QUOTE_RECIPIENT: &str = "HAPPYHOME_QUOTE_RECIPIENT";

const APP_DIR: &str = "happyhome";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub data_dir: PathBuf,
    pub recipient: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_key = match lookup(ENV_QUOTE_KEY) {
            Some(key) if is_valid_key(&key) => key,
            Some(key) => {
                tracing::warn!(
                    key = %key,
                    default = QUOTE_STORAGE_KEY,
                    "{ENV_QUOTE_KEY} is not a valid storage key; using default"
                );
                QUOTE_STORAGE_KEY.to_string()
            }
            None => QUOTE_STORAGE_KEY.to_string(),
        };

        let data_dir = match lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let recipient = lookup(ENV_QUOTE_RECIPIENT)
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_QUOTE_RECIPIENT.to_string());

        Ok(Self {
            storage_key,
            data_dir,
            recipient,
        })
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

/// `{app_data_dir}/happyhome`.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .ok_or(ConfigError::NoDataDir)?;

    Ok(base.join(APP_DIR))
}

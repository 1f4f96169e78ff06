use crate::error::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Credentials and API version for one Twitter Ads account, loaded from the
/// `[twitter]` table of the config file.
#[derive(Deserialize, Debug, Clone)]
pub struct TwitterConfig {
    pub version: String,
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

/// Full settings file: one table per media platform.
#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub twitter: TwitterConfig,
}

impl Settings {
    /// Loads settings from a TOML file at `path`.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ConfigParse`] if it is not valid TOML or is missing fields.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

//! Client library for downloading advertising data (accounts, campaigns,
//! per-day campaign metrics) from the Twitter Ads API over OAuth1-signed
//! requests.
//!
//! Construct an [`AdDownloader`] from a TOML config file, pick a media
//! platform, and call the fetchers on the resulting [`AdsApi`] handle.

mod config;
mod data;
mod error;
mod oauth;
mod records;
pub mod runner;
mod twitter;

pub use config::{Settings, TwitterConfig};
pub use error::Error;
pub use records::{Account, Campaign, CampaignInsight};
pub use twitter::{AdsApi, TwitterAds};

/// Supported media platforms. Adding a platform means adding a variant here
/// and a match arm in [`AdDownloader::client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media {
    Twitter,
}

/// Entry point: loads the settings file once and hands out per-media API
/// clients. Each client is built once and reused across calls.
#[derive(Debug)]
pub struct AdDownloader {
    twitter: TwitterAds,
}

impl AdDownloader {
    /// Loads the TOML settings file at `path` and builds the backing clients.
    ///
    /// # Errors
    /// Propagates config read/parse errors untranslated.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        let settings = Settings::from_path(path)?;
        Ok(Self::from_settings(&settings))
    }

    pub fn from_settings(settings: &Settings) -> Self {
        AdDownloader {
            twitter: TwitterAds::new(&settings.twitter),
        }
    }

    /// Returns the API client for `media`.
    pub fn client(&self, media: Media) -> &dyn AdsApi {
        match media {
            Media::Twitter => &self.twitter,
        }
    }
}

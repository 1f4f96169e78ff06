//! Flat records returned to callers, plus the raw response shapes they are
//! built from. The remote wraps every list response in a top-level `data`
//! array; a null or absent array is treated as an empty result.

use crate::error::Error;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format used by the Ads API, e.g. `2013-04-16T07:00:00Z`.
const REMOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// An advertising account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub business_id: String,
    pub business_name: String,
    pub timezone: String,
    pub timezone_switch_at: DateTime<Utc>,
    pub country_code: String,
}

/// A campaign under an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub status: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One day of metrics for one campaign. Emitted only when at least one of
/// `impressions`, `clicks`, or `spend` is nonzero for that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignInsight {
    /// Unix timestamp of the metric day at midnight UTC.
    pub time: i64,
    pub account_id: String,
    pub campaign_id: String,
    pub campaign_name: String,
    pub impressions: u64,
    pub clicks: u64,
    /// Spend in whole currency units, converted from micro-currency.
    pub spend: f64,
    pub currency: String,
}

/// Top-level response wrapper shared by all list endpoints.
#[derive(Deserialize, Debug)]
pub(crate) struct DataEnvelope<T> {
    data: Option<Vec<T>>,
}

impl<T> DataEnvelope<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Deserialize, Debug)]
pub(crate) struct RawAccount {
    pub id: String,
    pub name: String,
    pub business_id: String,
    pub business_name: String,
    pub timezone: String,
    pub timezone_switch_at: String,
    pub country_code: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RawCampaign {
    pub id: String,
    pub name: String,
    pub entity_status: String,
    pub currency: String,
    pub created_at: String,
}

/// Per-entity block of a stats response. Metrics are nested under `id_data`;
/// the first element carries the unsegmented per-day arrays.
#[derive(Deserialize, Debug)]
pub(crate) struct RawStatsEntity {
    pub id: String,
    #[serde(default)]
    pub id_data: Vec<RawIdData>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct RawIdData {
    pub metrics: RawMetrics,
}

/// Per-day metric arrays. The remote sends `null` instead of an array when a
/// campaign had no activity in the window, and may use `null` for single days.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct RawMetrics {
    pub impressions: Option<Vec<Option<u64>>>,
    pub clicks: Option<Vec<Option<u64>>>,
    pub billed_charge_local_micro: Option<Vec<Option<i64>>>,
}

fn parse_remote_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    Ok(NaiveDateTime::parse_from_str(raw, REMOTE_TIMESTAMP_FORMAT)?.and_utc())
}

impl TryFrom<RawAccount> for Account {
    type Error = Error;

    fn try_from(raw: RawAccount) -> Result<Self, Error> {
        Ok(Account {
            id: raw.id,
            name: raw.name,
            business_id: raw.business_id,
            business_name: raw.business_name,
            timezone: raw.timezone,
            timezone_switch_at: parse_remote_timestamp(&raw.timezone_switch_at)?,
            country_code: raw.country_code,
        })
    }
}

impl TryFrom<RawCampaign> for Campaign {
    type Error = Error;

    fn try_from(raw: RawCampaign) -> Result<Self, Error> {
        // The remote does not expose a usable updated_at; both fields are
        // sourced from created_at.
        let created_at = parse_remote_timestamp(&raw.created_at)?;
        Ok(Campaign {
            id: raw.id,
            name: raw.name.trim().to_string(),
            status: raw.entity_status,
            currency: raw.currency,
            created_at,
            updated_at: created_at,
        })
    }
}

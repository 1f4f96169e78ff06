//! Reshaping of raw stats responses into flat per-day insight records.

use crate::records::{CampaignInsight, RawStatsEntity};
use chrono::{Days, NaiveDate, NaiveTime};
use std::collections::HashMap;

const MICROS_PER_CURRENCY_UNIT: f64 = 1_000_000.0;

/// Campaign fields carried over into every insight record.
#[derive(Debug, Clone)]
pub(crate) struct CampaignRef {
    pub name: String,
    pub currency: String,
}

/// Flattens one stats response into insight records, one per (campaign, day)
/// pair with activity.
///
/// # Arguments
/// * `account_id` - The account the stats were requested for.
/// * `start` - First day of the requested window.
/// * `days` - Window length in days; per-day metric arrays are read at
///   offsets `0..days`.
/// * `entities` - The `data` array of the stats response.
/// * `campaigns` - Lookup from campaign id to the name/currency to copy.
///
/// A campaign whose impressions array is null or absent had no data for the
/// window and is skipped entirely. Days where impressions, clicks, and spend
/// are all zero are skipped. Emission order follows the response's entity
/// order, then day order.
pub(crate) fn flatten_stats(
    account_id: &str,
    start: NaiveDate,
    days: i64,
    entities: Vec<RawStatsEntity>,
    campaigns: &HashMap<String, CampaignRef>,
) -> Vec<CampaignInsight> {
    let mut insights = Vec::new();

    for entity in entities {
        let Some(campaign) = campaigns.get(&entity.id) else {
            continue;
        };
        let Some(id_data) = entity.id_data.into_iter().next() else {
            continue;
        };
        let metrics = id_data.metrics;
        let Some(impressions) = metrics.impressions else {
            continue;
        };
        let clicks = metrics.clicks.unwrap_or_default();
        let micros = metrics.billed_charge_local_micro.unwrap_or_default();

        for offset in 0..days {
            let day = offset as usize;
            let day_impressions = impressions.get(day).copied().flatten().unwrap_or(0);
            let day_clicks = clicks.get(day).copied().flatten().unwrap_or(0);
            let day_micros = micros.get(day).copied().flatten().unwrap_or(0);

            if day_impressions == 0 && day_clicks == 0 && day_micros == 0 {
                continue;
            }

            let date = start + Days::new(offset as u64);
            insights.push(CampaignInsight {
                time: date.and_time(NaiveTime::MIN).and_utc().timestamp(),
                account_id: account_id.to_string(),
                campaign_id: entity.id.clone(),
                campaign_name: campaign.name.clone(),
                impressions: day_impressions,
                clicks: day_clicks,
                spend: day_micros as f64 / MICROS_PER_CURRENCY_UNIT,
                currency: campaign.currency.clone(),
            });
        }
    }

    insights
}

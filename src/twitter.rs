use crate::config::TwitterConfig;
use crate::data::{flatten_stats, CampaignRef};
use crate::error::Error;
use crate::oauth::{self, Credentials};
use crate::records::{
    Account, Campaign, CampaignInsight, DataEnvelope, RawAccount, RawCampaign, RawStatsEntity,
};
use chrono::{Days, NaiveDate};
use log::debug;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Url};
use std::collections::HashMap;

const ADS_API_BASE: &str = "https://ads-api.twitter.com";

/// Remote API limit on entity ids per stats request.
const CAMPAIGNS_PER_STATS_REQUEST: usize = 20;

/// Remote API limit on the stats window, inclusive of both endpoints.
const MAX_STATS_WINDOW_DAYS: i64 = 7;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AdsApi: Send + Sync + 'static {
    /// Fetches the advertising accounts visible to the credentials.
    ///
    /// # Returns
    /// A Result containing either the accounts in API order or an Error.
    async fn get_accounts(&self) -> Result<Vec<Account>, Error>;

    /// Fetches the campaigns under one account.
    ///
    /// # Arguments
    /// * `account_id` - The account to list campaigns for.
    ///
    /// # Returns
    /// A Result containing either the campaigns in API order or an Error.
    async fn get_campaigns(&self, account_id: &str) -> Result<Vec<Campaign>, Error>;

    /// Fetches per-day campaign metrics for an inclusive date range of at
    /// most seven days.
    ///
    /// # Arguments
    /// * `account_id` - The account to fetch metrics for.
    /// * `start` - First day of the window.
    /// * `end` - Last day of the window, inclusive.
    ///
    /// # Returns
    /// A Result containing one [`CampaignInsight`] per (campaign, day) pair
    /// with activity, or an Error. Fails before any request is issued when
    /// the window exceeds the remote's seven-day limit.
    async fn get_campaign_insights(
        &self,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CampaignInsight>, Error>;
}

/// Twitter Ads API client. One HTTP client and one set of credentials per
/// instance, reused for every call.
#[derive(Debug)]
pub struct TwitterAds {
    client: Client,
    credentials: Credentials,
    base_url: String,
    api_version: String,
}

impl TwitterAds {
    pub fn new(config: &TwitterConfig) -> Self {
        Self::with_base_url(config, ADS_API_BASE)
    }

    fn with_base_url(config: &TwitterConfig, base_url: &str) -> Self {
        TwitterAds {
            client: Client::new(),
            credentials: Credentials {
                consumer_key: config.consumer_key.clone(),
                consumer_secret: config.consumer_secret.clone(),
                token: config.access_token.clone(),
                token_secret: config.access_token_secret.clone(),
            },
            base_url: base_url.to_string(),
            api_version: config.version.clone(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| Error::UrlParsingFailed(url::ParseError::SetHostOnCannotBeABaseUrl))?
            .extend(segments);
        Ok(url)
    }

    async fn signed_get(&self, url: Url) -> Result<reqwest::Response, Error> {
        let authorization = oauth::authorization_header("GET", &url, &self.credentials);
        let resp = self
            .client
            .get(url)
            .header(AUTHORIZATION, authorization)
            .header(USER_AGENT, user_agent(&self.api_version))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http { status, body });
        }
        Ok(resp)
    }
}

#[async_trait::async_trait]
impl AdsApi for TwitterAds {
    async fn get_accounts(&self) -> Result<Vec<Account>, Error> {
        let url = self.endpoint(&[major_version(&self.api_version), "accounts"])?;

        debug!("fetching accounts");
        let resp = self.signed_get(url).await?;
        let envelope: DataEnvelope<RawAccount> = resp.json().await?;

        envelope
            .into_items()
            .into_iter()
            .map(Account::try_from)
            .collect()
    }

    async fn get_campaigns(&self, account_id: &str) -> Result<Vec<Campaign>, Error> {
        let url = self.endpoint(&[
            major_version(&self.api_version),
            "accounts",
            account_id,
            "campaigns",
        ])?;

        debug!("fetching campaigns for account {account_id}");
        let resp = self.signed_get(url).await?;
        let envelope: DataEnvelope<RawCampaign> = resp.json().await?;

        envelope
            .into_items()
            .into_iter()
            .map(Campaign::try_from)
            .collect()
    }

    async fn get_campaign_insights(
        &self,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CampaignInsight>, Error> {
        if start > end {
            return Err(Error::StartDateAfterEndDate {
                start_date: start.to_string(),
                end_date: end.to_string(),
            });
        }
        let days = (end - start).num_days() + 1;
        if days > MAX_STATS_WINDOW_DAYS {
            return Err(Error::DateRangeExceeded {
                days,
                limit: MAX_STATS_WINDOW_DAYS,
            });
        }

        let campaigns = self.get_campaigns(account_id).await?;
        let lookup: HashMap<String, CampaignRef> = campaigns
            .iter()
            .map(|c| {
                (
                    c.id.clone(),
                    CampaignRef {
                        name: c.name.clone(),
                        currency: c.currency.clone(),
                    },
                )
            })
            .collect();
        let ids: Vec<&str> = campaigns.iter().map(|c| c.id.as_str()).collect();

        // end_time is an exclusive upper bound at day precision.
        let end_exclusive = end + Days::new(1);

        let mut insights = Vec::new();
        for chunk in ids.chunks(CAMPAIGNS_PER_STATS_REQUEST) {
            let mut url =
                self.endpoint(&[major_version(&self.api_version), "stats", "accounts", account_id])?;
            url.query_pairs_mut()
                .append_pair("start_time", &start.format(DATE_FORMAT).to_string())
                .append_pair("end_time", &end_exclusive.format(DATE_FORMAT).to_string())
                .append_pair("entity", "CAMPAIGN")
                .append_pair("entity_ids", &chunk.join(","))
                .append_pair("granularity", "DAY")
                .append_pair("metric_groups", "BILLING,ENGAGEMENT")
                .append_pair("placement", "ALL_ON_TWITTER");

            debug!(
                "fetching stats for account {account_id}, {} campaign(s)",
                chunk.len()
            );
            let resp = self.signed_get(url).await?;
            let envelope: DataEnvelope<RawStatsEntity> = resp.json().await?;

            insights.extend(flatten_stats(
                account_id,
                start,
                days,
                envelope.into_items(),
                &lookup,
            ));
        }

        Ok(insights)
    }
}

/// Leading dotted segment of the configured version, e.g. "11.0.0" -> "11".
fn major_version(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}

fn user_agent(api_version: &str) -> String {
    format!(
        "ad-downloader/{} twitter-ads-api/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        api_version,
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

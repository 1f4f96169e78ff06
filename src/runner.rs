//! Runs one fetch operation and writes the records as JSON lines.

use crate::error::Error;
use crate::twitter::AdsApi;
use chrono::NaiveDate;
use log::info;
use serde::Serialize;
use std::io::Write;

pub async fn write_accounts(api: &dyn AdsApi, out: &mut impl Write) -> Result<(), Error> {
    let accounts = api.get_accounts().await?;
    info!("fetched {} account(s)", accounts.len());
    write_records(&accounts, out)
}

pub async fn write_campaigns(
    api: &dyn AdsApi,
    account_id: &str,
    out: &mut impl Write,
) -> Result<(), Error> {
    let campaigns = api.get_campaigns(account_id).await?;
    info!("fetched {} campaign(s) for account {account_id}", campaigns.len());
    write_records(&campaigns, out)
}

pub async fn write_insights(
    api: &dyn AdsApi,
    account_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    out: &mut impl Write,
) -> Result<(), Error> {
    let insights = api.get_campaign_insights(account_id, start, end).await?;
    info!("fetched {} insight record(s) for account {account_id}", insights.len());
    write_records(&insights, out)
}

fn write_records<T: Serialize>(records: &[T], out: &mut impl Write) -> Result<(), Error> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}

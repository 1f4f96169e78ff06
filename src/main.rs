use ad_downloader::{runner, AdDownloader, Error, Media};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::error;
use std::path::PathBuf;

#[derive(Parser)]
struct Args {
    /// Path to the TOML config file with a [twitter] credentials table
    #[arg(long, default_value = "config.toml", env = "AD_DOWNLOADER_CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    command: Fetch,
}

#[derive(Subcommand)]
enum Fetch {
    /// List advertising accounts
    Accounts,

    /// List campaigns for an account
    Campaigns { account_id: String },

    /// Per-day campaign metrics for an account over a date range of at most
    /// seven days
    Insights {
        account_id: String,

        #[arg(help = "Date should be in the form YYYY-MM-DD", value_parser = validate_date)]
        start: NaiveDate,

        #[arg(help = "Date should be in the form YYYY-MM-DD", value_parser = validate_date)]
        end: NaiveDate,
    },
}

fn validate_date(s: &str) -> Result<NaiveDate, String> {
    let error_message = "Invalid date, expected YYYY-MM-DD";

    let parts = s
        .split("-")
        .map(|part| part.parse::<u16>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| error_message)?;

    match parts.as_slice() {
        &[year, month, day] if month <= 12 && day <= 31 => {
            Ok(
                NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
                    .ok_or(error_message)?,
            )
        }
        _ => Err(error_message.to_string()),
    }
}

async fn run(args: &Args) -> Result<(), Error> {
    let downloader = AdDownloader::from_path(&args.config)?;
    let api = downloader.client(Media::Twitter);
    let mut out = std::io::stdout().lock();

    match &args.command {
        Fetch::Accounts => runner::write_accounts(api, &mut out).await,
        Fetch::Campaigns { account_id } => {
            runner::write_campaigns(api, account_id, &mut out).await
        }
        Fetch::Insights {
            account_id,
            start,
            end,
        } => runner::write_insights(api, account_id, *start, *end, &mut out).await,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    env_logger::init();

    if let Err(err) = run(&args).await {
        error!("failed to download ads data: {}", err);
        std::process::exit(1);
    }
}

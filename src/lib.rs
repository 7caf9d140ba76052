pub mod calendar;
pub mod cli;
pub mod clist;
pub mod error;
pub mod models;
pub mod platform;
pub mod publish;
pub mod settings;

#[cfg(test)]
mod fakes;

use calendar::{Authenticator, GoogleAuthenticator};
use cli::{Cli, CliOptions};
use clist::ClistClient;
use error::SyncError;
use models::ContestRecord;
use publish::{publish_all, PublishSummary};
use settings::{AppPaths, Settings};
use std::io::Write;

pub struct Config {
    pub api_key: String,
    pub paths: AppPaths,
    pub options: CliOptions,
}

impl Config {
    pub fn build(cli: &Cli) -> Result<Config, SyncError> {
        let paths = match &cli.config_dir {
            Some(dir) => AppPaths::in_dir(dir),
            None => AppPaths::beside_executable(),
        };
        let settings = Settings::load(&paths.settings)?;

        Ok(Config {
            api_key: settings.api_key,
            paths,
            options: CliOptions::from(cli),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    DryRun {
        fetched: usize,
    },
    Published {
        fetched: usize,
        summary: PublishSummary,
    },
}

fn print_contests(contests: &[ContestRecord], out: &mut impl Write) -> Result<(), SyncError> {
    for contest in contests {
        writeln!(out, "{} | {}", contest.name, contest.start)?;
    }
    Ok(())
}

/// Fetch, then either list the contests (dry run) or authenticate and add
/// them to the calendar.
pub async fn sync<A: Authenticator>(
    fetcher: &ClistClient,
    authenticator: &A,
    options: &CliOptions,
    out: &mut impl Write,
) -> Result<SyncOutcome, SyncError> {
    tracing::info!("Fetching contests from clist.by...");
    let contests = fetcher.fetch_contests(&options.platforms).await?;
    tracing::info!("Fetched {} contests.", contests.len());

    if options.dry_run {
        tracing::info!("Dry run: not touching the calendar");
        print_contests(&contests, out)?;
        return Ok(SyncOutcome::DryRun {
            fetched: contests.len(),
        });
    }

    tracing::info!("Authenticating with Google...");
    let session = authenticator.authenticate().await?;

    tracing::info!("Adding events to calendar...");
    let summary = publish_all(&session, &contests).await;

    Ok(SyncOutcome::Published {
        fetched: contests.len(),
        summary,
    })
}

pub async fn run(config: Config) -> Result<SyncOutcome, SyncError> {
    let fetcher = ClistClient::new(config.api_key.as_str());
    let authenticator = GoogleAuthenticator::new(&config.paths);

    let outcome = sync(
        &fetcher,
        &authenticator,
        &config.options,
        &mut std::io::stdout(),
    )
    .await?;

    if let SyncOutcome::Published { summary, .. } = &outcome {
        tracing::info!(
            "Done at {}: {} added, {} skipped, {} failed",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            summary.created,
            summary.skipped,
            summary.failed
        );
    }

    Ok(outcome)
}

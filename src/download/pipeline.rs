//! Fetch → dispatch → download pipeline.

use std::pin::pin;

use chrono::{DateTime, Local};
use futures::StreamExt;
use reqwest::Client;

use crate::api::types::Session;
use crate::config::Config;
use crate::download::dispatcher::Dispatcher;
use crate::download::recording::Downloader;
use crate::download::state::RunSummary;
use crate::error::Result;
use crate::fs::{ensure_dir, remove_partial_files};
use crate::library::{fetch_recordings, plan_windows, RecordingLibrary};

/// Log in and download every recording of the configured date range.
///
/// Authentication failures return before any worker is started.
pub async fn run<L>(library: &L, config: &Config, client: Client) -> Result<RunSummary>
where
    L: RecordingLibrary + ?Sized,
{
    run_at(library, config, client, Local::now()).await
}

/// [`run`] with an explicit reference time.
pub async fn run_at<L>(
    library: &L,
    config: &Config,
    client: Client,
    now: DateTime<Local>,
) -> Result<RunSummary>
where
    L: RecordingLibrary + ?Sized,
{
    let session = library
        .login(&config.account.email, &config.account.password)
        .await?;
    tracing::info!("Logged in as {}", config.account.email);

    download_library(library, &session, config, client, now).await
}

/// Download every recording of the configured date range with an open session.
///
/// A failed library query stops fetching; recordings already queued are still
/// downloaded before the error is returned.
pub async fn download_library<L>(
    library: &L,
    session: &Session,
    config: &Config,
    client: Client,
    now: DateTime<Local>,
) -> Result<RunSummary>
where
    L: RecordingLibrary + ?Sized,
{
    let options = &config.options;
    let output_dir = config.output_directory();

    ensure_dir(&output_dir)?;
    let removed = remove_partial_files(&output_dir)?;
    if removed > 0 {
        tracing::info!("Removed {} interrupted download(s)", removed);
    }

    let mut dispatcher = Dispatcher::start(options.workers, Downloader::new(client, output_dir));

    let windows = plan_windows(options.days, now, options.window_strategy);
    tracing::info!(
        "Querying {} day(s) of recordings in {} window(s)",
        options.days + 1,
        windows.len()
    );

    let mut recordings = pin!(fetch_recordings(library, session, windows));
    let mut fetch_error = None;

    while let Some(next) = recordings.next().await {
        match next {
            Ok(recording) => dispatcher.submit(recording).await,
            Err(e) => {
                fetch_error = Some(e);
                break;
            }
        }
    }

    let submitted = dispatcher.submitted();
    let summary = dispatcher.join().await;

    match fetch_error {
        Some(e) => {
            tracing::error!(
                "Library fetch aborted after {} recording(s) ({} downloaded, {} skipped, {} failed)",
                submitted,
                summary.downloaded_count,
                summary.skipped_count,
                summary.failed_count
            );
            Err(e)
        }
        None => {
            tracing::info!("All {} recording(s) processed", submitted);
            Ok(summary)
        }
    }
}

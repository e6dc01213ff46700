//! Recording file downloading.

use std::path::{Path, PathBuf};

use chrono::Utc;
use futures::StreamExt;
use reqwest::{Client, Response};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::download::state::{ItemReport, Outcome};
use crate::error::DownloadError;
use crate::fs::{get_partial_path, get_recording_path};
use crate::media::Recording;

type DownloadResult<T> = std::result::Result<T, DownloadError>;

/// Downloads recordings into one output directory.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
    output_dir: PathBuf,
}

impl Downloader {
    pub fn new(client: Client, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Process one recording on behalf of worker `worker`.
    ///
    /// Never fails: errors are logged and reported as [`Outcome::Failed`].
    pub async fn process(&self, worker: usize, recording: Recording) -> ItemReport {
        let outcome = match self.download_recording(worker, &recording).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    "[W{}] Failed to download recording {}: {}",
                    worker,
                    recording.unique_id,
                    e
                );
                Outcome::Failed(e)
            }
        };

        ItemReport {
            worker,
            unique_id: recording.unique_id,
            outcome,
        }
    }

    /// Download a recording unless its file already exists.
    pub async fn download_recording(
        &self,
        worker: usize,
        recording: &Recording,
    ) -> DownloadResult<Outcome> {
        let output_path = get_recording_path(&self.output_dir, recording)
            .map_err(|e| DownloadError::InvalidFilename(e.to_string()))?;
        let filename = output_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Check if file already exists
        if tokio::fs::try_exists(&output_path).await? {
            tracing::info!(
                "[W{}] Skipping video already downloaded: {}",
                worker,
                filename
            );
            return Ok(Outcome::Skipped { path: output_path });
        }

        if let Some(expires_at) = recording.url_expires_at {
            if recording.is_url_expired(Utc::now()) {
                return Err(DownloadError::UrlExpired(expires_at));
            }
        }

        tracing::debug!("[W{}] Downloading {}", worker, filename);

        let response = self.client.get(&recording.content_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status));
        }

        let bytes = download_to(response, &output_path).await?;

        tracing::info!(
            "[W{}] Downloaded video: {} ({} bytes)",
            worker,
            filename,
            bytes
        );

        Ok(Outcome::Downloaded {
            path: output_path,
            bytes,
        })
    }
}

/// Stream a successful response into `output_path`.
///
/// The body lands in a temporary sibling first and is renamed into place only
/// once complete; the temporary file is removed on any failure.
async fn download_to(response: Response, output_path: &Path) -> DownloadResult<u64> {
    let partial_path = get_partial_path(output_path);

    let result = write_and_commit(response, &partial_path, output_path).await;

    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(&partial_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to remove partial download {}: {}",
                    partial_path.display(),
                    e
                );
            }
        }
    }

    result
}

async fn write_and_commit(
    response: Response,
    partial_path: &Path,
    output_path: &Path,
) -> DownloadResult<u64> {
    let bytes = stream_to_file(response, partial_path).await?;
    tokio::fs::rename(partial_path, output_path).await?;
    Ok(bytes)
}

/// Write the response body to `path` chunk by chunk.
async fn stream_to_file(response: Response, path: &Path) -> DownloadResult<u64> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(downloaded)
}

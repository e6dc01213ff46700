//! Download outcome tracking.

use std::path::PathBuf;

use crate::error::DownloadError;

/// Terminal outcome of one recording.
#[derive(Debug)]
pub enum Outcome {
    /// The recording was fetched and written to `path`.
    Downloaded { path: PathBuf, bytes: u64 },
    /// A file already existed at `path`; nothing was transferred.
    Skipped { path: PathBuf },
    /// The download failed; no file was left at the final path.
    Failed(DownloadError),
}

impl Outcome {
    pub fn is_downloaded(&self) -> bool {
        matches!(self, Outcome::Downloaded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// What happened to one recording, and which worker handled it.
#[derive(Debug)]
pub struct ItemReport {
    pub worker: usize,
    pub unique_id: String,
    pub outcome: Outcome,
}

/// Aggregated statistics for a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub downloaded_count: u64,
    pub skipped_count: u64,
    pub failed_count: u64,
    pub bytes_downloaded: u64,
    pub reports: Vec<ItemReport>,
}

impl RunSummary {
    /// Add one item report.
    pub fn record(&mut self, report: ItemReport) {
        match &report.outcome {
            Outcome::Downloaded { bytes, .. } => {
                self.downloaded_count += 1;
                self.bytes_downloaded += bytes;
            }
            Outcome::Skipped { .. } => self.skipped_count += 1,
            Outcome::Failed(_) => self.failed_count += 1,
        }
        self.reports.push(report);
    }

    /// Add every report of a finished worker.
    pub fn extend(&mut self, reports: impl IntoIterator<Item = ItemReport>) {
        for report in reports {
            self.record(report);
        }
    }

    /// Number of recordings that reached a terminal outcome.
    pub fn total_processed(&self) -> u64 {
        self.downloaded_count + self.skipped_count + self.failed_count
    }

    /// Report for a given recording, if it was processed.
    pub fn report_for(&self, unique_id: &str) -> Option<&ItemReport> {
        self.reports.iter().find(|r| r.unique_id == unique_id)
    }
}

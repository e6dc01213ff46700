//! Download module.
//!
//! This module provides:
//! - The fixed-size worker pool and its work queue
//! - Idempotent per-recording downloads
//! - Outcome tracking and run statistics
//! - The end-to-end pipeline entry point

pub mod dispatcher;
pub mod pipeline;
pub mod recording;
pub mod state;
pub mod worker;

pub use dispatcher::{Dispatcher, QUEUE_CAPACITY};
pub use pipeline::{download_library, run, run_at};
pub use recording::Downloader;
pub use state::{ItemReport, Outcome, RunSummary};

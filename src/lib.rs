//! Arlo Downloader - download recorded videos from an Arlo camera library.
//!
//! Recordings of the requested date range are listed through the Arlo web
//! API and fetched by a fixed-size pool of workers into one directory.
//!
//! # Features
//!
//! - Single-range or per-day library queries
//! - Bounded concurrent downloads with backpressure
//! - Idempotent runs: recordings already on disk are skipped
//! - Failed downloads never leave partial files behind
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use arlo_downloader::{download, ArloApi, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = ArloApi::new()?;
//!
//!     let summary = download::run(&api, &config, api.http_client().clone()).await?;
//!     println!("{} downloaded", summary.downloaded_count);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod library;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{ArloApi, Session};
pub use config::{Config, WindowStrategy};
pub use download::{Dispatcher, Downloader, ItemReport, Outcome, RunSummary};
pub use error::{DownloadError, Error, Result};
pub use library::{DateWindow, RecordingLibrary};
pub use media::Recording;

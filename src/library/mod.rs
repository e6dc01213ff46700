//! Recording library module.
//!
//! This module provides:
//! - Date window planning (single range or one query per day)
//! - The `RecordingLibrary` seam to the vendor service
//! - Lazy, fail-fast streaming of recordings across windows

pub mod fetcher;
pub mod window;

pub use fetcher::{fetch_recordings, RecordingLibrary};
pub use window::{plan_windows, DateWindow, DateWindows};

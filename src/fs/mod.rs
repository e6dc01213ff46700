//! Filesystem module.
//!
//! Provides:
//! - Output path and directory management
//! - Filename validation and temporary download names

pub mod naming;
pub mod paths;

pub use naming::{is_partial_filename, partial_filename, sanitize_filename};
pub use paths::{ensure_dir, get_partial_path, get_recording_path, remove_partial_files};

//! Configuration module for the arlo-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Library query window strategies
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig};
pub use modes::WindowStrategy;
pub use validation::validate_config;

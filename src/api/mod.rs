//! Arlo API module.
//!
//! This module provides:
//! - HTTP client for the Arlo web API (login, library queries)
//! - API request and response types

pub mod client;
pub mod types;

pub use client::{ArloApi, API_BASE};
pub use types::*;

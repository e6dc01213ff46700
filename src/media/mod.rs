//! Media module for recording representation and parsing.

pub mod parser;
pub mod recording;

pub use parser::{parse_library, parse_library_entry};
pub use recording::{parse_url_expiry, Recording, RECORDING_EXTENSION};

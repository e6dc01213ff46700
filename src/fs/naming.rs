//! Filename validation and temporary names.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Suffix of in-flight downloads.
pub const PARTIAL_SUFFIX: &str = "part";

/// Validate and sanitize a filename by removing or replacing invalid characters.
///
/// Returns an error if the filename contains path traversal patterns.
pub fn sanitize_filename(name: &str) -> Result<String> {
    // Reject path traversal attempts
    if name.contains("..") {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Filename cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Hidden, unique name used while a download is in flight.
///
/// Lives next to the final file so the closing rename stays on one filesystem.
pub fn partial_filename(final_name: &str) -> String {
    format!(".{}.{}.{}", final_name, Uuid::new_v4().simple(), PARTIAL_SUFFIX)
}

fn partial_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"^\..+\.[0-9a-f]{{32}}\.{}$", PARTIAL_SUFFIX))
            .expect("partial pattern is a valid regex")
    })
}

/// Whether a directory entry is a leftover in-flight download of ours.
///
/// Only names produced by [`partial_filename`] match.
pub fn is_partial_filename(name: &str) -> bool {
    partial_pattern().is_match(name)
}

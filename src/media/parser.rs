//! Library entry parsing.

use crate::api::types::LibraryEntry;
use crate::media::recording::Recording;

/// Convert a library entry into a downloadable recording.
///
/// Entries without a content URL (still processing, or deleted upstream)
/// cannot be downloaded and yield `None`.
pub fn parse_library_entry(entry: &LibraryEntry) -> Option<Recording> {
    let url = entry
        .presigned_content_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())?;

    Some(Recording::new(
        entry.unique_id.clone(),
        entry.utc_created_date,
        url,
    ))
}

/// Convert a full library page, logging the entries that had to be dropped.
pub fn parse_library(entries: &[LibraryEntry]) -> Vec<Recording> {
    entries
        .iter()
        .filter_map(|entry| {
            let recording = parse_library_entry(entry);
            if recording.is_none() {
                tracing::warn!(
                    "Recording {} has no content URL, ignoring it",
                    entry.unique_id
                );
            }
            recording
        })
        .collect()
}

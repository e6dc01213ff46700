//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::{is_partial_filename, partial_filename};
use crate::media::Recording;

/// Final destination of a recording inside the output directory.
pub fn get_recording_path(output_dir: &Path, recording: &Recording) -> Result<PathBuf> {
    let filename = recording.generate_filename()?;
    Ok(output_dir.join(filename))
}

/// Temporary sibling path for an in-flight download of `final_path`.
pub fn get_partial_path(final_path: &Path) -> PathBuf {
    let name = final_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = final_path.parent().unwrap_or(Path::new("."));
    parent.join(partial_filename(&name))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Delete in-flight files left behind by an interrupted run.
///
/// Returns how many were removed.
pub fn remove_partial_files(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_partial = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(is_partial_filename)
            .unwrap_or(false);

        if is_partial {
            tracing::debug!("Removing stale partial download: {}", path.display());
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}

//! Atomic artifact writers

use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;
use tempfile::NamedTempFile;

/// Write `contents` to a temp file beside `path`, then move it into place.
///
/// The temp file is removed if any step fails before the final rename.
pub(crate) fn write_file_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent).context("Failed to create temp file")?;
    temp_file.write_all(contents).context("Failed to write to temp file")?;
    temp_file.as_file().sync_all().context("Failed to sync temp file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to move temp file to {}", path.display()))?;

    Ok(())
}

/// Serialize `value` as JSON and write it atomically
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize JSON")?;
    json.push('\n');

    write_file_atomic(path, json.as_bytes())
}

//! Snapshot persistence: the run's records as one replace-in-place CSV.
//!
//! External readers depend on exactly the columns
//! `Site, Title, URL, Summary, Scraped_At` in that order; no column may be
//! renamed or reordered. The file is written next to its final location and
//! renamed into place so a concurrent reader never observes a torn write.
//! A run that discovered nothing still writes a header-only file.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::error::PersistError;
use crate::models::ArticleRecord;

/// The fixed snapshot schema.
pub const SNAPSHOT_HEADERS: [&str; 5] = ["Site", "Title", "URL", "Summary", "Scraped_At"];

/// Serialize all records to `path`, replacing any prior snapshot.
///
/// The write goes to a sibling temp file first and is renamed over the
/// target, which is atomic on the same filesystem. Failure here is fatal
/// for the run — a run that cannot persist has produced no durable value.
#[instrument(level = "info", skip(records), fields(path = %path.display(), count = records.len()))]
pub fn write_snapshot(records: &[ArticleRecord], path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = tmp_path(path);
    {
        // headers are written explicitly so an empty run still produces them
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)?;
        writer.write_record(SNAPSHOT_HEADERS)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
    }
    fs::rename(&tmp, path)?;

    info!("Snapshot written");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    path.with_file_name(name)
}

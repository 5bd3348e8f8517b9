//! Checkpoint persistence
//!
//! Each crawl stage keeps its progress in a single JSON document, loaded once
//! at process start and rewritten wholesale after every completed unit of
//! work. Rewrites go through a temp file and an atomic rename so the
//! read-only status server can fetch the same file mid-crawl and always see
//! a complete document. Crash safety is bounded by the last fully completed
//! key: whatever was in flight is simply redone on the next run.

mod clubs;
mod errlog;
mod players;
mod traits;

pub use clubs::ClubsStore;
pub use errlog::{ErrorEntry, ErrorLog};
pub use players::{PlayersDocument, PlayersStore};
pub use traits::{Checkpoint, StorageError, StorageResult};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

/// Loads a JSON document, treating a missing file as the empty default.
pub(crate) fn read_document<T>(path: &Path) -> StorageResult<T>
where
    T: DeserializeOwned + Default,
{
    match std::fs::read(path) {
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(T::default()),
        Err(err) => Err(err.into()),
    }
}

/// Rewrites a JSON document wholesale via temp file + rename.
pub(crate) fn write_document<T: Serialize>(path: &Path, document: &T) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let bytes = serde_json::to_vec_pretty(document)?;
    let tmp = path.with_file_name(match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => format!("{}.tmp", name),
        None => ".document.tmp".to_string(),
    });
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

//! Append-only error log
//!
//! Every unrecoverable (post-retry) failure is appended as one JSON line with
//! enough context — URL, stage, surrounding key — to support manual or
//! automated re-run targeting. The log is never rewritten, only appended to,
//! and is served verbatim by the status server.

use crate::storage::traits::StorageResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One recorded failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Failure stage: `league-season`, `club`, or `player`.
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub error_message: String,
    /// Surrounding work key.
    pub context: String,
    pub timestamp: DateTime<Utc>,
}

pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Appends one entry as a JSON line.
    pub fn record(
        &self,
        kind: &str,
        url: &str,
        error_message: &str,
        context: &str,
    ) -> StorageResult<()> {
        let entry = ErrorEntry {
            kind: kind.to_string(),
            url: url.to_string(),
            error_message: error_message.to_string(),
            context: context.to_string(),
            timestamp: Utc::now(),
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(&entry)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

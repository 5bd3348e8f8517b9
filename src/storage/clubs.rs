//! Clubs-stage checkpoint store
//!
//! Maps season-league keys (`2021_GB1`) to the club URLs discovered on that
//! league-season page. The key set doubles as the completion record: a key
//! that is present was fully processed.

use crate::model::WorkKey;
use crate::storage::traits::{Checkpoint, StorageResult};
use crate::storage::{read_document, write_document};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

pub struct ClubsStore {
    path: PathBuf,
    document: BTreeMap<WorkKey, Vec<String>>,
}

impl ClubsStore {
    /// Opens the store, loading the existing document if one exists.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let document = read_document(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Discards all checkpoints and persists the empty document.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.document.clear();
        write_document(&self.path, &self.document)
    }

    /// Number of completed season-league keys.
    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn get(&self, key: &WorkKey) -> Option<&Vec<String>> {
        self.document.get(key)
    }

    /// All discovered club URLs across every completed key, deduplicated and
    /// sorted. The same club appears under many season keys; the players
    /// stage visits it once.
    pub fn club_urls(&self) -> Vec<String> {
        let unique: BTreeSet<&String> = self.document.values().flatten().collect();
        unique.into_iter().cloned().collect()
    }
}

impl Checkpoint for ClubsStore {
    type Payload = Vec<String>;

    fn is_complete(&self, key: &WorkKey) -> bool {
        self.document.contains_key(key)
    }

    fn mark_complete(&mut self, key: &WorkKey, payload: Vec<String>) -> StorageResult<()> {
        self.document.insert(key.clone(), payload);
        write_document(&self.path, &self.document)
    }

    fn completed_keys(&self) -> Vec<WorkKey> {
        self.document.keys().cloned().collect()
    }
}

//! Players-stage checkpoint store
//!
//! One document carries the whole players stage: the player URLs discovered
//! per club, the finished player records keyed by identity, and the per-URL
//! completion map. Rejected players (no professional transfers) are recorded
//! as completed with no identity, so they are never re-fetched.

use crate::model::{PlayerRecord, WorkKey};
use crate::storage::traits::{Checkpoint, StorageResult};
use crate::storage::{read_document, write_document};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The persisted players-stage document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PlayersDocument {
    /// Club URL → player profile URLs discovered on its squad page.
    #[serde(default)]
    pub clubs: BTreeMap<WorkKey, Vec<String>>,

    /// Identity key → player record. Overwritten wholesale on re-processing.
    #[serde(default)]
    pub players: BTreeMap<String, PlayerRecord>,

    /// Player URL → identity key it produced, or `None` for a semantic
    /// rejection. Presence means the URL is done.
    #[serde(default)]
    pub completed: BTreeMap<WorkKey, Option<String>>,
}

pub struct PlayersStore {
    path: PathBuf,
    document: PlayersDocument,
}

impl PlayersStore {
    pub fn open(path: &Path) -> StorageResult<Self> {
        let document = read_document(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Discards all checkpoints and records, persisting the empty document.
    pub fn clear(&mut self) -> StorageResult<()> {
        self.document = PlayersDocument::default();
        write_document(&self.path, &self.document)
    }

    // Club-URL namespace (squad pages).

    pub fn is_club_complete(&self, key: &WorkKey) -> bool {
        self.document.clubs.contains_key(key)
    }

    pub fn mark_club_complete(
        &mut self,
        key: &WorkKey,
        player_urls: Vec<String>,
    ) -> StorageResult<()> {
        self.document.clubs.insert(key.clone(), player_urls);
        write_document(&self.path, &self.document)
    }

    pub fn club_player_urls(&self, key: &WorkKey) -> Vec<String> {
        self.document.clubs.get(key).cloned().unwrap_or_default()
    }

    // Player records.

    /// Inserts or overwrites a record under its identity key. Not persisted
    /// until the player URL is marked complete, so a record and its
    /// checkpoint always land in the same write.
    pub fn upsert_player(&mut self, record: PlayerRecord) {
        self.document
            .players
            .insert(record.identity_key.clone(), record);
    }

    pub fn player(&self, identity_key: &str) -> Option<&PlayerRecord> {
        self.document.players.get(identity_key)
    }

    pub fn player_count(&self) -> usize {
        self.document.players.len()
    }

    pub fn completed_count(&self) -> usize {
        self.document.completed.len()
    }
}

impl Checkpoint for PlayersStore {
    /// Identity key the URL produced; `None` records a rejection.
    type Payload = Option<String>;

    fn is_complete(&self, key: &WorkKey) -> bool {
        self.document.completed.contains_key(key)
    }

    fn mark_complete(&mut self, key: &WorkKey, payload: Option<String>) -> StorageResult<()> {
        self.document.completed.insert(key.clone(), payload);
        write_document(&self.path, &self.document)
    }

    fn completed_keys(&self) -> Vec<WorkKey> {
        self.document.completed.keys().cloned().collect()
    }
}

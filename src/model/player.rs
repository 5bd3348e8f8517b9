//! Player records and position normalization

use crate::model::SeasonLabel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Season-indexed professional club affiliations of one player.
pub type SeasonClubs = BTreeMap<SeasonLabel, BTreeSet<String>>;

/// Normalized playing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    GK,
    DF,
    MF,
    ST,
    Unknown,
}

impl Position {
    /// Normalizes free-form position text via case-insensitive keyword
    /// matching, checked in goalkeeper → defence → midfield → attack order so
    /// that e.g. "Attacking Midfield" lands on MF.
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("keeper") {
            Position::GK
        } else if text.contains("defender") || text.contains("back") || text.contains("defence") {
            Position::DF
        } else if text.contains("midfield") {
            Position::MF
        } else if text.contains("forward")
            || text.contains("winger")
            || text.contains("striker")
            || text.contains("attack")
        {
            Position::ST
        } else {
            Position::Unknown
        }
    }
}

/// One player's entry in the output dataset, keyed by `identity_key`.
///
/// Records are overwritten wholesale on re-processing, never deep-merged:
/// the identity key makes re-scraping the same player idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub identity_key: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    pub country_code: String,
    pub date_of_birth: NaiveDate,
    pub seasons: SeasonClubs,
}

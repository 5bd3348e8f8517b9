//! Core data types for the crawl and reduction pipeline

mod player;
mod season;
mod transfer;

pub use player::{PlayerRecord, Position, SeasonClubs};
pub use season::SeasonLabel;
pub use transfer::{parse_date_text, FeeKind, RawTransferEvent};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one unit of resumable crawl progress.
///
/// Keys are unique within their namespace (season-league keys in the clubs
/// stage, club and player URLs in the players stage) and compare by value.
/// They are generated deterministically from configuration or from the output
/// of a prior stage, and are never mutated, only marked complete.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkKey(String);

impl WorkKey {
    /// Key for one league season, e.g. `2021_GB1`.
    pub fn league_season(year: i32, league_code: &str) -> Self {
        Self(format!("{}_{}", year, league_code))
    }

    /// Key for a discovered club or player URL.
    pub fn url(url: &str) -> Self {
        Self(url.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

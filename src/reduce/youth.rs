//! Youth/reserve club-name classification
//!
//! The transfer ledger mixes senior clubs with youth academies, reserve
//! squads, and non-club placeholders ("Retired", "Without Club"). Detection
//! is a fixed classifier over the club-name string; anything it matches is
//! excluded from the professional-career dataset.

/// Literal tokens that mark a non-professional destination.
const YOUTH_SUBSTRINGS: &[&str] = &[
    "youth",
    "reserve",
    "retired",
    "without club",
    "u16",
    "u17",
    "u18",
    "u19",
    "u20",
    "u21",
    "u23",
];

/// Reserve-team suffixes: "FC Barcelona B", "Borussia Dortmund II".
const RESERVE_SUFFIXES: &[&str] = &[" b", " ii"];

/// Known B-team naming patterns that carry neither a "B" suffix nor an age
/// token: "Real Madrid Castilla", "Jong Ajax", "Bayern Munich Amateure".
const B_TEAM_PATTERNS: &[&str] = &["castilla", "jong ", "amateure"];

/// Returns true when the club name designates a youth or reserve squad, or is
/// unusable. An empty or whitespace-only name is treated as youth, so the
/// classifier fails closed.
pub fn is_youth_or_reserve(club_name: &str) -> bool {
    let name = club_name.trim().to_lowercase();
    if name.is_empty() {
        return true;
    }
    if YOUTH_SUBSTRINGS.iter().any(|token| name.contains(token)) {
        return true;
    }
    if RESERVE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return true;
    }
    B_TEAM_PATTERNS.iter().any(|pattern| name.contains(pattern))
}

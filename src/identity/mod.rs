//! Entity identity resolution
//!
//! A scraped player has no stable site-independent ID, so the dataset keys
//! records by a composite natural key derived from last name, date of birth,
//! and nationality code. Two extraction runs of the same underlying player
//! produce the same key, which makes re-processing overwrite rather than
//! duplicate.

mod nationality;

pub use nationality::{country_code, country_code_or_fallback};

use chrono::NaiveDate;

/// Splits a raw full name into (first, last).
///
/// The last name is every token after the first; a single-token name is
/// reused as both first and last name.
pub fn split_name(full_name: &str) -> (String, String) {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => (String::new(), String::new()),
        [only] => (only.to_string(), only.to_string()),
        [first, rest @ ..] => (first.to_string(), rest.join(" ")),
    }
}

/// Derives the composite natural key:
/// `lowercase(last_name)` with whitespace replaced by underscores, the date
/// of birth, and the three-letter country code, joined by underscores.
pub fn identity_key(last_name: &str, date_of_birth: NaiveDate, country_code: &str) -> String {
    let last = last_name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!(
        "{}_{}_{}",
        last,
        date_of_birth.format("%Y-%m-%d"),
        country_code
    )
}

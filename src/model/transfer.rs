//! Raw transfer ledger rows and their textual parsing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two date formats the site renders transfer dates in: slash-delimited
/// (`06/01/2019`) and month-name-delimited (`Jun 1, 2019`).
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%b %d, %Y"];

/// Parses a textual date in either supported format.
///
/// Returns `None` when the text matches neither format; such dates are
/// unusable for ordering and season bucketing.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

/// One row of a player's raw transfer ledger, immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransferEvent {
    pub season_label: String,
    pub date_text: String,
    pub from_club_name: String,
    pub to_club_name: String,
    pub fee_text: String,
}

impl RawTransferEvent {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date_text(&self.date_text)
    }
}

/// Fee-text classification of a transfer.
///
/// End-of-loan rows are recording-only: they close a loan that was already
/// captured when it began and contribute no club affiliation themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeKind {
    Permanent,
    Loan,
    EndOfLoan,
}

impl FeeKind {
    pub fn classify(fee_text: &str) -> Self {
        let fee = fee_text.to_lowercase();
        if fee.contains("end of loan") {
            FeeKind::EndOfLoan
        } else if fee.contains("loan") {
            FeeKind::Loan
        } else {
            FeeKind::Permanent
        }
    }
}

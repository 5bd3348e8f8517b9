//! Transfer-history reduction
//!
//! The site's raw transfer ledger records movement, not team membership. This
//! module reconstructs the actual deliverable: which senior clubs a player
//! was affiliated with in which season. Loans intentionally keep both ends of
//! the move visible within the season the loan began; end-of-loan rows close
//! a loan that was already captured and contribute nothing themselves.

mod youth;

pub use youth::is_youth_or_reserve;

use crate::model::{FeeKind, RawTransferEvent, SeasonClubs, SeasonLabel};
use chrono::NaiveDate;
use std::fmt;

/// Why the reducer produced no record for a player.
///
/// A rejection is a valid terminal outcome, not an error: players whose
/// entire ledger is youth-only or unusable are out of scope for the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoProfessionalTransfers,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoProfessionalTransfers => f.write_str("no professional transfers"),
        }
    }
}

/// Reduces one player's raw transfer ledger to season-indexed professional
/// club affiliations.
///
/// The input order does not matter; qualifying rows are sorted by parsed
/// date. Rows whose date parses in neither supported format cannot be
/// bucketed into a season and are dropped before sorting, so ties between
/// the remaining rows keep their original ledger order (stable sort).
pub fn reduce_transfers(events: &[RawTransferEvent]) -> Result<SeasonClubs, Rejection> {
    // Professional transfers only: a usable date and a senior to-club.
    let mut qualifying: Vec<(NaiveDate, &RawTransferEvent)> = events
        .iter()
        .filter(|event| !is_youth_or_reserve(&event.to_club_name))
        .filter_map(|event| event.parsed_date().map(|date| (date, event)))
        .collect();

    if qualifying.is_empty() {
        return Err(Rejection::NoProfessionalTransfers);
    }

    qualifying.sort_by_key(|(date, _)| *date);

    let mut seasons = SeasonClubs::new();
    for (date, event) in qualifying {
        let kind = FeeKind::classify(&event.fee_text);
        if kind == FeeKind::EndOfLoan {
            continue;
        }

        let label = SeasonLabel::from_date(date);

        // Re-checked even though the filter above already excluded youth
        // destinations; the from-club of a loan has not been filtered yet.
        if !is_youth_or_reserve(&event.to_club_name) {
            seasons
                .entry(label.clone())
                .or_default()
                .insert(event.to_club_name.trim().to_string());
        }
        if kind == FeeKind::Loan && !is_youth_or_reserve(&event.from_club_name) {
            seasons
                .entry(label)
                .or_default()
                .insert(event.from_club_name.trim().to_string());
        }
    }

    seasons.retain(|_, clubs| !clubs.is_empty());
    if seasons.is_empty() {
        return Err(Rejection::NoProfessionalTransfers);
    }

    Ok(seasons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(date: &str, from: &str, to: &str, fee: &str) -> RawTransferEvent {
        RawTransferEvent {
            season_label: "-".to_string(),
            date_text: date.to_string(),
            from_club_name: from.to_string(),
            to_club_name: to.to_string(),
            fee_text: fee.to_string(),
        }
    }

    fn clubs(seasons: &SeasonClubs, label: &str) -> Vec<String> {
        seasons
            .iter()
            .find(|(season, _)| season.as_str() == label)
            .map(|(_, clubs)| clubs.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let events = vec![
            event("06/01/2019", "Club Youth", "Club A", "€0"),
            event("07/15/2020", "Club A", "Club B", "Loan fee: €2m"),
            event("06/01/2021", "Club B", "Club A", "End of loan"),
        ];

        let seasons = reduce_transfers(&events).unwrap();

        assert_eq!(seasons.len(), 2);
        assert_eq!(clubs(&seasons, "18/19"), vec!["Club A"]);
        assert_eq!(clubs(&seasons, "20/21"), vec!["Club A", "Club B"]);
    }

    #[test]
    fn test_reduction_is_idempotent() {
        let events = vec![
            event("08/10/2018", "Old FC", "New FC", "€5m"),
            event("01/15/2020", "New FC", "Borrowed FC", "Loan"),
        ];

        let first = reduce_transfers(&events).unwrap();
        let second = reduce_transfers(&events).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_youth_only_ledger_is_rejected() {
        let events = vec![
            event("06/01/2015", "Academy", "Club U19", "-"),
            event("06/01/2016", "Club U19", "Club B", "-"),
            event("06/01/2017", "Club B", "Reserves", "-"),
        ];

        assert_eq!(
            reduce_transfers(&events),
            Err(Rejection::NoProfessionalTransfers)
        );
    }

    #[test]
    fn test_empty_ledger_is_rejected() {
        assert_eq!(
            reduce_transfers(&[]),
            Err(Rejection::NoProfessionalTransfers)
        );
    }

    #[test]
    fn test_loan_keeps_both_clubs_in_one_season() {
        let events = vec![event("08/31/2021", "Parent FC", "Loan FC", "Loan fee: €1m")];

        let seasons = reduce_transfers(&events).unwrap();
        assert_eq!(clubs(&seasons, "21/22"), vec!["Loan FC", "Parent FC"]);
    }

    #[test]
    fn test_loan_from_youth_club_adds_destination_only() {
        let events = vec![event("08/31/2021", "Parent FC U19", "Loan FC", "Loan")];

        let seasons = reduce_transfers(&events).unwrap();
        assert_eq!(clubs(&seasons, "21/22"), vec!["Loan FC"]);
    }

    #[test]
    fn test_end_of_loan_alone_contributes_nothing() {
        let events = vec![event("06/30/2022", "Loan FC", "Parent FC", "End of loan")];

        assert_eq!(
            reduce_transfers(&events),
            Err(Rejection::NoProfessionalTransfers)
        );
    }

    #[test]
    fn test_unparseable_dates_are_dropped() {
        let events = vec![
            event("-", "Somewhere", "Undatable FC", "€1m"),
            event("07/01/2019", "Old FC", "Dated FC", "€2m"),
        ];

        let seasons = reduce_transfers(&events).unwrap();
        assert_eq!(seasons.len(), 1);
        assert_eq!(clubs(&seasons, "19/20"), vec!["Dated FC"]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = vec![
            event("07/01/2018", "A", "B", "€1m"),
            event("07/01/2019", "B", "C", "€1m"),
        ];
        let reversed: Vec<_> = forward.iter().rev().cloned().collect();

        assert_eq!(
            reduce_transfers(&forward).unwrap(),
            reduce_transfers(&reversed).unwrap()
        );
    }

    #[test]
    fn test_multiple_affiliations_in_one_season() {
        // Permanent move in August, loaned out in January: three clubs touch
        // the same season.
        let events = vec![
            event("08/01/2020", "Seller FC", "Buyer FC", "€10m"),
            event("01/31/2021", "Buyer FC", "Rental FC", "Loan fee: €500k"),
        ];

        let seasons = reduce_transfers(&events).unwrap();
        assert_eq!(
            clubs(&seasons, "20/21"),
            vec!["Buyer FC", "Rental FC", "Seller FC"]
        );
    }
}

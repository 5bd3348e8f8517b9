//! Season labels derived from calendar dates

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-year abbreviated label for a football season, e.g. `21/22`.
///
/// The season boundary is fixed at the first of July: a date in July or later
/// belongs to the season starting that year, an earlier date to the season
/// that started the previous year. Both components are the two-digit year
/// modulo 100, zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonLabel(String);

/// First month of a new season (July).
const SEASON_BOUNDARY_MONTH: u32 = 7;

impl SeasonLabel {
    pub fn from_date(date: NaiveDate) -> Self {
        let start_year = if date.month() >= SEASON_BOUNDARY_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self(format!(
            "{:02}/{:02}",
            start_year.rem_euclid(100),
            (start_year + 1).rem_euclid(100)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeasonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_after_boundary_maps_to_starting_season() {
        assert_eq!(SeasonLabel::from_date(date(2021, 8, 15)).as_str(), "21/22");
    }

    #[test]
    fn test_date_before_boundary_maps_to_previous_season() {
        assert_eq!(SeasonLabel::from_date(date(2021, 3, 1)).as_str(), "20/21");
    }

    #[test]
    fn test_boundary_month_starts_new_season() {
        assert_eq!(SeasonLabel::from_date(date(2020, 7, 1)).as_str(), "20/21");
        assert_eq!(SeasonLabel::from_date(date(2020, 6, 30)).as_str(), "19/20");
    }

    #[test]
    fn test_century_wrap_is_zero_padded() {
        assert_eq!(SeasonLabel::from_date(date(1999, 8, 1)).as_str(), "99/00");
        assert_eq!(SeasonLabel::from_date(date(2000, 3, 1)).as_str(), "99/00");
        assert_eq!(SeasonLabel::from_date(date(2005, 10, 2)).as_str(), "05/06");
    }
}

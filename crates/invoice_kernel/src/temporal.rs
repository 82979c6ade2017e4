//! Reporting period types
//!
//! Tax filings cover an inclusive date range, usually a calendar quarter.
//! Documents carry plain dates; no time-of-day or timezone handling is
//! needed at the calculation layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod { start: String, end: String },

    #[error("Invalid quarter: {0} (expected 1..=4)")]
    InvalidQuarter(u32),
}

/// An inclusive date range, e.g. one quarter of a filing year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Builds the range for a calendar quarter (1..=4) of the given year
    pub fn quarter(year: i32, quarter: u32) -> Result<Self, TemporalError> {
        if !(1..=4).contains(&quarter) {
            return Err(TemporalError::InvalidQuarter(quarter));
        }

        let start_month = (quarter - 1) * 3 + 1;
        let end_month = start_month + 2;

        let start = NaiveDate::from_ymd_opt(year, start_month, 1)
            .ok_or(TemporalError::InvalidQuarter(quarter))?;
        let end = last_day_of_month(year, end_month)
            .ok_or(TemporalError::InvalidQuarter(quarter))?;

        Self::new(start, end)
    }

    /// Returns true if the date falls inside this range, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    first_of_next.pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_creation() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 3, 31)).unwrap();
        assert!(range.contains(date(2025, 2, 15)));
        assert!(range.contains(date(2025, 1, 1)));
        assert!(range.contains(date(2025, 3, 31)));
        assert!(!range.contains(date(2025, 4, 1)));
    }

    #[test]
    fn test_range_rejects_reversed_bounds() {
        let result = DateRange::new(date(2025, 3, 31), date(2025, 1, 1));
        assert!(matches!(result, Err(TemporalError::InvalidPeriod { .. })));
    }

    #[test]
    fn test_quarter_bounds() {
        let q1 = DateRange::quarter(2025, 1).unwrap();
        assert_eq!(q1.start, date(2025, 1, 1));
        assert_eq!(q1.end, date(2025, 3, 31));

        let q4 = DateRange::quarter(2025, 4).unwrap();
        assert_eq!(q4.start, date(2025, 10, 1));
        assert_eq!(q4.end, date(2025, 12, 31));
    }

    #[test]
    fn test_invalid_quarter() {
        assert_eq!(
            DateRange::quarter(2025, 5),
            Err(TemporalError::InvalidQuarter(5))
        );
    }

    #[test]
    fn test_days_is_inclusive() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(range.days(), 31);
    }
}

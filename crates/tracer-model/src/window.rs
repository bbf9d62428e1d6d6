//! Relative date windows used by the date-range gain estimator.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A named time window relative to a reference date.
///
/// The cutoff of a window is the oldest date still inside it; input rows
/// strictly before the cutoff are candidates for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    OneMonth,
    OneQuarter,
    SixMonths,
    OneYear,
    MonthToDate,
    YearToDate,
}

impl DateWindow {
    pub const ALL: [DateWindow; 6] = [
        DateWindow::OneMonth,
        DateWindow::OneQuarter,
        DateWindow::SixMonths,
        DateWindow::OneYear,
        DateWindow::MonthToDate,
        DateWindow::YearToDate,
    ];

    /// The label the report shows for this window.
    pub fn label(self) -> &'static str {
        match self {
            DateWindow::OneMonth => "one_month_period",
            DateWindow::OneQuarter => "one_quarter_period",
            DateWindow::SixMonths => "six_months_period",
            DateWindow::OneYear => "one_year_period",
            DateWindow::MonthToDate => "mtd",
            DateWindow::YearToDate => "ytd",
        }
    }

    /// Cutoff date of this window relative to `reference`.
    pub fn cutoff(self, reference: NaiveDate) -> NaiveDate {
        match self {
            DateWindow::OneMonth => reference - Duration::days(31),
            DateWindow::OneQuarter => reference - Duration::days(92),
            DateWindow::SixMonths => reference - Duration::days(183),
            DateWindow::OneYear => reference - Duration::days(365),
            DateWindow::MonthToDate => {
                NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)
                    .unwrap_or(reference)
            }
            DateWindow::YearToDate => {
                NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference)
            }
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 4, 1).unwrap()
    }

    #[test]
    fn day_based_cutoffs() {
        assert_eq!(
            DateWindow::OneMonth.cutoff(reference()),
            NaiveDate::from_ymd_opt(2019, 3, 1).unwrap()
        );
        assert_eq!(
            DateWindow::OneYear.cutoff(reference()),
            NaiveDate::from_ymd_opt(2018, 4, 1).unwrap()
        );
        assert_eq!(
            DateWindow::OneQuarter.cutoff(reference()),
            reference() - Duration::days(92)
        );
        assert_eq!(
            DateWindow::SixMonths.cutoff(reference()),
            reference() - Duration::days(183)
        );
    }

    #[test]
    fn calendar_cutoffs() {
        assert_eq!(
            DateWindow::MonthToDate.cutoff(reference()),
            NaiveDate::from_ymd_opt(2019, 4, 1).unwrap()
        );
        assert_eq!(
            DateWindow::YearToDate.cutoff(reference()),
            NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
        );
    }

    #[test]
    fn one_year_is_the_widest_window() {
        let reference = reference();
        for window in DateWindow::ALL {
            assert!(DateWindow::OneYear.cutoff(reference) <= window.cutoff(reference));
        }
    }
}

//! Resolves symbolic period selectors into concrete date ranges.
//!
//! Two resolution modes exist because the transaction list and the report
//! screen disagree on the current month and year: the list leaves the upper
//! bound open (future-dated entries stay visible), reports close it at the
//! end of the period. Budgets resolve their own period up to `today`.

use std::{fmt, str::FromStr};

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::BudgetPeriod;
use crate::errors::FinanceError;

/// Symbolic period token chosen by the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum PeriodSelector {
    #[default]
    ThisMonth,
    LastMonth,
    ThisQuarter,
    ThisYear,
    All,
}

impl PeriodSelector {
    pub fn as_str(self) -> &'static str {
        match self {
            PeriodSelector::ThisMonth => "thisMonth",
            PeriodSelector::LastMonth => "lastMonth",
            PeriodSelector::ThisQuarter => "thisQuarter",
            PeriodSelector::ThisYear => "thisYear",
            PeriodSelector::All => "all",
        }
    }

    /// Parses a selector, treating anything unrecognized as [`PeriodSelector::All`].
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or(PeriodSelector::All)
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodSelector {
    type Err = FinanceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "thismonth" => Ok(PeriodSelector::ThisMonth),
            "lastmonth" => Ok(PeriodSelector::LastMonth),
            "thisquarter" => Ok(PeriodSelector::ThisQuarter),
            "thisyear" => Ok(PeriodSelector::ThisYear),
            "all" => Ok(PeriodSelector::All),
            _ => Err(FinanceError::InvalidInput(format!(
                "unknown period `{}`",
                value.trim()
            ))),
        }
    }
}

/// Inclusive date range; a missing bound is open.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{start} to {end}"),
            (Some(start), None) => write!(f, "since {start}"),
            (None, Some(end)) => write!(f, "until {end}"),
            (None, None) => f.write_str("all time"),
        }
    }
}

/// Range used by the transaction list filter.
pub fn resolve_for_dashboard(selector: PeriodSelector, today: NaiveDate) -> DateRange {
    match selector {
        PeriodSelector::ThisMonth => DateRange::starting(month_start(today)),
        PeriodSelector::LastMonth => last_month(today),
        PeriodSelector::ThisQuarter => this_quarter(today),
        PeriodSelector::ThisYear => DateRange::starting(year_start(today)),
        PeriodSelector::All => DateRange::unbounded(),
    }
}

/// Range used by report generation; every bound is explicit.
pub fn resolve_for_report(selector: PeriodSelector, today: NaiveDate) -> DateRange {
    match selector {
        PeriodSelector::ThisMonth => DateRange::between(month_start(today), month_end(today)),
        PeriodSelector::LastMonth => last_month(today),
        PeriodSelector::ThisQuarter => this_quarter(today),
        PeriodSelector::ThisYear => DateRange::between(year_start(today), year_end(today)),
        PeriodSelector::All => DateRange {
            start: NaiveDate::from_ymd_opt(2000, 1, 1),
            end: NaiveDate::from_ymd_opt(2100, 12, 31),
        },
    }
}

/// Range a budget is measured over: the start of its period up to `today`.
pub fn resolve_for_budget(period: BudgetPeriod, today: NaiveDate) -> DateRange {
    match period {
        BudgetPeriod::Monthly => DateRange::between(month_start(today), today),
        BudgetPeriod::Yearly => DateRange::between(year_start(today), today),
    }
}

/// The full calendar month containing `date`.
pub fn month_range(date: NaiveDate) -> DateRange {
    DateRange::between(month_start(date), month_end(date))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Months::new(1) - Duration::days(1)
}

/// First day of the month `months` before the month containing `date`.
pub fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    month_start(date) - Months::new(months)
}

fn year_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.ordinal0()))
}

fn year_end(date: NaiveDate) -> NaiveDate {
    year_start(date) + Months::new(12) - Duration::days(1)
}

fn last_month(today: NaiveDate) -> DateRange {
    let start = months_back(today, 1);
    DateRange::between(start, month_end(start))
}

fn this_quarter(today: NaiveDate) -> DateRange {
    let quarter_index = today.month0() / 3;
    let start = year_start(today) + Months::new(quarter_index * 3);
    let end = start + Months::new(3) - Duration::days(1);
    DateRange::between(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dashboard_this_month_is_open_ended() {
        let range = resolve_for_dashboard(PeriodSelector::ThisMonth, date(2024, 1, 15));
        assert_eq!(range, DateRange::starting(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 3, 1)));
        assert!(!range.contains(date(2023, 12, 31)));
    }

    #[test]
    fn report_this_month_closes_at_month_end() {
        let range = resolve_for_report(PeriodSelector::ThisMonth, date(2024, 2, 10));
        assert_eq!(range, DateRange::between(date(2024, 2, 1), date(2024, 2, 29)));
    }

    #[test]
    fn last_month_wraps_across_years() {
        let range = resolve_for_dashboard(PeriodSelector::LastMonth, date(2024, 1, 15));
        assert_eq!(range, DateRange::between(date(2023, 12, 1), date(2023, 12, 31)));
        assert_eq!(range, resolve_for_report(PeriodSelector::LastMonth, date(2024, 1, 15)));
    }

    #[test]
    fn quarter_covers_three_calendar_months() {
        let range = resolve_for_report(PeriodSelector::ThisQuarter, date(2024, 8, 20));
        assert_eq!(range, DateRange::between(date(2024, 7, 1), date(2024, 9, 30)));
        let q4 = resolve_for_report(PeriodSelector::ThisQuarter, date(2024, 12, 31));
        assert_eq!(q4, DateRange::between(date(2024, 10, 1), date(2024, 12, 31)));
    }

    #[test]
    fn this_year_differs_between_modes() {
        let today = date(2024, 5, 5);
        assert_eq!(
            resolve_for_dashboard(PeriodSelector::ThisYear, today),
            DateRange::starting(date(2024, 1, 1))
        );
        assert_eq!(
            resolve_for_report(PeriodSelector::ThisYear, today),
            DateRange::between(date(2024, 1, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn all_uses_sentinels_for_reports_only() {
        let today = date(2024, 5, 5);
        assert!(resolve_for_dashboard(PeriodSelector::All, today).is_unbounded());
        assert_eq!(
            resolve_for_report(PeriodSelector::All, today),
            DateRange::between(date(2000, 1, 1), date(2100, 12, 31))
        );
    }

    #[test]
    fn budget_ranges_end_today() {
        let today = date(2024, 6, 18);
        assert_eq!(
            resolve_for_budget(BudgetPeriod::Monthly, today),
            DateRange::between(date(2024, 6, 1), today)
        );
        assert_eq!(
            resolve_for_budget(BudgetPeriod::Yearly, today),
            DateRange::between(date(2024, 1, 1), today)
        );
    }

    #[test]
    fn selector_parsing_is_strict_or_lossy() {
        assert_eq!("thisQuarter".parse::<PeriodSelector>().unwrap(), PeriodSelector::ThisQuarter);
        assert_eq!("last-month".parse::<PeriodSelector>().unwrap(), PeriodSelector::LastMonth);
        assert!("fortnight".parse::<PeriodSelector>().is_err());
        assert_eq!(PeriodSelector::parse_lossy("fortnight"), PeriodSelector::All);
    }
}

//! Fiscal years and fiscal months for the payroll screens.
//!
//! A fiscal year runs from April 1st of `start_year` through March 31st of
//! `end_year`. Payroll pickers list the most recent fiscal years first and,
//! for a chosen year, its twelve months from April through March. The
//! selected month is sent to the salary endpoints as calendar month/year.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::models::{SalaryPeriod, SelectOption};
use crate::utils::{fiscal_year_label, short_month_label};
use crate::zone::DayZone;

/// Calendar month (1-based) in which a fiscal year starts
pub const FISCAL_YEAR_START_MONTH: u32 = 4;

/// Number of fiscal years offered when the caller does not say
pub const DEFAULT_FINANCIAL_YEAR_COUNT: usize = 3;

/// Months in a fiscal year
pub const MONTHS_PER_FISCAL_YEAR: usize = 12;

// ============================================================================
// Fiscal Year
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FiscalYear {
    pub label: String,
    pub start_year: i32,
    pub end_year: i32,
}

impl FiscalYear {
    pub fn starting(start_year: i32) -> Self {
        let end_year = start_year + 1;
        Self {
            label: fiscal_year_label(start_year, end_year),
            start_year,
            end_year,
        }
    }

    /// The fiscal year `date` falls in
    pub fn containing(date: NaiveDate) -> Self {
        if date.month() >= FISCAL_YEAR_START_MONTH {
            Self::starting(date.year())
        } else {
            Self::starting(date.year() - 1)
        }
    }

    /// Selection value: "2024-2025"
    pub fn value(&self) -> String {
        format!("{}-{}", self.start_year, self.end_year)
    }

    /// The twelve months April..December of `start_year`, then
    /// January..March of `end_year`
    pub fn months(&self) -> Vec<FiscalMonth> {
        let head = (FISCAL_YEAR_START_MONTH..=12).map(|m| FiscalMonth::new(m, self.start_year));
        let tail = (1..FISCAL_YEAR_START_MONTH).map(|m| FiscalMonth::new(m, self.end_year));
        head.chain(tail).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::containing(date).start_year == self.start_year
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl FromStr for FiscalYear {
    type Err = CalendarError;

    /// Parses the selection value "START-END", e.g. "2024-2025"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidFiscalYear(CalendarError::echo(s));

        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start_year = parse_year(start).ok_or_else(invalid)?;
        let end_year = parse_year(end).ok_or_else(invalid)?;

        if end_year != start_year + 1 {
            return Err(invalid());
        }
        Ok(Self::starting(start_year))
    }
}

impl From<&FiscalYear> for SelectOption {
    fn from(fy: &FiscalYear) -> Self {
        SelectOption::new(fy.label.clone(), fy.value())
    }
}

// ============================================================================
// Fiscal Month
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FiscalMonth {
    pub label: String,
    /// Calendar month, 1..=12
    pub month: u32,
    /// Calendar year the month falls in
    pub year: i32,
}

impl FiscalMonth {
    fn new(month: u32, year: i32) -> Self {
        Self {
            label: short_month_label(year, month),
            month,
            year,
        }
    }

    /// Selection value: "4-2024"
    pub fn value(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }

    pub fn fiscal_year(&self) -> FiscalYear {
        if self.month >= FISCAL_YEAR_START_MONTH {
            FiscalYear::starting(self.year)
        } else {
            FiscalYear::starting(self.year - 1)
        }
    }

    /// First calendar day of the month, None outside chrono's range
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Salary request body for this month
    pub fn salary_period(&self) -> SalaryPeriod {
        SalaryPeriod::new(self.month, self.year)
    }
}

impl fmt::Display for FiscalMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

impl FromStr for FiscalMonth {
    type Err = CalendarError;

    /// Parses the selection value "MONTH-YEAR", e.g. "4-2024"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidFiscalMonth(CalendarError::echo(s));

        let (month, year) = s.trim().split_once('-').ok_or_else(invalid)?;
        if month.is_empty() || month.len() > 2 || !month.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let year = parse_year(year).ok_or_else(invalid)?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self::new(month, year))
    }
}

impl From<&FiscalMonth> for SelectOption {
    fn from(month: &FiscalMonth) -> Self {
        SelectOption::new(month.label.clone(), month.value())
    }
}

// ============================================================================
// Enumerators
// ============================================================================

/// The last `count` fiscal years relative to `today`, most recent first.
/// A `count` of zero yields an empty list.
pub fn financial_years(today: NaiveDate, count: usize) -> Vec<FiscalYear> {
    let current = FiscalYear::containing(today).start_year;
    (0..count)
        .map_while(|i| i32::try_from(i).ok().and_then(|i| current.checked_sub(i)))
        .map(FiscalYear::starting)
        .collect()
}

/// `financial_years` for today's date in `zone`
pub fn financial_years_now(count: usize, zone: &DayZone) -> Vec<FiscalYear> {
    financial_years(zone.today(), count)
}

/// The twelve months of the fiscal year encoded as "START-END"
pub fn months_for_fy(fy: &str) -> Result<Vec<FiscalMonth>, CalendarError> {
    let fiscal_year: FiscalYear = fy.parse()?;
    Ok(fiscal_year.months())
}

/// Only plain ASCII digits; no sign, whitespace or '+' that `i32::from_str` would accept
fn parse_year(s: &str) -> Option<i32> {
    if s.is_empty() || s.len() > 6 || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

// ============================================================================
// Tests
// ============================================================================

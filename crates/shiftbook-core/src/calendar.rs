//! Month calendar grid and attendance month pickers.
//!
//! The attendance calendar always renders six Sunday-first weeks. Days from
//! the neighbouring months pad the grid so it stays rectangular whatever
//! weekday the month starts on and however long it is.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CalendarError;
use crate::models::SelectOption;
use crate::utils::long_month_label;
use crate::zone::DayZone;

/// Six weeks of seven days
pub const GRID_DAYS: usize = 42;

pub const DAYS_PER_WEEK: usize = 7;

/// Column headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Months offered by the attendance month picker
pub const DEFAULT_MONTH_OPTION_COUNT: usize = 12;

// ============================================================================
// Grid
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub date: NaiveDate,
    pub is_current_month: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarGrid {
    /// Grid for the month containing `date`; the day of month is ignored
    pub fn for_date(date: NaiveDate) -> Result<Self, CalendarError> {
        Self::for_month(date.year(), date.month())
    }

    /// Grid for calendar `month` (1..=12) of `year`.
    ///
    /// Fails for an out-of-range month, and for the first and last months
    /// chrono can represent, whose padding days do not exist.
    pub fn for_month(year: i32, month: u32) -> Result<Self, CalendarError> {
        let first = first_of_month(year, month)?;
        let out_of_range =
            || CalendarError::InvalidMonth(format!("{}-{:02} is outside the supported range", year, month));

        // Sunday = 0 .. Saturday = 6
        let lead = first.weekday().num_days_from_sunday();
        let start = first
            .checked_sub_days(Days::new(u64::from(lead)))
            .ok_or_else(out_of_range)?;

        let days: Vec<CalendarDay> = start
            .iter_days()
            .take(GRID_DAYS)
            .map(|date| CalendarDay {
                date,
                is_current_month: date.year() == year && date.month() == month,
            })
            .collect();

        if days.len() != GRID_DAYS {
            return Err(out_of_range());
        }

        debug!(year, month, lead, "Built calendar grid");
        Ok(Self { year, month, days })
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Six rows of seven days, Sunday first
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// The days that belong to the displayed month, in order
    pub fn current_month_days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|d| d.is_current_month)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    /// "February 2024"
    pub fn title(&self) -> String {
        self.days
            .iter()
            .find(|d| d.is_current_month)
            .map(|d| long_month_label(d.date))
            .unwrap_or_default()
    }
}

/// The 42 dates of the calendar grid for the month containing `date`
pub fn days_in_month(date: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
    CalendarGrid::for_date(date).map(|grid| grid.dates())
}

/// Number of days in calendar `month` of `year` (28..=31)
pub fn month_length(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month)?;
    let last = last_of_month(first).ok_or_else(|| {
        CalendarError::InvalidMonth(format!("{}-{:02} is outside the supported range", year, month))
    })?;
    Ok(last.day())
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(format!("month {} is not in 1..=12", month)));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::InvalidMonth(format!("year {} is outside the supported range", year)))
}

fn last_of_month(first: NaiveDate) -> Option<NaiveDate> {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
}

// ============================================================================
// Month options
// ============================================================================

/// One entry of the attendance month picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct MonthOption {
    pub label: String,
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub start: NaiveDate,
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub end: NaiveDate,
}

impl MonthOption {
    /// The whole calendar month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = last_of_month(start).unwrap_or(start);
        Self {
            label: long_month_label(start),
            start,
            end,
        }
    }

    /// Start of the first day through the last second of the last day, in `zone`
    pub fn epoch_range(&self, zone: &DayZone) -> (i64, i64) {
        (zone.start_of_day(self.start), zone.end_of_day(self.end))
    }

    pub fn grid(&self) -> Result<CalendarGrid, CalendarError> {
        CalendarGrid::for_date(self.start)
    }
}

/// The current month and the `count - 1` months before it, newest first
pub fn month_options(today: NaiveDate, count: usize) -> Vec<MonthOption> {
    (0..count)
        .map_while(|i| {
            u32::try_from(i)
                .ok()
                .and_then(|i| today.checked_sub_months(Months::new(i)))
        })
        .map(MonthOption::containing)
        .collect()
}

/// Picker entries for `options`; the value is the option's index
pub fn month_select_options(options: &[MonthOption]) -> Vec<SelectOption> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| SelectOption::new(option.label.clone(), i.to_string()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_lead() {
        // September 2024 starts on a Sunday
        let grid = CalendarGrid::for_month(2024, 9).unwrap();
        assert_eq!(grid.days[0].date, ymd(2024, 9, 1));
        assert!(grid.days[0].is_current_month);
        assert_eq!(grid.days[29].date, ymd(2024, 9, 30));
        assert_eq!(grid.days[30].date, ymd(2024, 10, 1));
        assert_eq!(grid.days[41].date, ymd(2024, 10, 12));
    }

    #[test]
    fn test_month_starting_on_saturday_uses_all_six_weeks() {
        // March 2025 starts on a Saturday and has 31 days: 6 + 31 + 5
        let grid = CalendarGrid::for_month(2025, 3).unwrap();
        assert_eq!(grid.days[0].date, ymd(2025, 2, 23));
        assert_eq!(grid.days[6].date, ymd(2025, 3, 1));
        assert_eq!(grid.current_month_days().count(), 31);
        assert_eq!(grid.days[41].date, ymd(2025, 4, 5));
    }

    #[test]
    fn test_february_non_leap_starting_sunday() {
        // February 2015: 28 days starting on Sunday, 14 trailing days
        let grid = CalendarGrid::for_month(2015, 2).unwrap();
        assert_eq!(grid.days[0].date, ymd(2015, 2, 1));
        assert_eq!(grid.current_month_days().count(), 28);
        assert_eq!(grid.days[41].date, ymd(2015, 3, 14));
    }

    #[test]
    fn test_current_month_run_is_contiguous() {
        for month in 1..=12 {
            let grid = CalendarGrid::for_month(2023, month).unwrap();
            let flags: Vec<bool> = grid.days.iter().map(|d| d.is_current_month).collect();
            let first = flags.iter().position(|&f| f).unwrap();
            let last = flags.iter().rposition(|&f| f).unwrap();
            assert!(flags[first..=last].iter().all(|&f| f));
            assert_eq!(last - first + 1, month_length(2023, month).unwrap() as usize);
        }
    }

    #[test]
    fn test_weeks_are_sunday_first() {
        let grid = CalendarGrid::for_month(2026, 10).unwrap();
        let weeks: Vec<&[CalendarDay]> = grid.weeks().collect();
        assert_eq!(weeks.len(), 6);
        for week in weeks {
            assert_eq!(week.len(), DAYS_PER_WEEK);
            assert_eq!(week[0].date.weekday(), Weekday::Sun);
            assert_eq!(week[6].date.weekday(), Weekday::Sat);
        }
    }

    #[test]
    fn test_day_of_month_is_ignored() {
        let a = days_in_month(ymd(2024, 7, 1)).unwrap();
        let b = days_in_month(ymd(2024, 7, 31)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_month_fails_fast() {
        assert!(matches!(CalendarGrid::for_month(2024, 0), Err(CalendarError::InvalidMonth(_))));
        assert!(matches!(CalendarGrid::for_month(2024, 13), Err(CalendarError::InvalidMonth(_))));
        assert!(CalendarGrid::for_date(NaiveDate::MAX).is_err());
    }

    #[test]
    fn test_month_length() {
        assert_eq!(month_length(2024, 2).unwrap(), 29);
        assert_eq!(month_length(2023, 2).unwrap(), 28);
        assert_eq!(month_length(1900, 2).unwrap(), 28);
        assert_eq!(month_length(2000, 2).unwrap(), 29);
        assert_eq!(month_length(2024, 4).unwrap(), 30);
        assert_eq!(month_length(2024, 12).unwrap(), 31);
    }

    #[test]
    fn test_title() {
        assert_eq!(CalendarGrid::for_month(2024, 2).unwrap().title(), "February 2024");
    }

    #[test]
    fn test_month_options_cross_year() {
        let options = month_options(ymd(2026, 2, 14), 4);
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["February 2026", "January 2026", "December 2025", "November 2025"]);
        assert_eq!(options[0].start, ymd(2026, 2, 1));
        assert_eq!(options[0].end, ymd(2026, 2, 28));
        assert_eq!(options[2].end, ymd(2025, 12, 31));
    }

    #[test]
    fn test_month_options_from_month_end() {
        // Subtracting months from the 31st clamps instead of skipping a month
        let options = month_options(ymd(2024, 3, 31), 2);
        assert_eq!(options[1].start, ymd(2024, 2, 1));
        assert_eq!(options[1].end, ymd(2024, 2, 29));
    }

    #[test]
    fn test_month_select_options_use_index() {
        let options = month_options(ymd(2024, 6, 15), DEFAULT_MONTH_OPTION_COUNT);
        let select = month_select_options(&options);
        assert_eq!(select.len(), DEFAULT_MONTH_OPTION_COUNT);
        assert_eq!(select[0], SelectOption::new("June 2024", "0"));
        assert_eq!(select[11], SelectOption::new("July 2023", "11"));
    }

    #[test]
    fn test_epoch_range_in_zone() {
        let option = MonthOption::containing(ymd(2024, 6, 15));
        let zone: DayZone = "+05:30".parse().unwrap();
        let (start, end) = option.epoch_range(&zone);
        assert_eq!(zone.date_of(start), Some(ymd(2024, 6, 1)));
        assert_eq!(zone.date_of(end), Some(ymd(2024, 6, 30)));
        assert_eq!(zone.date_of(end + 1), Some(ymd(2024, 7, 1)));
    }
}

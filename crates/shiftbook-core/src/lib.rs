//! shiftbook-core - payroll periods and attendance calendars.
//!
//! This crate provides the date logic behind a workforce-operations admin
//! panel, shared by the CLI and any front end:
//!
//! - `fiscal`: April-March fiscal years and their months for payroll pickers
//! - `calendar`: the six-week attendance calendar grid and month pickers
//! - `attendance`: per-day attendance counts and colour tiers
//! - `zone`: the fixed UTC offset timestamps are bucketed in
//! - `models`: attendance records and request bodies for the backend
//! - `config`: persisted settings

pub mod attendance;
pub mod calendar;
pub mod config;
pub mod error;
pub mod fiscal;
pub mod models;
pub mod utils;
pub mod zone;

pub use attendance::{
    build_attendance_map, color_tier, AttendanceCountMap, ColorTier, ColorTierPolicy, Dated,
    ShadedDay,
};
pub use calendar::{
    days_in_month, month_length, month_options, month_select_options, CalendarDay, CalendarGrid,
    MonthOption, GRID_DAYS, WEEKDAY_HEADERS,
};
pub use config::Config;
pub use error::CalendarError;
pub use fiscal::{
    financial_years, financial_years_now, months_for_fy, FiscalMonth, FiscalYear,
    DEFAULT_FINANCIAL_YEAR_COUNT,
};
pub use models::{Attendance, AttendanceQuery, ListPayload, SalaryPeriod, SelectOption};
pub use zone::DayZone;

use chrono::{Month, NaiveDate};

/// Fiscal year label: "FY 2024-25"
pub fn fiscal_year_label(start_year: i32, end_year: i32) -> String {
    format!("FY {}-{:02}", start_year, end_year.rem_euclid(100))
}

/// Short month label used in payroll month pickers: "Apr-2024"
pub fn short_month_label(year: i32, month: u32) -> String {
    let abbreviation: String = month_name(month).chars().take(3).collect();
    format!("{}-{}", abbreviation, year)
}

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

/// Long month label used in attendance month pickers: "October 2026"
pub fn long_month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// "1 record", "2 records", ...
pub fn pluralize_records(count: u32) -> String {
    if count == 1 {
        "1 record".to_string()
    } else {
        format!("{} records", count)
    }
}

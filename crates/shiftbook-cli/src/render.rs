//! Plain-text rendering for terminal output.

use std::fmt::Write;

use chrono::Datelike;
use shiftbook_core::{
    AttendanceCountMap, CalendarGrid, ColorTier, ColorTierPolicy, FiscalMonth, FiscalYear,
    MonthOption, DayZone, WEEKDAY_HEADERS,
};

/// Width of one calendar cell, separator included
const CELL_WIDTH: usize = 5;

/// Density glyph drawn after each day of the displayed month
pub fn tier_glyph(tier: ColorTier) -> char {
    match tier {
        ColorTier::Empty => '·',
        ColorTier::Low => '░',
        ColorTier::Medium => '▒',
        ColorTier::High => '▓',
        ColorTier::VeryHigh => '█',
    }
}

pub fn render_years(years: &[FiscalYear]) -> String {
    let mut out = String::new();
    for fy in years {
        let _ = writeln!(out, "{:<12} {}", fy.label, fy.value());
    }
    out
}

pub fn render_months(months: &[FiscalMonth]) -> String {
    let mut out = String::new();
    for month in months {
        let _ = writeln!(out, "{:<10} {}", month.label, month.value());
    }
    out
}

pub fn render_month_options(options: &[MonthOption], zone: &DayZone) -> String {
    let mut out = String::new();
    for (i, option) in options.iter().enumerate() {
        let (start, end) = option.epoch_range(zone);
        let _ = writeln!(
            out,
            "{:>2}  {:<16} {} .. {}  [{} .. {}]",
            i, option.label, option.start, option.end, start, end
        );
    }
    out
}

/// Six-week grid with a density glyph per day, followed by the legend
pub fn render_calendar(
    grid: &CalendarGrid,
    map: &AttendanceCountMap,
    policy: &ColorTierPolicy,
) -> String {
    let mut out = String::new();
    let width = CELL_WIDTH * WEEKDAY_HEADERS.len();

    let _ = writeln!(out, "{:^width$}", grid.title(), width = width);
    for header in WEEKDAY_HEADERS {
        let _ = write!(out, "{:>4} ", header);
    }
    out.push('\n');

    let shaded = map.shade(grid, policy);
    for week in shaded.chunks(WEEKDAY_HEADERS.len()) {
        let mut line = String::new();
        for cell in week {
            let day = cell.day.date.day();
            match cell.tier {
                Some(tier) => {
                    let _ = write!(line, "{:>3}{} ", day, tier_glyph(tier));
                }
                None => {
                    let _ = write!(line, "{:>3}  ", day);
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push('\n');
    for tier in ColorTier::ALL {
        if let Some(text) = policy.legend(tier) {
            let _ = writeln!(out, "  {} {}", tier_glyph(tier), text);
        }
    }
    out
}

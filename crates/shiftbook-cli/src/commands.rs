//! Command-line parsing and command handlers.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use shiftbook_core::{
    build_attendance_map, financial_years_now, month_options, months_for_fy, Attendance,
    CalendarGrid, Config, ListPayload, SalaryPeriod,
};

use crate::render;

pub const USAGE: &str = "\
Usage: shiftbook [--json] <command> [args]

Commands:
  years [COUNT]                     Recent fiscal years, newest first
  months <START-END>                The twelve months of a fiscal year
  periods <START-END> [--manager ID] Salary request bodies for a fiscal year
  month-options [COUNT]             Recent months with their epoch ranges
  calendar <YYYY-MM> [FILE]         Attendance calendar, FILE is a JSON list of records

Options:
  --json     Print JSON instead of text
  -h, --help Show this help
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Years { count: Option<usize> },
    Months { fiscal_year: String },
    Periods { fiscal_year: String, manager_id: Option<i64> },
    MonthOptions { count: Option<usize> },
    Calendar { year: i32, month: u32, records: Option<PathBuf> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub json: bool,
}

/// Parse arguments (without the program name)
pub fn parse_args(args: &[String]) -> Result<Invocation> {
    let mut json = false;
    let mut manager_id = None;
    let mut positional: Vec<&str> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "-h" | "--help" => {
                return Ok(Invocation {
                    command: Command::Help,
                    json,
                })
            }
            "--manager" => {
                let value = iter.next().context("--manager needs an ID")?;
                manager_id = Some(
                    value
                        .parse::<i64>()
                        .with_context(|| format!("Invalid manager ID: {}", value))?,
                );
            }
            other if other.starts_with("--") => bail!("Unknown option: {}", other),
            other => positional.push(other),
        }
    }

    let command = match positional.as_slice() {
        [] => Command::Help,
        ["years"] => Command::Years { count: None },
        ["years", count] => Command::Years {
            count: Some(parse_count(count)?),
        },
        ["months", fy] => Command::Months {
            fiscal_year: fy.to_string(),
        },
        ["periods", fy] => Command::Periods {
            fiscal_year: fy.to_string(),
            manager_id,
        },
        ["month-options"] => Command::MonthOptions { count: None },
        ["month-options", count] => Command::MonthOptions {
            count: Some(parse_count(count)?),
        },
        ["calendar", month] => {
            let (year, month) = parse_year_month(month)?;
            Command::Calendar {
                year,
                month,
                records: None,
            }
        }
        ["calendar", month, file] => {
            let (year, month) = parse_year_month(month)?;
            Command::Calendar {
                year,
                month,
                records: Some(PathBuf::from(file)),
            }
        }
        [name, ..] => bail!("Unknown command or wrong arguments: {}\n\n{}", name, USAGE),
    };

    if manager_id.is_some() && !matches!(command, Command::Periods { .. }) {
        bail!("--manager only applies to `periods`");
    }

    Ok(Invocation { command, json })
}

fn parse_count(s: &str) -> Result<usize> {
    s.parse()
        .with_context(|| format!("Invalid count: {}", s))
}

/// "2024-02" -> (2024, 2)
fn parse_year_month(s: &str) -> Result<(i32, u32)> {
    let (year, month) = s
        .split_once('-')
        .with_context(|| format!("Expected YYYY-MM, got: {}", s))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in: {}", s))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in: {}", s))?;
    Ok((year, month))
}

/// Execute a command and return what should be printed to stdout
pub fn run(invocation: &Invocation, config: &Config) -> Result<String> {
    let zone = config.day_zone()?;
    let json = invocation.json;

    match &invocation.command {
        Command::Help => Ok(USAGE.to_string()),

        Command::Years { count } => {
            let years = financial_years_now(count.unwrap_or(config.financial_year_count), &zone);
            output(json, &years, || render::render_years(&years))
        }

        Command::Months { fiscal_year } => {
            let months = months_for_fy(fiscal_year)?;
            output(json, &months, || render::render_months(&months))
        }

        Command::Periods {
            fiscal_year,
            manager_id,
        } => {
            let months = months_for_fy(fiscal_year)?;
            let periods: Vec<SalaryPeriod> = months
                .iter()
                .map(|m| {
                    let period = m.salary_period();
                    match manager_id {
                        Some(id) => period.for_manager(*id),
                        None => period,
                    }
                })
                .collect();
            output(json, &periods, || {
                months
                    .iter()
                    .zip(&periods)
                    .map(|(m, p)| {
                        format!(
                            "{:<10} {}\n",
                            m.label,
                            serde_json::to_string(p).unwrap_or_default()
                        )
                    })
                    .collect()
            })
        }

        Command::MonthOptions { count } => {
            let options = month_options(zone.today(), count.unwrap_or(config.month_option_count));
            output(json, &options, || render::render_month_options(&options, &zone))
        }

        Command::Calendar {
            year,
            month,
            records,
        } => {
            let policy = config.tier_policy()?;
            let grid = CalendarGrid::for_month(*year, *month)?;
            let records = match records {
                Some(path) => load_records(path)?,
                None => Vec::new(),
            };
            let map = build_attendance_map(&records, &zone);
            info!(
                month = %grid.title(),
                records = records.len(),
                days = map.len(),
                "Rendering attendance calendar"
            );

            if json {
                let shaded = map.shade(&grid, &policy);
                return Ok(serde_json::to_string_pretty(&shaded)?);
            }

            let mut text = render::render_calendar(&grid, &map, &policy);
            let in_month: u32 = grid
                .current_month_days()
                .map(|d| map.count_on(d.date))
                .sum();
            text.push_str(&format!(
                "\n{} of {} records fall in {} (days taken at {})\n",
                in_month,
                records.len(),
                grid.title(),
                zone
            ));
            Ok(text)
        }
    }
}

fn output<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(text())
    }
}

/// Read attendance records saved from the backend: a bare array or the
/// `{ "data": [...] }` envelope
fn load_records(path: &Path) -> Result<Vec<Attendance>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read attendance file: {}", path.display()))?;
    let payload: ListPayload<Attendance> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse attendance file: {}", path.display()))?;
    let records = payload.into_items();
    debug!(path = %path.display(), count = records.len(), "Loaded attendance records");
    Ok(records)
}

//! Per-day attendance counts and the colour tiers they map to.
//!
//! The calendar view shades each day of the displayed month by how many
//! attendance records fall on it. Records carry epoch-seconds timestamps;
//! the day they belong to is always taken in an explicit `DayZone`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::{CalendarDay, CalendarGrid};
use crate::error::CalendarError;
use crate::utils::pluralize_records;
use crate::zone::DayZone;

/// Anything that carries an epoch-seconds date
pub trait Dated {
    fn epoch_seconds(&self) -> i64;
}

impl Dated for i64 {
    fn epoch_seconds(&self) -> i64 {
        *self
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn epoch_seconds(&self) -> i64 {
        (**self).epoch_seconds()
    }
}

// ============================================================================
// Count map
// ============================================================================

/// Attendance records per calendar day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceCountMap {
    counts: BTreeMap<NaiveDate, u32>,
    /// Records whose timestamp has no calendar date (outside chrono's range)
    #[serde(default, skip_serializing_if = "is_zero")]
    skipped: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl AttendanceCountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one record on `date`
    pub fn record(&mut self, date: NaiveDate) {
        *self.counts.entry(date).or_insert(0) += 1;
    }

    /// Records on `date`, zero when none
    pub fn count_on(&self, date: NaiveDate) -> u32 {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    /// Sum of all per-day counts
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of distinct days with at least one record
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Days in ascending order with their counts
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, u32)> + '_ {
        self.counts.iter().map(|(&date, &count)| (date, count))
    }

    /// Pair every cell of `grid` with its count and tier. Days outside the
    /// displayed month get no tier.
    pub fn shade(&self, grid: &CalendarGrid, policy: &ColorTierPolicy) -> Vec<ShadedDay> {
        grid.days()
            .iter()
            .map(|&day| {
                let count = self.count_on(day.date);
                ShadedDay {
                    day,
                    count,
                    tier: day.is_current_month.then(|| policy.tier(count)),
                }
            })
            .collect()
    }
}

impl FromIterator<NaiveDate> for AttendanceCountMap {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        let mut map = Self::new();
        for date in iter {
            map.record(date);
        }
        map
    }
}

/// Count `records` per calendar day in `zone`.
///
/// Every record lands on exactly one day, so the map total equals the
/// number of records, less any whose timestamp chrono cannot represent;
/// those are reported by `skipped()`.
pub fn build_attendance_map<T: Dated>(records: &[T], zone: &DayZone) -> AttendanceCountMap {
    let mut map = AttendanceCountMap::new();
    for record in records {
        let seconds = record.epoch_seconds();
        match zone.date_of(seconds) {
            Some(date) => map.record(date),
            None => {
                warn!(epoch_seconds = seconds, "Attendance timestamp out of range, skipping");
                map.skipped += 1;
            }
        }
    }
    debug!(
        records = records.len(),
        days = map.len(),
        skipped = map.skipped,
        zone = %zone,
        "Built attendance map"
    );
    map
}

// ============================================================================
// Colour tiers
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub enum ColorTier {
    Empty,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ColorTier {
    pub const ALL: [ColorTier; 5] = [
        ColorTier::Empty,
        ColorTier::Low,
        ColorTier::Medium,
        ColorTier::High,
        ColorTier::VeryHigh,
    ];
}

impl fmt::Display for ColorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTier::Empty => write!(f, "empty"),
            ColorTier::Low => write!(f, "low"),
            ColorTier::Medium => write!(f, "medium"),
            ColorTier::High => write!(f, "high"),
            ColorTier::VeryHigh => write!(f, "veryHigh"),
        }
    }
}

/// Upper bounds (inclusive) of the Low, Medium and High tiers.
/// Zero is always Empty; anything above `high_max` is VeryHigh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ColorTierPolicy {
    pub low_max: u32,
    pub medium_max: u32,
    pub high_max: u32,
}

impl Default for ColorTierPolicy {
    fn default() -> Self {
        Self {
            low_max: 1,
            medium_max: 2,
            high_max: 5,
        }
    }
}

impl ColorTierPolicy {
    pub fn new(low_max: u32, medium_max: u32, high_max: u32) -> Result<Self, CalendarError> {
        let policy = Self {
            low_max,
            medium_max,
            high_max,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Thresholds must be non-decreasing and Low must include 1.
    /// Equal thresholds collapse the tier in between.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.low_max == 0 {
            return Err(CalendarError::InvalidTierPolicy(
                "low_max must be at least 1".to_string(),
            ));
        }
        if self.low_max > self.medium_max || self.medium_max > self.high_max {
            return Err(CalendarError::InvalidTierPolicy(format!(
                "thresholds must not decrease (low {} / medium {} / high {})",
                self.low_max, self.medium_max, self.high_max
            )));
        }
        Ok(())
    }

    pub fn tier(&self, count: u32) -> ColorTier {
        match count {
            0 => ColorTier::Empty,
            c if c <= self.low_max => ColorTier::Low,
            c if c <= self.medium_max => ColorTier::Medium,
            c if c <= self.high_max => ColorTier::High,
            _ => ColorTier::VeryHigh,
        }
    }

    /// Inclusive count range a tier covers; None when the tier is collapsed.
    /// VeryHigh is open-ended and reports `u32::MAX` as its upper bound.
    pub fn range(&self, tier: ColorTier) -> Option<(u32, u32)> {
        let (lo, hi) = match tier {
            ColorTier::Empty => (0, 0),
            ColorTier::Low => (1, self.low_max),
            ColorTier::Medium => (self.low_max.saturating_add(1), self.medium_max),
            ColorTier::High => (self.medium_max.saturating_add(1), self.high_max),
            ColorTier::VeryHigh => (self.high_max.saturating_add(1), u32::MAX),
        };
        (lo <= hi).then_some((lo, hi))
    }

    /// Legend text: "0 records", "1 record", "3-5 records", "6+ records"
    pub fn legend(&self, tier: ColorTier) -> Option<String> {
        let (lo, hi) = self.range(tier)?;
        Some(if hi == u32::MAX {
            format!("{}+ records", lo)
        } else if lo == hi {
            pluralize_records(lo)
        } else {
            format!("{}-{} records", lo, hi)
        })
    }
}

/// Tier under the default policy
pub fn color_tier(count: u32) -> ColorTier {
    ColorTierPolicy::default().tier(count)
}

/// One calendar cell with its attendance count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ShadedDay {
    pub day: CalendarDay,
    pub count: u32,
    pub tier: Option<ColorTier>,
}

// ============================================================================
// Tests
// ============================================================================

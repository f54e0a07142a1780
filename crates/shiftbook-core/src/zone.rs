//! Fixed-offset day zone used for every date truncation in the crate.
//!
//! Attendance timestamps arrive as epoch seconds. Which calendar day a
//! timestamp belongs to depends on the zone it is viewed in, so the zone is
//! always passed explicitly instead of reading the process-local timezone.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

use crate::error::CalendarError;

/// Offset used when nothing is configured: India Standard Time, where the
/// attendance screens render their dates.
pub const DEFAULT_TIMEZONE: &str = "+05:30";

/// DEFAULT_TIMEZONE in seconds east of UTC
const DEFAULT_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayZone {
    offset: FixedOffset,
}

impl DayZone {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of an epoch-seconds timestamp in this zone.
    /// Returns None for timestamps outside chrono's representable range.
    pub fn date_of(&self, epoch_seconds: i64) -> Option<NaiveDate> {
        DateTime::from_timestamp(epoch_seconds, 0)
            .map(|dt| dt.with_timezone(&self.offset).date_naive())
    }

    /// Today's date as seen from this zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    /// Epoch seconds of 00:00:00 on `date` in this zone
    pub fn start_of_day(&self, date: NaiveDate) -> i64 {
        let local_midnight = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        local_midnight - i64::from(self.offset.local_minus_utc())
    }

    /// Epoch seconds of 23:59:59 on `date` in this zone
    pub fn end_of_day(&self, date: NaiveDate) -> i64 {
        self.start_of_day(date) + SECONDS_PER_DAY - 1
    }
}

impl Default for DayZone {
    fn default() -> Self {
        FixedOffset::east_opt(DEFAULT_OFFSET_SECONDS)
            .map(Self::new)
            .unwrap_or_else(Self::utc)
    }
}

impl fmt::Display for DayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset.local_minus_utc() == 0 {
            write!(f, "UTC")
        } else {
            write!(f, "{}", self.offset)
        }
    }
}

impl FromStr for DayZone {
    type Err = CalendarError;

    /// Accepts `Z`, `UTC`, `+HH:MM`, `-HH:MM`, `+HHMM` and `+HH`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidTimezone(CalendarError::echo(s));
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
            return Ok(Self::utc());
        }

        let (sign, rest) = match trimmed.chars().next() {
            Some('+') => (1, &trimmed[1..]),
            Some('-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };

        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        // A colon is only allowed as the HH:MM separator
        if rest.contains(':') && (rest.len() != 5 || rest.as_bytes()[2] != b':') {
            return Err(invalid());
        }

        let (hours, minutes): (i32, i32) = match digits.len() {
            1 | 2 => (digits.parse().map_err(|_| invalid())?, 0),
            4 => (
                digits[0..2].parse().map_err(|_| invalid())?,
                digits[2..4].parse().map_err(|_| invalid())?,
            ),
            _ => return Err(invalid()),
        };

        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::new)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!("+05:30".parse::<DayZone>().unwrap().offset().local_minus_utc(), 19_800);
        assert_eq!("-0800".parse::<DayZone>().unwrap().offset().local_minus_utc(), -28_800);
        assert_eq!("+2".parse::<DayZone>().unwrap().offset().local_minus_utc(), 7_200);
        assert_eq!("utc".parse::<DayZone>().unwrap(), DayZone::utc());
        assert_eq!("Z".parse::<DayZone>().unwrap(), DayZone::utc());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "05:30", "+5:30", "+25:00", "+05:75", "+05-30", "IST", "+123456"] {
            assert!(bad.parse::<DayZone>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_default_is_ist() {
        assert_eq!(DayZone::default(), DEFAULT_TIMEZONE.parse().unwrap());
    }

    #[test]
    fn test_date_of_crosses_midnight_by_zone() {
        // 2024-03-01T20:00:00Z is already March 2nd in India
        let ts = 1_709_323_200;
        assert_eq!(DayZone::utc().date_of(ts), Some(ymd(2024, 3, 1)));
        assert_eq!(DayZone::default().date_of(ts), Some(ymd(2024, 3, 2)));
    }

    #[test]
    fn test_day_bounds() {
        let zone = DayZone::default();
        let day = ymd(2024, 6, 15);
        let start = zone.start_of_day(day);
        let end = zone.end_of_day(day);

        assert_eq!(end - start, SECONDS_PER_DAY - 1);
        assert_eq!(zone.date_of(start), Some(day));
        assert_eq!(zone.date_of(end), Some(day));
        assert_eq!(zone.date_of(start - 1), Some(ymd(2024, 6, 14)));
        assert_eq!(zone.date_of(end + 1), Some(ymd(2024, 6, 16)));
    }

    #[test]
    fn test_display() {
        assert_eq!(DayZone::utc().to_string(), "UTC");
        assert_eq!(DayZone::default().to_string(), "+05:30");
    }
}

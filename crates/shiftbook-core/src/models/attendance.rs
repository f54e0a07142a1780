use serde::{Deserialize, Serialize};

use crate::attendance::Dated;
use crate::calendar::MonthOption;
use crate::zone::DayZone;

/// One worker's attendance on one machine for one shift.
/// Only `attendance_date` is required; the rest is display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Attendance {
    #[serde(default)]
    pub id: Option<i64>,
    /// Epoch seconds
    #[serde(rename = "attendanceDate")]
    pub attendance_date: i64,
    #[serde(default)]
    pub production: Option<f64>,
    #[serde(default)]
    pub frames: Option<f64>,
    #[serde(default)]
    pub dhaga: Option<f64>,
    #[serde(rename = "userId", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "userName", default)]
    pub user_name: Option<String>,
    #[serde(rename = "shiftId", default)]
    pub shift_id: Option<i64>,
    #[serde(rename = "shiftName", default)]
    pub shift_name: Option<String>,
    #[serde(rename = "machineId", default)]
    pub machine_id: Option<i64>,
    #[serde(rename = "machineName", default)]
    pub machine_name: Option<String>,
}

impl Attendance {
    pub fn at(attendance_date: i64) -> Self {
        Self {
            id: None,
            attendance_date,
            production: None,
            frames: None,
            dhaga: None,
            user_id: None,
            user_name: None,
            shift_id: None,
            shift_name: None,
            machine_id: None,
            machine_name: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Unknown")
    }
}

impl Dated for Attendance {
    fn epoch_seconds(&self) -> i64 {
        self.attendance_date
    }
}

/// Query parameters for the attendance list endpoint: one employee over
/// an inclusive epoch-seconds window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub user_id: i64,
    pub start_date: i64,
    pub end_date: i64,
}

impl AttendanceQuery {
    /// Whole-month window for `option`, day bounds taken in `zone`
    pub fn for_month(user_id: i64, option: &MonthOption, zone: &DayZone) -> Self {
        let (start_date, end_date) = option.epoch_range(zone);
        Self {
            user_id,
            start_date,
            end_date,
        }
    }

    pub fn contains(&self, epoch_seconds: i64) -> bool {
        (self.start_date..=self.end_date).contains(&epoch_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": 11,
            "attendanceDate": 1718440200,
            "production": 1250.5,
            "frames": 4,
            "userId": 3,
            "userName": "Ravi",
            "machineName": "Loom 2"
        }"#;
        let record: Attendance = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, Some(11));
        assert_eq!(record.epoch_seconds(), 1_718_440_200);
        assert_eq!(record.display_name(), "Ravi");
        assert_eq!(record.machine_name.as_deref(), Some("Loom 2"));
        assert_eq!(record.dhaga, None);
    }

    #[test]
    fn test_missing_date_is_rejected() {
        assert!(serde_json::from_str::<Attendance>(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn test_query_for_month_covers_whole_month() {
        let zone = DayZone::utc();
        let option = MonthOption::containing(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        let query = AttendanceQuery::for_month(9, &option, &zone);

        assert_eq!(query.user_id, 9);
        // 2024-02-01T00:00:00Z .. 2024-02-29T23:59:59Z
        assert_eq!(query.start_date, 1_706_745_600);
        assert_eq!(query.end_date, 1_709_251_199);
        assert!(query.contains(query.start_date));
        assert!(!query.contains(query.end_date + 1));
    }

    #[test]
    fn test_query_serializes_camel_case() {
        let query = AttendanceQuery {
            user_id: 1,
            start_date: 10,
            end_date: 20,
        };
        let value = serde_json::to_value(query).unwrap();
        assert_eq!(value, serde_json::json!({ "userId": 1, "startDate": 10, "endDate": 20 }));
    }
}

use serde::{Deserialize, Serialize};

/// Request body for the salary list, generate and regenerate endpoints.
///
/// `month` and `year` are calendar values (April 2024 is `4`/`2024`), not
/// positions within the fiscal year. Omitting both ids addresses every
/// employee of the calling manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct SalaryPeriod {
    pub month: u32,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
}

impl SalaryPeriod {
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            user_id: None,
            manager_id: None,
        }
    }

    /// Scope the period to a single employee
    pub fn for_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Scope the period to every employee of a manager
    pub fn for_manager(mut self, manager_id: i64) -> Self {
        self.manager_id = Some(manager_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_without_empty_ids() {
        let body = serde_json::to_value(SalaryPeriod::new(4, 2024).for_manager(7)).unwrap();
        assert_eq!(body, serde_json::json!({ "month": 4, "year": 2024, "managerId": 7 }));
    }

    #[test]
    fn test_user_scope() {
        let period = SalaryPeriod::new(1, 2025).for_user(42);
        assert_eq!(period.user_id, Some(42));
        assert_eq!(period.manager_id, None);
    }
}

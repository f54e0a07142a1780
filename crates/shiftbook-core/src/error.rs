use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid fiscal year '{0}': expected START-END, e.g. 2024-2025")]
    InvalidFiscalYear(String),

    #[error("Invalid fiscal month '{0}': expected MONTH-YEAR, e.g. 4-2024")]
    InvalidFiscalMonth(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid timezone offset '{0}': expected Z, UTC or +HH:MM")]
    InvalidTimezone(String),

    #[error("Invalid color tier thresholds: {0}")]
    InvalidTierPolicy(String),
}

/// Maximum length for offending input echoed back in error messages
const MAX_ECHO_LENGTH: usize = 64;

impl CalendarError {
    /// Truncate user input so a garbage argument can't flood the log
    pub(crate) fn echo(input: &str) -> String {
        if input.chars().count() <= MAX_ECHO_LENGTH {
            input.to_string()
        } else {
            let truncated: String = input.chars().take(MAX_ECHO_LENGTH).collect();
            format!("{}...", truncated)
        }
    }
}

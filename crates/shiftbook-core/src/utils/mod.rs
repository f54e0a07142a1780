//! Label formatting shared by the fiscal and calendar modules.

pub mod format;

pub use format::{fiscal_year_label, long_month_label, month_name, pluralize_records, short_month_label};

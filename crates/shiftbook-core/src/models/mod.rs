//! Data models exchanged with the workforce backend.
//!
//! - `Attendance`, `AttendanceQuery`: attendance records and the list filter
//! - `SalaryPeriod`: month/year body for the salary endpoints
//! - `SelectOption`: label/value pair for selection controls
//! - `ListPayload`: bare-array or `{ data: [...] }` list responses

pub mod attendance;
pub mod option;
pub mod payload;
pub mod salary;

pub use attendance::{Attendance, AttendanceQuery};
pub use option::SelectOption;
pub use payload::ListPayload;
pub use salary::SalaryPeriod;

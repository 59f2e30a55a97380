use super::event::AttendanceEvent;
use super::shift_type::ShiftType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// One row of the monthly report: a shift instance, or a day row with no
/// logged events (clock_in/clock_out stay null, nothing is counted).
#[derive(Debug, Clone, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub shift_code: Option<String>,
    pub shift_type: Option<ShiftType>,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub late_ms: i64,
    pub early_ms: i64,
    pub early_reason: Option<String>,
    pub logs: Vec<AttendanceEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlySummary {
    pub month: String, // YYYY-MM
    pub total_working_days: u32,
    pub total_regular_shifts: u32,
    pub total_relief_shifts: u32,
    /// Sum of per-instance ceil(late_ms / 60000), as integers.
    pub total_late_minutes: i64,
    pub total_early_leave_minutes: i64,
    pub days: Vec<DayEntry>,
}

use super::event::AttendanceEvent;
use super::shift_type::ShiftType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Derived day state echoed back after every clock action and by `status`.
#[derive(Debug, Clone, Serialize)]
pub struct DayStatus {
    pub date: NaiveDate,
    pub clocked_in: bool,
    pub clock_in: Option<DateTime<Utc>>,
    pub clock_out: Option<DateTime<Utc>>,
    pub selected_shift_code: Option<String>,
    pub shift_type: ShiftType,
    pub late_ms: i64,
    pub early_ms: i64,
    pub logs: Vec<AttendanceEvent>,
}

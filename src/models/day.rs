use super::shift_type::ShiftType;
use chrono::NaiveDate;
use serde::Serialize;

/// The user's declared shift choice for one calendar day.
/// Unique on (user_id, date); upserted by clock-in or an explicit `shift set`.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceDay {
    pub id: i64,                            // ⇔ attendance_day.id
    pub user_id: String,                    // ⇔ attendance_day.user_id
    pub date: NaiveDate,                    // ⇔ attendance_day.date (TEXT "YYYY-MM-DD")
    pub selected_shift_code: Option<String>, // ⇔ attendance_day.selected_shift_code
    pub shift_type: ShiftType,              // ⇔ attendance_day.shift_type (default 'regular')
}

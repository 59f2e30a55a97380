use super::shift_type::ShiftType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Optional coordinates attached to a clock action by the caller.
/// Capture is the caller's concern; we only store what we are given.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Geolocation {
    pub lat: f64,
    pub lng: f64,
    pub accuracy: Option<f64>, // meters
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockInEvent {
    pub id: i64,                       // ⇔ attendance_log.id
    pub user_id: String,               // ⇔ attendance_log.user_id
    pub date: NaiveDate,               // ⇔ attendance_log.date — attributed at insert time
    pub instant: DateTime<Utc>,        // ⇔ attendance_log.timestamp (TEXT RFC3339)
    pub geo: Option<Geolocation>,      // ⇔ attendance_log.lat/lng/accuracy
    pub shift_code: Option<String>,    // ⇔ attendance_log.shift_code
    pub shift_type: Option<ShiftType>, // ⇔ attendance_log.shift_type
}

#[derive(Debug, Clone, Serialize)]
pub struct ClockOutEvent {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDate,
    pub instant: DateTime<Utc>,
    pub geo: Option<Geolocation>,
    pub shift_code: Option<String>,
    pub shift_type: Option<ShiftType>,
    pub early_reason: Option<String>, // ⇔ attendance_log.early_reason, clock-out only
}

/// A raw attendance log row. The two variants carry only the fields that are
/// valid for them: an early-departure reason exists on clock-out alone.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AttendanceEvent {
    ClockIn(ClockInEvent),
    ClockOut(ClockOutEvent),
}

impl AttendanceEvent {
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            AttendanceEvent::ClockIn(e) => e.instant,
            AttendanceEvent::ClockOut(e) => e.instant,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            AttendanceEvent::ClockIn(e) => e.date,
            AttendanceEvent::ClockOut(e) => e.date,
        }
    }

    pub fn shift_type(&self) -> Option<ShiftType> {
        match self {
            AttendanceEvent::ClockIn(e) => e.shift_type,
            AttendanceEvent::ClockOut(e) => e.shift_type,
        }
    }

    pub fn shift_code(&self) -> Option<&str> {
        match self {
            AttendanceEvent::ClockIn(e) => e.shift_code.as_deref(),
            AttendanceEvent::ClockOut(e) => e.shift_code.as_deref(),
        }
    }

    /// Convert variant → DB string
    pub fn kind_db_str(&self) -> &'static str {
        match self {
            AttendanceEvent::ClockIn(_) => "in",
            AttendanceEvent::ClockOut(_) => "out",
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self, AttendanceEvent::ClockIn(_))
    }

    pub fn is_out(&self) -> bool {
        matches!(self, AttendanceEvent::ClockOut(_))
    }
}

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

/// A named wall-clock shift window from the catalog.
/// Times are local to the business timezone; a shift whose end is numerically
/// earlier than its start crosses midnight into the next calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftDefinition {
    pub code: String,       // ⇔ shifts.code (TEXT PRIMARY KEY)
    pub label: String,      // ⇔ shifts.label
    pub start: NaiveTime,   // ⇔ shifts.start_time (TEXT "HH:MM")
    pub end: NaiveTime,     // ⇔ shifts.end_time (TEXT "HH:MM")
    pub active: bool,       // ⇔ shifts.active (INT 0/1)
    pub sort_order: i32,    // ⇔ shifts.sort_order
}

impl ShiftDefinition {
    pub fn start_minutes(&self) -> u32 {
        self.start.hour() * 60 + self.start.minute()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end.hour() * 60 + self.end.minute()
    }

    pub fn crosses_midnight(&self) -> bool {
        self.start_minutes() > self.end_minutes()
    }

    pub fn start_str(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

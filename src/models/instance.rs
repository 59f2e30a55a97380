use super::event::{AttendanceEvent, ClockInEvent, ClockOutEvent};
use super::shift_type::ShiftType;

/// One worked (or partially logged) shift occurrence, derived by grouping a
/// day's raw events per shift type. Never persisted; recomputed on every read.
#[derive(Debug, Clone, Default)]
pub struct ShiftInstance {
    /// None = "unknown" group: events that carry no shift type. Surfaced for
    /// display but excluded from worked-day aggregates.
    pub shift_type: Option<ShiftType>,
    /// Representative code: clock-in's, else clock-out's.
    pub shift_code: Option<String>,
    /// Earliest clock-in of the group.
    pub clock_in: Option<ClockInEvent>,
    /// Latest clock-out of the group.
    pub clock_out: Option<ClockOutEvent>,
    /// Every event of the group, in instant order.
    pub logs: Vec<AttendanceEvent>,
}

impl ShiftInstance {
    /// A worked shift has a clock-in and a known shift type.
    pub fn is_worked(&self) -> bool {
        self.clock_in.is_some() && self.shift_type.is_some()
    }
}

//! In-memory shift catalog, fetched once per operation batch and passed down
//! explicitly. No process-wide cache: every command re-reads the definitions
//! live from the datastore.

use crate::models::shift::ShiftDefinition;
use crate::utils::time::{circular_minute_distance, minute_of_day};
use chrono::NaiveTime;

#[derive(Debug, Clone, Default)]
pub struct ShiftCatalog {
    shifts: Vec<ShiftDefinition>,
}

impl ShiftCatalog {
    /// `shifts` must already be in catalog order (sort_order, code).
    pub fn new(shifts: Vec<ShiftDefinition>) -> Self {
        Self { shifts }
    }

    pub fn get(&self, code: &str) -> Option<&ShiftDefinition> {
        self.shifts.iter().find(|s| s.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftDefinition> {
        self.shifts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Default-shift selection: the active shift whose start time is closest
    /// to `now` by wraparound minute-of-day distance. Ties resolve to catalog
    /// order.
    pub fn closest_to(&self, now: NaiveTime) -> Option<&ShiftDefinition> {
        let now_min = minute_of_day(now);
        self.shifts
            .iter()
            .filter(|s| s.active)
            .min_by_key(|s| circular_minute_distance(s.start_minutes(), now_min))
    }
}

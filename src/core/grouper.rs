//! Groups one day's raw attendance events into shift instances.

use crate::models::event::AttendanceEvent;
use crate::models::instance::ShiftInstance;
use crate::models::shift_type::ShiftType;

/// Group order is fixed: regular, relief, then the unknown bucket for events
/// carrying no shift type. The representative clock-in is the earliest of the
/// group, the clock-out the latest, regardless of input order.
pub fn group_day(events: &[AttendanceEvent]) -> Vec<ShiftInstance> {
    const BUCKETS: [Option<ShiftType>; 3] =
        [Some(ShiftType::Regular), Some(ShiftType::Relief), None];

    let mut out = Vec::new();

    for key in BUCKETS {
        let mut logs: Vec<AttendanceEvent> = events
            .iter()
            .filter(|e| e.shift_type() == key)
            .cloned()
            .collect();
        if logs.is_empty() {
            continue;
        }
        logs.sort_by_key(|e| e.instant());

        let clock_in = logs
            .iter()
            .filter_map(|e| match e {
                AttendanceEvent::ClockIn(ci) => Some(ci.clone()),
                AttendanceEvent::ClockOut(_) => None,
            })
            .min_by_key(|ci| ci.instant);

        let clock_out = logs
            .iter()
            .filter_map(|e| match e {
                AttendanceEvent::ClockOut(co) => Some(co.clone()),
                AttendanceEvent::ClockIn(_) => None,
            })
            .max_by_key(|co| co.instant);

        let shift_code = clock_in
            .as_ref()
            .and_then(|ci| ci.shift_code.clone())
            .or_else(|| clock_out.as_ref().and_then(|co| co.shift_code.clone()));

        out.push(ShiftInstance {
            shift_type: key,
            shift_code,
            clock_in,
            clock_out,
            logs,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{ClockInEvent, ClockOutEvent};
    use chrono::{DateTime, NaiveDate, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn clock_in(
        id: i64,
        instant: &str,
        code: Option<&str>,
        st: Option<ShiftType>,
    ) -> AttendanceEvent {
        AttendanceEvent::ClockIn(ClockInEvent {
            id,
            user_id: "alice".into(),
            date: date(),
            instant: at(instant),
            geo: None,
            shift_code: code.map(String::from),
            shift_type: st,
        })
    }

    fn clock_out(
        id: i64,
        instant: &str,
        code: Option<&str>,
        st: Option<ShiftType>,
    ) -> AttendanceEvent {
        AttendanceEvent::ClockOut(ClockOutEvent {
            id,
            user_id: "alice".into(),
            date: date(),
            instant: at(instant),
            geo: None,
            shift_code: code.map(String::from),
            shift_type: st,
            early_reason: None,
        })
    }

    #[test]
    fn earliest_in_latest_out_regardless_of_input_order() {
        let regular = Some(ShiftType::Regular);
        let events = vec![
            clock_out(3, "2025-06-10T07:30:00Z", None, regular),
            clock_in(2, "2025-06-10T00:20:00Z", Some("pagi"), regular),
            clock_out(4, "2025-06-10T08:05:00Z", None, regular),
            clock_in(1, "2025-06-10T00:05:00Z", Some("pagi"), regular),
        ];

        for rotation in 0..events.len() {
            let mut shuffled = events.clone();
            shuffled.rotate_left(rotation);

            let groups = group_day(&shuffled);
            assert_eq!(groups.len(), 1);
            let g = &groups[0];
            assert_eq!(g.clock_in.as_ref().unwrap().id, 1);
            assert_eq!(g.clock_out.as_ref().unwrap().id, 4);
            assert_eq!(g.shift_code.as_deref(), Some("pagi"));
        }
    }

    #[test]
    fn partitions_by_shift_type_with_unknown_last() {
        let events = vec![
            clock_in(1, "2025-06-10T00:05:00Z", Some("pagi"), Some(ShiftType::Regular)),
            clock_in(2, "2025-06-10T05:05:00Z", Some("siang"), Some(ShiftType::Relief)),
            clock_out(3, "2025-06-10T09:00:00Z", None, None),
        ];

        let groups = group_day(&events);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].shift_type, Some(ShiftType::Regular));
        assert_eq!(groups[1].shift_type, Some(ShiftType::Relief));
        assert_eq!(groups[2].shift_type, None);

        // lone clock-out: surfaced but not a worked shift
        assert!(!groups[2].is_worked());
        assert!(groups[2].clock_in.is_none());
        assert!(groups[2].clock_out.is_some());
    }

    #[test]
    fn shift_code_falls_back_to_clock_out() {
        let regular = Some(ShiftType::Regular);
        let events = vec![
            clock_in(1, "2025-06-10T00:05:00Z", None, regular),
            clock_out(2, "2025-06-10T08:00:00Z", Some("pagi"), regular),
        ];

        let groups = group_day(&events);
        assert_eq!(groups[0].shift_code.as_deref(), Some("pagi"));
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_day(&[]).is_empty());
    }
}

//! Per-instance lateness / early-departure math.

use crate::core::window;
use crate::errors::AppResult;
use crate::models::instance::ShiftInstance;
use crate::models::shift::ShiftDefinition;
use chrono::NaiveDate;
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftMetrics {
    pub late_ms: i64,
    pub early_ms: i64,
}

/// Lateness and early departure for one shift instance against its window.
///
/// A missing definition (unknown or deleted shift code) degrades both values
/// to zero instead of failing the computation; same for a missing clock-in.
/// A missing clock-out means "still on shift": early departure is zero.
pub fn shift_metrics(
    instance: &ShiftInstance,
    def: Option<&ShiftDefinition>,
    date: NaiveDate,
    tz: Tz,
) -> AppResult<ShiftMetrics> {
    let Some(def) = def else {
        return Ok(ShiftMetrics::default());
    };
    let Some(clock_in) = &instance.clock_in else {
        return Ok(ShiftMetrics::default());
    };

    let window = window::resolve(date, def, tz)?;

    let late_ms = (clock_in.instant - window.start).num_milliseconds().max(0);

    let early_ms = match &instance.clock_out {
        Some(clock_out) => (window.end - clock_out.instant).num_milliseconds().max(0),
        None => 0,
    };

    Ok(ShiftMetrics { late_ms, early_ms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anchor;
    use crate::models::event::{ClockInEvent, ClockOutEvent};
    use crate::models::shift_type::ShiftType;
    use chrono::{DateTime, NaiveTime, TimeZone, Utc};

    fn jakarta() -> Tz {
        anchor::parse_tz("Asia/Jakarta").unwrap()
    }

    fn pagi() -> ShiftDefinition {
        ShiftDefinition {
            code: "pagi".into(),
            label: "Pagi (07:00-15:00)".into(),
            start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            active: true,
            sort_order: 0,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn local(h: u32, m: u32) -> DateTime<Utc> {
        jakarta()
            .with_ymd_and_hms(2025, 6, 10, h, m, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn instance(clock_in: Option<DateTime<Utc>>, clock_out: Option<DateTime<Utc>>) -> ShiftInstance {
        ShiftInstance {
            shift_type: Some(ShiftType::Regular),
            shift_code: Some("pagi".into()),
            clock_in: clock_in.map(|instant| ClockInEvent {
                id: 1,
                user_id: "alice".into(),
                date: date(),
                instant,
                geo: None,
                shift_code: Some("pagi".into()),
                shift_type: Some(ShiftType::Regular),
            }),
            clock_out: clock_out.map(|instant| ClockOutEvent {
                id: 2,
                user_id: "alice".into(),
                date: date(),
                instant,
                geo: None,
                shift_code: Some("pagi".into()),
                shift_type: Some(ShiftType::Regular),
                early_reason: None,
            }),
            logs: Vec::new(),
        }
    }

    #[test]
    fn late_in_and_early_out() {
        let inst = instance(Some(local(7, 15)), Some(local(14, 50)));
        let m = shift_metrics(&inst, Some(&pagi()), date(), jakarta()).unwrap();
        assert_eq!(m.late_ms, 15 * 60_000);
        assert_eq!(m.early_ms, 10 * 60_000);
    }

    #[test]
    fn on_time_is_zero_not_negative() {
        let inst = instance(Some(local(6, 45)), Some(local(15, 30)));
        let m = shift_metrics(&inst, Some(&pagi()), date(), jakarta()).unwrap();
        assert_eq!(m, ShiftMetrics::default());
    }

    #[test]
    fn lateness_is_monotonic_in_clock_in_instant() {
        let mut prev = -1;
        for minute in [0, 10, 20, 45, 90] {
            let inst = instance(Some(local(7, 0) + chrono::Duration::minutes(minute)), None);
            let m = shift_metrics(&inst, Some(&pagi()), date(), jakarta()).unwrap();
            assert!(m.late_ms >= prev);
            prev = m.late_ms;
        }
    }

    #[test]
    fn missing_definition_or_clock_in_degrades_to_zero() {
        let inst = instance(Some(local(9, 0)), None);
        let m = shift_metrics(&inst, None, date(), jakarta()).unwrap();
        assert_eq!(m, ShiftMetrics::default());

        let inst = instance(None, Some(local(9, 0)));
        let m = shift_metrics(&inst, Some(&pagi()), date(), jakarta()).unwrap();
        assert_eq!(m, ShiftMetrics::default());
    }

    #[test]
    fn still_on_shift_has_no_early_departure() {
        let inst = instance(Some(local(7, 0)), None);
        let m = shift_metrics(&inst, Some(&pagi()), date(), jakarta()).unwrap();
        assert_eq!(m.early_ms, 0);
    }
}

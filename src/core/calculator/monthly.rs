//! Monthly aggregation over grouped shift instances.

use crate::core::calculator::metrics;
use crate::core::catalog::ShiftCatalog;
use crate::core::grouper;
use crate::errors::AppResult;
use crate::models::day::AttendanceDay;
use crate::models::event::AttendanceEvent;
use crate::models::report::{DayEntry, MonthlySummary};
use crate::models::shift_type::ShiftType;
use crate::utils::formatting::ceil_minutes;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::collections::BTreeMap;

fn type_rank(st: Option<ShiftType>) -> u8 {
    match st {
        Some(ShiftType::Regular) => 0,
        Some(ShiftType::Relief) => 1,
        None => 2,
    }
}

/// Build the monthly report from pre-fetched rows. `day_rows` and `events`
/// are the caller's month selection; every event is counted under its stored
/// (attributed) date.
///
/// Totals are per worked instance: a day with both a regular and a relief
/// shift contributes two working days. Late/early minute totals are the sum
/// of per-instance ceiled minutes — the rounding happens before summing.
pub fn build_monthly_summary(
    year: i32,
    month: u32,
    day_rows: &[AttendanceDay],
    events: &[AttendanceEvent],
    catalog: &ShiftCatalog,
    tz: Tz,
) -> AppResult<MonthlySummary> {
    let mut by_date: BTreeMap<NaiveDate, Vec<AttendanceEvent>> = BTreeMap::new();
    for e in events {
        by_date.entry(e.date()).or_default().push(e.clone());
    }

    let mut days: Vec<DayEntry> = Vec::new();
    let mut total_working_days = 0u32;
    let mut total_regular_shifts = 0u32;
    let mut total_relief_shifts = 0u32;
    let mut total_late_minutes = 0i64;
    let mut total_early_leave_minutes = 0i64;

    for (date, day_events) in &by_date {
        for inst in grouper::group_day(day_events) {
            let def = inst.shift_code.as_deref().and_then(|c| catalog.get(c));
            let m = metrics::shift_metrics(&inst, def, *date, tz)?;

            if inst.is_worked() {
                total_working_days += 1;
                match inst.shift_type {
                    Some(ShiftType::Regular) => total_regular_shifts += 1,
                    Some(ShiftType::Relief) => total_relief_shifts += 1,
                    None => {}
                }
                total_late_minutes += ceil_minutes(m.late_ms);
                total_early_leave_minutes += ceil_minutes(m.early_ms);
            }

            days.push(DayEntry {
                date: *date,
                shift_code: inst.shift_code.clone(),
                shift_type: inst.shift_type,
                clock_in: inst.clock_in.as_ref().map(|c| c.instant),
                clock_out: inst.clock_out.as_ref().map(|c| c.instant),
                late_ms: m.late_ms,
                early_ms: m.early_ms,
                early_reason: inst.clock_out.as_ref().and_then(|c| c.early_reason.clone()),
                logs: inst.logs,
            });
        }
    }

    // Day rows with no logged events still show up (planned shifts), with
    // null clock-in/out, and count towards nothing.
    for row in day_rows {
        if !by_date.contains_key(&row.date) {
            days.push(DayEntry {
                date: row.date,
                shift_code: row.selected_shift_code.clone(),
                shift_type: Some(row.shift_type),
                clock_in: None,
                clock_out: None,
                late_ms: 0,
                early_ms: 0,
                early_reason: None,
                logs: Vec::new(),
            });
        }
    }

    days.sort_by_key(|d| (d.date, type_rank(d.shift_type)));

    Ok(MonthlySummary {
        month: format!("{:04}-{:02}", year, month),
        total_working_days,
        total_regular_shifts,
        total_relief_shifts,
        total_late_minutes,
        total_early_leave_minutes,
        days,
    })
}

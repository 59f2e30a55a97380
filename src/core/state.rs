//! Per-day clock-in/clock-out lifecycle.
//!
//! One state per (user, attributed date, shift type):
//! `NotStarted -> ClockedIn -> ClockedOut`, with `ClockedOut` terminal for
//! that pair. Violations are soft: the action becomes a no-op and the caller
//! gets the unchanged state back with an advisory warning.

use crate::core::calculator::metrics;
use crate::core::catalog::ShiftCatalog;
use crate::core::{anchor, grouper, window};
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::event::{AttendanceEvent, ClockInEvent, ClockOutEvent, Geolocation};
use crate::models::identity::Identity;
use crate::models::instance::ShiftInstance;
use crate::models::shift_type::ShiftType;
use crate::models::status::DayStatus;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rusqlite::Connection;

pub const MAX_EARLY_REASON_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayShiftState {
    NotStarted,
    ClockedIn,
    ClockedOut,
}

impl DayShiftState {
    /// A group with no clock-in (lone clock-out) has never been started; a
    /// clock-out on top of a clock-in closes it for good.
    pub fn of(instance: Option<&ShiftInstance>) -> Self {
        match instance {
            Some(i) if i.clock_in.is_some() => {
                if i.clock_out.is_some() {
                    DayShiftState::ClockedOut
                } else {
                    DayShiftState::ClockedIn
                }
            }
            _ => DayShiftState::NotStarted,
        }
    }
}

#[derive(Debug, Default)]
pub struct ClockInRequest {
    pub shift_code: Option<String>,
    pub shift_type: Option<ShiftType>,
    /// Wall-clock override in the business timezone; defaults to now.
    pub at: Option<NaiveDateTime>,
    pub geo: Option<Geolocation>,
}

#[derive(Debug, Default)]
pub struct ClockOutRequest {
    pub shift_type: Option<ShiftType>,
    pub at: Option<NaiveDateTime>,
    pub geo: Option<Geolocation>,
    pub early_reason: Option<String>,
}

#[derive(Debug)]
pub struct ClockOutcome {
    pub applied: bool,
    pub warning: Option<String>,
    pub status: DayStatus,
}

pub struct ClockLogic;

impl ClockLogic {
    fn request_instant(at: Option<NaiveDateTime>, tz: Tz) -> DateTime<Utc> {
        match at {
            Some(naive) => anchor::to_instant(naive.date(), naive.time(), tz),
            None => Utc::now(),
        }
    }

    /// The calendar day an event at `instant` belongs to, honoring the
    /// previous day's midnight-crossing selection. This is the write-time
    /// decision; the result is persisted on the event row.
    pub fn attributed_date(
        conn: &Connection,
        user_id: &str,
        instant: DateTime<Utc>,
        tz: Tz,
        catalog: &ShiftCatalog,
    ) -> AppResult<NaiveDate> {
        let local_date = instant.with_timezone(&tz).date_naive();
        let prev_def = match local_date.pred_opt() {
            Some(prev) => queries::get_day(conn, user_id, prev)?
                .and_then(|d| d.selected_shift_code)
                .and_then(|code| catalog.get(&code).cloned()),
            None => None,
        };
        Ok(window::attribute_event_date(instant, tz, prev_def.as_ref()))
    }

    pub fn clock_in(
        conn: &Connection,
        identity: &Identity,
        tz: Tz,
        default_type: ShiftType,
        req: ClockInRequest,
    ) -> AppResult<ClockOutcome> {
        let user_id = identity.user_id.as_str();
        let instant = Self::request_instant(req.at, tz);

        let catalog = ShiftCatalog::new(queries::load_shifts(conn, false)?);
        let date = Self::attributed_date(conn, user_id, instant, tz, &catalog)?;
        let day = queries::get_day(conn, user_id, date)?;

        let shift_type = req
            .shift_type
            .or(day.as_ref().map(|d| d.shift_type))
            .unwrap_or(default_type);

        let events = queries::load_events_by_date(conn, user_id, date)?;
        let groups = grouper::group_day(&events);
        let instance = groups.iter().find(|g| g.shift_type == Some(shift_type));

        match DayShiftState::of(instance) {
            DayShiftState::NotStarted => {}
            DayShiftState::ClockedIn | DayShiftState::ClockedOut => {
                let warning = format!(
                    "already clocked in for shift type '{}' on {}: one shift per type per day",
                    shift_type, date
                );
                let status =
                    Self::load_day_status(conn, user_id, date, default_type, &catalog, tz)?;
                return Ok(ClockOutcome {
                    applied: false,
                    warning: Some(warning),
                    status,
                });
            }
        }

        let shift_code = match &req.shift_code {
            Some(code) => {
                if catalog.get(code).is_none() {
                    return Err(AppError::UnknownShiftCode(code.clone()));
                }
                Some(code.clone())
            }
            None => day
                .as_ref()
                .and_then(|d| d.selected_shift_code.clone())
                .or_else(|| {
                    catalog
                        .closest_to(instant.with_timezone(&tz).time())
                        .map(|s| s.code.clone())
                }),
        };

        queries::set_day_shift(conn, user_id, date, shift_code.as_deref(), Some(shift_type))?;
        queries::insert_event(
            conn,
            &AttendanceEvent::ClockIn(ClockInEvent {
                id: 0,
                user_id: user_id.to_string(),
                date,
                instant,
                geo: req.geo,
                shift_code,
                shift_type: Some(shift_type),
            }),
        )?;

        let status = Self::load_day_status(conn, user_id, date, default_type, &catalog, tz)?;
        Ok(ClockOutcome {
            applied: true,
            warning: None,
            status,
        })
    }

    pub fn clock_out(
        conn: &Connection,
        identity: &Identity,
        tz: Tz,
        default_type: ShiftType,
        req: ClockOutRequest,
    ) -> AppResult<ClockOutcome> {
        if let Some(reason) = &req.early_reason
            && reason.chars().count() > MAX_EARLY_REASON_CHARS
        {
            return Err(AppError::Validation(format!(
                "early-departure reason must be at most {} characters",
                MAX_EARLY_REASON_CHARS
            )));
        }

        let user_id = identity.user_id.as_str();
        let instant = Self::request_instant(req.at, tz);

        let catalog = ShiftCatalog::new(queries::load_shifts(conn, false)?);
        let date = Self::attributed_date(conn, user_id, instant, tz, &catalog)?;
        let day = queries::get_day(conn, user_id, date)?;

        let shift_type = req
            .shift_type
            .or(day.as_ref().map(|d| d.shift_type))
            .unwrap_or(default_type);

        let events = queries::load_events_by_date(conn, user_id, date)?;
        let groups = grouper::group_day(&events);
        let instance = groups.iter().find(|g| g.shift_type == Some(shift_type));

        let warning = match DayShiftState::of(instance) {
            DayShiftState::ClockedIn => None,
            DayShiftState::NotStarted => Some(format!(
                "no open clock-in for shift type '{}' on {}",
                shift_type, date
            )),
            DayShiftState::ClockedOut => Some(format!(
                "already clocked out for shift type '{}' on {}",
                shift_type, date
            )),
        };

        if let Some(warning) = warning {
            let status = Self::load_day_status(conn, user_id, date, default_type, &catalog, tz)?;
            return Ok(ClockOutcome {
                applied: false,
                warning: Some(warning),
                status,
            });
        }

        let shift_code = day
            .as_ref()
            .and_then(|d| d.selected_shift_code.clone())
            .or_else(|| instance.and_then(|i| i.shift_code.clone()));

        queries::insert_event(
            conn,
            &AttendanceEvent::ClockOut(ClockOutEvent {
                id: 0,
                user_id: user_id.to_string(),
                date,
                instant,
                geo: req.geo,
                shift_code,
                shift_type: Some(shift_type),
                early_reason: req.early_reason,
            }),
        )?;

        let status = Self::load_day_status(conn, user_id, date, default_type, &catalog, tz)?;
        Ok(ClockOutcome {
            applied: true,
            warning: None,
            status,
        })
    }

    /// Recompute the observable day state from stored rows. Also used to echo
    /// state back after both clock actions, and by `status`.
    pub fn load_day_status(
        conn: &Connection,
        user_id: &str,
        date: NaiveDate,
        default_type: ShiftType,
        catalog: &ShiftCatalog,
        tz: Tz,
    ) -> AppResult<DayStatus> {
        let day = queries::get_day(conn, user_id, date)?;
        let events = queries::load_events_by_date(conn, user_id, date)?;
        let groups = grouper::group_day(&events);

        let shift_type = day
            .as_ref()
            .map(|d| d.shift_type)
            .unwrap_or(default_type);
        let instance = groups.iter().find(|g| g.shift_type == Some(shift_type));

        let selected_shift_code = day
            .as_ref()
            .and_then(|d| d.selected_shift_code.clone())
            .or_else(|| instance.and_then(|i| i.shift_code.clone()));

        let m = match instance {
            Some(inst) => {
                let code = inst
                    .shift_code
                    .as_deref()
                    .or(selected_shift_code.as_deref());
                let def = code.and_then(|c| catalog.get(c));
                metrics::shift_metrics(inst, def, date, tz)?
            }
            None => Default::default(),
        };

        Ok(DayStatus {
            date,
            clocked_in: DayShiftState::of(instance) == DayShiftState::ClockedIn,
            clock_in: instance.and_then(|i| i.clock_in.as_ref().map(|c| c.instant)),
            clock_out: instance.and_then(|i| i.clock_out.as_ref().map(|c| c.instant)),
            selected_shift_code,
            shift_type,
            late_ms: m.late_ms,
            early_ms: m.early_ms,
            logs: events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::{init_db, seed_default_shifts};

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn setup() -> (Connection, Identity, Tz) {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        seed_default_shifts(&conn).unwrap();
        let identity = Identity {
            user_id: "alice".into(),
            is_admin: false,
        };
        let tz = anchor::parse_tz("Asia/Jakarta").unwrap();
        (conn, identity, tz)
    }

    #[test]
    fn state_of_groups() {
        assert_eq!(DayShiftState::of(None), DayShiftState::NotStarted);

        let mut inst = ShiftInstance::default();
        assert_eq!(DayShiftState::of(Some(&inst)), DayShiftState::NotStarted);

        inst.clock_in = Some(ClockInEvent {
            id: 1,
            user_id: "alice".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            instant: Utc::now(),
            geo: None,
            shift_code: None,
            shift_type: Some(ShiftType::Regular),
        });
        assert_eq!(DayShiftState::of(Some(&inst)), DayShiftState::ClockedIn);

        inst.clock_out = Some(ClockOutEvent {
            id: 2,
            user_id: "alice".into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            instant: Utc::now(),
            geo: None,
            shift_code: None,
            shift_type: Some(ShiftType::Regular),
            early_reason: None,
        });
        assert_eq!(DayShiftState::of(Some(&inst)), DayShiftState::ClockedOut);
    }

    #[test]
    fn clock_in_then_out_applies_and_reports_metrics() {
        let (conn, identity, tz) = setup();

        let outcome = ClockLogic::clock_in(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockInRequest {
                shift_code: Some("pagi".into()),
                at: Some(naive("2025-06-10 07:15")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(outcome.applied);
        assert!(outcome.status.clocked_in);
        assert_eq!(outcome.status.late_ms, 15 * 60_000);

        let outcome = ClockLogic::clock_out(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockOutRequest {
                at: Some(naive("2025-06-10 14:50")),
                early_reason: Some("doctor appointment".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(outcome.applied);
        assert!(!outcome.status.clocked_in);
        assert_eq!(outcome.status.early_ms, 10 * 60_000);
    }

    #[test]
    fn duplicate_clock_in_is_a_soft_rejection() {
        let (conn, identity, tz) = setup();

        let first = ClockLogic::clock_in(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockInRequest {
                shift_code: Some("pagi".into()),
                at: Some(naive("2025-06-10 07:00")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(first.applied);

        let second = ClockLogic::clock_in(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockInRequest {
                at: Some(naive("2025-06-10 09:00")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!second.applied);
        assert!(second.warning.is_some());
        // state unchanged: the original clock-in is still the representative
        assert_eq!(second.status.clock_in, first.status.clock_in);
        assert_eq!(second.status.logs.len(), 1);
    }

    #[test]
    fn relief_shift_can_coexist_with_regular_on_the_same_day() {
        let (conn, identity, tz) = setup();

        let regular = ClockLogic::clock_in(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockInRequest {
                shift_code: Some("pagi".into()),
                at: Some(naive("2025-06-10 07:00")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(regular.applied);

        let relief = ClockLogic::clock_in(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockInRequest {
                shift_code: Some("sore".into()),
                shift_type: Some(ShiftType::Relief),
                at: Some(naive("2025-06-10 15:00")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(relief.applied);
    }

    #[test]
    fn clock_out_without_open_clock_in_is_rejected_softly() {
        let (conn, identity, tz) = setup();

        let outcome = ClockLogic::clock_out(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockOutRequest {
                at: Some(naive("2025-06-10 15:00")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!outcome.applied);
        assert!(outcome.warning.unwrap().contains("no open clock-in"));
    }

    #[test]
    fn overnight_clock_out_lands_on_the_previous_day() {
        let (conn, identity, tz) = setup();

        let ci = ClockLogic::clock_in(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockInRequest {
                shift_code: Some("malam".into()),
                at: Some(naive("2025-06-10 23:10")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(ci.applied);
        assert_eq!(ci.status.date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(ci.status.late_ms, 10 * 60_000);

        // 06:40 the next calendar morning still belongs to the 10th
        let co = ClockLogic::clock_out(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockOutRequest {
                at: Some(naive("2025-06-11 06:40")),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(co.applied);
        assert_eq!(co.status.date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(co.status.early_ms, 20 * 60_000);
    }

    #[test]
    fn over_long_early_reason_is_a_validation_error() {
        let (conn, identity, tz) = setup();

        let err = ClockLogic::clock_out(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockOutRequest {
                early_reason: Some("x".repeat(MAX_EARLY_REASON_CHARS + 1)),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn unknown_explicit_shift_code_is_rejected() {
        let (conn, identity, tz) = setup();

        let err = ClockLogic::clock_in(
            &conn,
            &identity,
            tz,
            ShiftType::Regular,
            ClockInRequest {
                shift_code: Some("nope".into()),
                at: Some(naive("2025-06-10 07:00")),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownShiftCode(_)));
    }
}

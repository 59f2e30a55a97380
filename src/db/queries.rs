use crate::errors::AppError;
use crate::errors::AppResult;
use crate::models::day::AttendanceDay;
use crate::models::event::{AttendanceEvent, ClockInEvent, ClockOutEvent, Geolocation};
use crate::models::shift::ShiftDefinition;
use crate::models::shift_type::ShiftType;
use crate::utils::time::parse_time;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_err(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_row_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_err(AppError::InvalidDate(s.to_string())))
}

// ---------------------------------------------------------------------------
// shifts
// ---------------------------------------------------------------------------

pub fn map_shift_row(row: &Row) -> Result<ShiftDefinition> {
    let start_str: String = row.get("start_time")?;
    let end_str: String = row.get("end_time")?;

    // A malformed HH:MM in the catalog is a configuration error, caught at
    // the boundary instead of leaking into window math.
    let start =
        parse_time(&start_str).ok_or_else(|| conversion_err(AppError::InvalidTime(start_str.clone())))?;
    let end =
        parse_time(&end_str).ok_or_else(|| conversion_err(AppError::InvalidTime(end_str.clone())))?;

    Ok(ShiftDefinition {
        code: row.get("code")?,
        label: row.get("label")?,
        start,
        end,
        active: row.get::<_, i32>("active")? == 1,
        sort_order: row.get("sort_order")?,
    })
}

pub fn load_shifts(conn: &Connection, active_only: bool) -> AppResult<Vec<ShiftDefinition>> {
    let sql = if active_only {
        "SELECT * FROM shifts WHERE active = 1 ORDER BY sort_order ASC, code ASC"
    } else {
        "SELECT * FROM shifts ORDER BY sort_order ASC, code ASC"
    };

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map_shift_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_shift(conn: &Connection, code: &str) -> AppResult<Option<ShiftDefinition>> {
    let mut stmt = conn.prepare("SELECT * FROM shifts WHERE code = ?1")?;
    Ok(stmt.query_row([code], map_shift_row).optional()?)
}

pub fn insert_shift(conn: &Connection, def: &ShiftDefinition) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO shifts (code, label, start_time, end_time, active, sort_order, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            def.code,
            def.label,
            def.start_str(),
            def.end_str(),
            if def.active { 1 } else { 0 },
            def.sort_order,
            now,
        ],
    )?;
    Ok(())
}

pub fn update_shift(conn: &Connection, def: &ShiftDefinition) -> AppResult<usize> {
    let now = Utc::now().to_rfc3339();
    let changed = conn.execute(
        "UPDATE shifts
         SET label = ?2, start_time = ?3, end_time = ?4, active = ?5, sort_order = ?6, updated_at = ?7
         WHERE code = ?1",
        params![
            def.code,
            def.label,
            def.start_str(),
            def.end_str(),
            if def.active { 1 } else { 0 },
            def.sort_order,
            now,
        ],
    )?;
    Ok(changed)
}

pub fn delete_shift(conn: &Connection, code: &str) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM shifts WHERE code = ?1", [code])?)
}

// ---------------------------------------------------------------------------
// attendance_day
// ---------------------------------------------------------------------------

fn map_day_row(row: &Row) -> Result<AttendanceDay> {
    let date_str: String = row.get("date")?;
    let type_str: String = row.get("shift_type")?;

    let shift_type = ShiftType::from_db_str(&type_str)
        .ok_or_else(|| conversion_err(AppError::InvalidShiftType(type_str.clone())))?;

    Ok(AttendanceDay {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: parse_row_date(&date_str)?,
        selected_shift_code: row.get("selected_shift_code")?,
        shift_type,
    })
}

pub fn get_day(conn: &Connection, user_id: &str, date: NaiveDate) -> AppResult<Option<AttendanceDay>> {
    let mut stmt =
        conn.prepare("SELECT * FROM attendance_day WHERE user_id = ?1 AND date = ?2")?;
    Ok(stmt
        .query_row(params![user_id, date.to_string()], map_day_row)
        .optional()?)
}

pub fn load_days_in_range(
    conn: &Connection,
    user_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceDay>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_day
         WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC",
    )?;
    let rows = stmt.query_map(params![user_id, from.to_string(), to.to_string()], map_day_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Atomic upsert keyed on (user_id, date): a concurrent insert of the same
/// day degrades to an update instead of a constraint error. Passing None for
/// a field keeps whatever the row already has.
pub fn set_day_shift(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
    shift_code: Option<&str>,
    shift_type: Option<ShiftType>,
) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO attendance_day (user_id, date, selected_shift_code, shift_type, created_at, updated_at)
         VALUES (?1, ?2, ?3, COALESCE(?4, 'regular'), ?5, ?5)
         ON CONFLICT(user_id, date) DO UPDATE SET
             selected_shift_code = COALESCE(excluded.selected_shift_code, attendance_day.selected_shift_code),
             shift_type = COALESCE(?4, attendance_day.shift_type),
             updated_at = excluded.updated_at",
        params![
            user_id,
            date.to_string(),
            shift_code,
            shift_type.map(|t| t.to_db_str()),
            now,
        ],
    )?;
    Ok(())
}

pub fn delete_day(conn: &Connection, user_id: &str, date: NaiveDate) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM attendance_day WHERE user_id = ?1 AND date = ?2",
        params![user_id, date.to_string()],
    )?)
}

// ---------------------------------------------------------------------------
// attendance_log
// ---------------------------------------------------------------------------

fn map_event_row(row: &Row) -> Result<AttendanceEvent> {
    let date_str: String = row.get("date")?;
    let date = parse_row_date(&date_str)?;

    let ts_str: String = row.get("timestamp")?;
    let instant: DateTime<Utc> = DateTime::parse_from_rfc3339(&ts_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_err(AppError::InvalidTimestamp(ts_str.clone())))?;

    let lat: Option<f64> = row.get("lat")?;
    let lng: Option<f64> = row.get("lng")?;
    let accuracy: Option<f64> = row.get("accuracy")?;
    let geo = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Geolocation { lat, lng, accuracy }),
        _ => None,
    };

    let shift_code: Option<String> = row.get("shift_code")?;
    let shift_type = row
        .get::<_, Option<String>>("shift_type")?
        .as_deref()
        .and_then(ShiftType::from_db_str);

    let id: i64 = row.get("id")?;
    let user_id: String = row.get("user_id")?;
    let kind: String = row.get("kind")?;

    match kind.as_str() {
        "in" => Ok(AttendanceEvent::ClockIn(ClockInEvent {
            id,
            user_id,
            date,
            instant,
            geo,
            shift_code,
            shift_type,
        })),
        "out" => Ok(AttendanceEvent::ClockOut(ClockOutEvent {
            id,
            user_id,
            date,
            instant,
            geo,
            shift_code,
            shift_type,
            early_reason: row.get("early_reason")?,
        })),
        other => Err(conversion_err(AppError::Other(format!(
            "invalid event kind: {}",
            other
        )))),
    }
}

pub fn load_events_by_date(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_log
         WHERE user_id = ?1 AND date = ?2
         ORDER BY timestamp ASC",
    )?;
    let rows = stmt.query_map(params![user_id, date.to_string()], map_event_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_events_in_range(
    conn: &Connection,
    user_id: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<AttendanceEvent>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM attendance_log
         WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date ASC, timestamp ASC",
    )?;
    let rows = stmt.query_map(
        params![user_id, from.to_string(), to.to_string()],
        map_event_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_event(conn: &Connection, ev: &AttendanceEvent) -> AppResult<()> {
    let (user_id, date, instant, geo, shift_code, shift_type, early_reason) = match ev {
        AttendanceEvent::ClockIn(e) => (
            &e.user_id,
            e.date,
            e.instant,
            e.geo,
            e.shift_code.as_deref(),
            e.shift_type,
            None,
        ),
        AttendanceEvent::ClockOut(e) => (
            &e.user_id,
            e.date,
            e.instant,
            e.geo,
            e.shift_code.as_deref(),
            e.shift_type,
            e.early_reason.as_deref(),
        ),
    };

    conn.execute(
        "INSERT INTO attendance_log
             (user_id, date, kind, timestamp, lat, lng, accuracy, shift_code, shift_type, early_reason, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            user_id,
            date.to_string(),
            ev.kind_db_str(),
            instant.to_rfc3339(),
            geo.map(|g| g.lat),
            geo.map(|g| g.lng),
            geo.and_then(|g| g.accuracy),
            shift_code,
            shift_type.map(|t| t.to_db_str()),
            early_reason,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn delete_events_for_date(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM attendance_log WHERE user_id = ?1 AND date = ?2",
        params![user_id, date.to_string()],
    )?)
}

use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use chrono::Utc;
use rusqlite::{Connection, params};

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;
    Ok(())
}

/// Seed the stock shift catalog on an empty database. Returns the number of
/// rows inserted (0 when the catalog already has content).
pub fn seed_default_shifts(conn: &Connection) -> AppResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM shifts", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(0);
    }

    let defaults = [
        ("pagi", "Pagi (07:00-15:00)", "07:00", "15:00", 0),
        ("siang", "Siang (12:00-20:00)", "12:00", "20:00", 1),
        ("sore", "Sore (15:00-23:00)", "15:00", "23:00", 2),
        ("malam", "Malam (23:00-07:00)", "23:00", "07:00", 3),
    ];

    let now = Utc::now().to_rfc3339();
    for (code, label, start, end, sort_order) in defaults {
        conn.execute(
            "INSERT INTO shifts (code, label, start_time, end_time, active, sort_order, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6, ?6)",
            params![code, label, start, end, sort_order, now],
        )?;
    }

    Ok(defaults.len())
}

use crate::ui::messages::{success, warning};
use rusqlite::{Connection, Result};

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `shifts` catalog table.
fn create_shifts_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS shifts (
            code       TEXT PRIMARY KEY,
            label      TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time   TEXT NOT NULL,
            active     INTEGER NOT NULL DEFAULT 1,
            sort_order INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the attendance tables with the modern schema.
fn create_attendance_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_day (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id             TEXT NOT NULL,
            date                TEXT NOT NULL,
            selected_shift_code TEXT,
            shift_type          TEXT NOT NULL DEFAULT 'regular' CHECK(shift_type IN ('regular','relief')),
            created_at          TEXT NOT NULL,
            updated_at          TEXT NOT NULL,
            UNIQUE(user_id, date)
        );

        CREATE TABLE IF NOT EXISTS attendance_log (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id      TEXT NOT NULL,
            date         TEXT NOT NULL,
            kind         TEXT NOT NULL CHECK(kind IN ('in','out')),
            timestamp    TEXT NOT NULL,
            lat          REAL,
            lng          REAL,
            accuracy     REAL,
            shift_code   TEXT,
            shift_type   TEXT CHECK(shift_type IS NULL OR shift_type IN ('regular','relief')),
            early_reason TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_att_log_user_date ON attendance_log(user_id, date);
        CREATE INDEX IF NOT EXISTS idx_att_log_user_date_kind ON attendance_log(user_id, date, kind);
        "#,
    )?;
    Ok(())
}

/// Check if `attendance_log` has a given column.
fn attendance_log_has_column(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('attendance_log')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == name {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Older databases predate the shift columns on `attendance_log`; add them
/// in place when missing.
fn migrate_add_shift_columns(conn: &Connection) -> Result<()> {
    for (col, decl) in [
        ("shift_code", "ALTER TABLE attendance_log ADD COLUMN shift_code TEXT"),
        (
            "shift_type",
            "ALTER TABLE attendance_log ADD COLUMN shift_type TEXT CHECK(shift_type IS NULL OR shift_type IN ('regular','relief'))",
        ),
        (
            "early_reason",
            "ALTER TABLE attendance_log ADD COLUMN early_reason TEXT",
        ),
    ] {
        if !attendance_log_has_column(conn, col)? {
            warning(format!("Adding '{}' column to attendance_log table...", col));
            conn.execute_batch(decl)?;
            success(format!("'{}' column added.", col));
        }
    }
    Ok(())
}

/// Run every pending schema step. Each step is idempotent, so this is safe to
/// call on every startup path that touches the database.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    create_shifts_table(conn)?;
    create_attendance_tables(conn)?;
    migrate_add_shift_columns(conn)?;
    Ok(())
}

use crate::errors::AppResult;
use ansi_term::Colour;
use chrono::Utc;
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal log line into the `log` table.
pub fn oplog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock-in" => Colour::Green,
        "clock-out" => Colour::Red,
        "reset" => Colour::Red,
        "shift-set" => Colour::Yellow,
        "shift-add" | "shift-update" | "shift-del" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        other if other.starts_with("migrate") => Colour::Purple,
        _ => Colour::White,
    }
}

/// Print the internal operations log.
pub fn print_oplog(conn: &Connection) -> AppResult<()> {
    let mut stmt = conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        let id: i64 = row.get(0)?;
        let raw_date: String = row.get(1)?;
        let operation: String = row.get(2)?;
        let target: String = row.get(3)?;
        let message: String = row.get(4)?;

        let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or(raw_date);

        let op_target = if target.is_empty() {
            operation.clone()
        } else {
            format!("{operation} ({target})")
        };

        Ok((id, date, operation, op_target, message))
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }

    if entries.is_empty() {
        println!("No log entries.");
        return Ok(());
    }

    let op_w = entries
        .iter()
        .map(|(_, _, _, op_target, _)| strip_ansi(op_target).len())
        .max()
        .unwrap_or(10)
        .min(60);

    let id_w = entries
        .iter()
        .map(|(id, _, _, _, _)| id.to_string().len())
        .max()
        .unwrap_or(2);
    let date_w = entries
        .iter()
        .map(|(_, date, _, _, _)| date.len())
        .max()
        .unwrap_or(10);

    println!("📜 Internal log:\n");
    for (id, date, operation, op_target, message) in &entries {
        let color = color_for_operation(operation);
        // pad before painting so the ANSI codes don't skew the column width
        let padded = format!("{:<op_w$}", op_target, op_w = op_w);
        println!(
            "{:>id_w$}  {:<date_w$}  {}  {}",
            id,
            date,
            color.paint(padded),
            message,
            id_w = id_w,
            date_w = date_w,
        );
    }

    Ok(())
}

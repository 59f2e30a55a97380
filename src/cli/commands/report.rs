use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::anchor;
use crate::core::calculator::monthly::build_monthly_summary;
use crate::core::catalog::ShiftCatalog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::identity::Identity;
use crate::models::report::MonthlySummary;
use crate::utils::date::{all_days_of_month, parse_year_month, today_in};
use crate::utils::fmt_duration_late;
use crate::utils::table::{Column, Table};
use chrono::Datelike;
use chrono_tz::Tz;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        month,
        for_user,
        json,
    } = &cli.command
    {
        let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
        let tz = anchor::parse_tz(&cfg.timezone)?;

        // Reporting another user's month is an admin-only view.
        let target = match for_user {
            Some(u) if *u != identity.user_id => {
                identity.require_admin()?;
                u.clone()
            }
            Some(u) => u.clone(),
            None => identity.user_id.clone(),
        };

        let (year, m) = match month {
            Some(s) => parse_year_month(s)?,
            None => {
                let today = today_in(tz);
                (today.year(), today.month())
            }
        };

        let pool = DbPool::new(&cfg.database)?;
        let days = all_days_of_month(year, m);
        let (from, to) = (days[0], *days.last().unwrap());

        let day_rows = queries::load_days_in_range(&pool.conn, &target, from, to)?;
        let events = queries::load_events_in_range(&pool.conn, &target, from, to)?;
        let catalog = ShiftCatalog::new(queries::load_shifts(&pool.conn, false)?);

        let summary = build_monthly_summary(year, m, &day_rows, &events, &catalog, tz)?;

        if *json {
            let out = serde_json::to_string_pretty(&summary)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_summary(&target, &summary, tz);
        }
    }
    Ok(())
}

fn print_summary(user: &str, summary: &MonthlySummary, tz: Tz) {
    println!("\n📊 Attendance report — {} — {}\n", user, summary.month);

    if summary.days.is_empty() {
        println!("No attendance recorded.");
        return;
    }

    let mut table = Table::new(vec![
        Column {
            header: "Date".into(),
            width: 10,
        },
        Column {
            header: "Shift".into(),
            width: 8,
        },
        Column {
            header: "Type".into(),
            width: 8,
        },
        Column {
            header: "In".into(),
            width: 5,
        },
        Column {
            header: "Out".into(),
            width: 5,
        },
        Column {
            header: "Late".into(),
            width: 7,
        },
        Column {
            header: "Early".into(),
            width: 7,
        },
    ]);

    for d in &summary.days {
        let hm = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map(|t| t.with_timezone(&tz).format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string())
        };

        table.add_row(vec![
            d.date.to_string(),
            d.shift_code.clone().unwrap_or_else(|| "-".to_string()),
            d.shift_type
                .map(|t| t.to_db_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            hm(d.clock_in),
            hm(d.clock_out),
            if d.late_ms > 0 {
                fmt_duration_late(d.late_ms)
            } else {
                "-".to_string()
            },
            if d.early_ms > 0 {
                fmt_duration_late(d.early_ms)
            } else {
                "-".to_string()
            },
        ]);
    }

    print!("{}", table.render());

    println!(
        "\nWorking days: {} (regular {}, relief {})",
        summary.total_working_days, summary.total_regular_shifts, summary.total_relief_shifts
    );
    println!("Late minutes: {}", summary.total_late_minutes);
    println!("Early-leave minutes: {}", summary.total_early_leave_minutes);
}

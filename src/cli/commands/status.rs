use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::anchor;
use crate::core::catalog::ShiftCatalog;
use crate::core::state::ClockLogic;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::identity::Identity;
use crate::models::status::DayStatus;
use crate::utils::colors::{color_for_lateness, colorize_in_out, colorize_optional, RESET};
use crate::utils::date::parse_required_date;
use crate::utils::{fmt_duration_elapsed, fmt_duration_late};
use chrono::Utc;
use chrono_tz::Tz;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { date, json } = &cli.command {
        let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
        let tz = anchor::parse_tz(&cfg.timezone)?;
        let pool = DbPool::new(&cfg.database)?;

        let catalog = ShiftCatalog::new(queries::load_shifts(&pool.conn, false)?);
        let day = match date {
            Some(d) => parse_required_date(d)?,
            // default to the attributed "today": an overnight worker still
            // sees yesterday's shift in the small hours
            None => ClockLogic::attributed_date(
                &pool.conn,
                &identity.user_id,
                Utc::now(),
                tz,
                &catalog,
            )?,
        };

        let status = ClockLogic::load_day_status(
            &pool.conn,
            &identity.user_id,
            day,
            cfg.default_type(),
            &catalog,
            tz,
        )?;

        if *json {
            let out = serde_json::to_string_pretty(&status)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_day_status(&status, &catalog, tz, &identity.user_id);
        }
    }
    Ok(())
}

/// Shared day-state rendering, also used to echo state after clock actions.
pub(crate) fn print_day_status(status: &DayStatus, catalog: &ShiftCatalog, tz: Tz, user: &str) {
    println!("\n=== {} — {} ===", status.date, user);

    let shift_label = match status.selected_shift_code.as_deref() {
        Some(code) => catalog
            .get(code)
            .map(|d| d.label.clone())
            .unwrap_or_else(|| code.to_string()),
        None => "-".to_string(),
    };
    println!("Shift:    {} [{}]", shift_label, status.shift_type);

    let state = if status.clocked_in {
        "clocked in"
    } else if status.clock_out.is_some() {
        "clocked out"
    } else {
        "not started"
    };
    println!("State:    {}", state);

    let in_str = status
        .clock_in
        .map(|t| t.with_timezone(&tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let late_note = match status.clock_in {
        Some(_) if status.late_ms > 0 => format!(
            "  {}late {}{}",
            color_for_lateness(status.late_ms),
            fmt_duration_late(status.late_ms),
            RESET
        ),
        Some(_) => format!("  {}on time{}", color_for_lateness(0), RESET),
        None => String::new(),
    };
    println!("In:       {}{}", colorize_in_out(&in_str, true), late_note);

    let out_str = status
        .clock_out
        .map(|t| t.with_timezone(&tz).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    let early_note = match status.clock_out {
        Some(_) if status.early_ms > 0 => format!(
            "  {}left early {}{}",
            color_for_lateness(status.early_ms),
            fmt_duration_late(status.early_ms),
            RESET
        ),
        _ => String::new(),
    };
    println!("Out:      {}{}", colorize_in_out(&out_str, false), early_note);

    let elapsed = match status.clock_in {
        Some(ci) => {
            let end = status.clock_out.unwrap_or_else(Utc::now);
            fmt_duration_elapsed((end - ci).num_milliseconds())
        }
        None => "0m".to_string(),
    };
    println!("Elapsed:  {}", colorize_optional(&elapsed));

    if !status.logs.is_empty() {
        println!("Logs:");
        for l in &status.logs {
            println!(
                "  - {} {:<3} {} {}",
                l.instant().with_timezone(&tz).format("%H:%M"),
                l.kind_db_str(),
                l.shift_code().unwrap_or("-"),
                l.shift_type()
                    .map(|t| t.to_db_str())
                    .unwrap_or("-"),
            );
        }
    }
}

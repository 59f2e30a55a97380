use crate::cli::commands::status::print_day_status;
use crate::cli::commands::{geo_from_args, parse_at};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::anchor;
use crate::core::catalog::ShiftCatalog;
use crate::core::state::{ClockInRequest, ClockLogic};
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::identity::Identity;
use crate::models::shift_type::ShiftType;
use crate::ui::messages::{success, warning};
use crate::utils::fmt_duration_late;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::In {
        shift,
        shift_type,
        at,
        lat,
        lng,
        acc,
    } = &cli.command
    {
        let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
        let tz = anchor::parse_tz(&cfg.timezone)?;
        let pool = DbPool::new(&cfg.database)?;

        let req = ClockInRequest {
            shift_code: shift.clone(),
            shift_type: shift_type
                .as_deref()
                .map(ShiftType::parse_cli)
                .transpose()?,
            at: at.as_deref().map(parse_at).transpose()?,
            geo: geo_from_args(*lat, *lng, *acc),
        };

        let outcome = ClockLogic::clock_in(&pool.conn, &identity, tz, cfg.default_type(), req)?;

        if let Some(msg) = &outcome.warning {
            warning(msg);
        } else {
            let when = outcome
                .status
                .clock_in
                .map(|t| t.with_timezone(&tz).format("%H:%M").to_string())
                .unwrap_or_else(|| "?".to_string());

            if outcome.status.late_ms > 0 {
                success(format!(
                    "Clocked in at {} on {} (late {}).",
                    when,
                    outcome.status.date,
                    fmt_duration_late(outcome.status.late_ms)
                ));
            } else {
                success(format!(
                    "Clocked in at {} on {}.",
                    when, outcome.status.date
                ));
            }

            if let Err(e) = oplog(
                &pool.conn,
                "clock-in",
                &identity.user_id,
                &format!("clock-in at {} for {}", when, outcome.status.date),
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }
        }

        let catalog = ShiftCatalog::new(queries::load_shifts(&pool.conn, false)?);
        print_day_status(&outcome.status, &catalog, tz, &identity.user_id);
    }
    Ok(())
}

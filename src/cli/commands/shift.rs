use crate::cli::parser::{Cli, Commands, ShiftAction};
use crate::config::Config;
use crate::core::anchor;
use crate::core::catalog::ShiftCatalog;
use crate::core::state::ClockLogic;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::identity::Identity;
use crate::models::shift::ShiftDefinition;
use crate::models::shift_type::ShiftType;
use crate::ui::messages::{success, warning};
use crate::utils::date::parse_required_date;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_required_time;
use chrono::Utc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = &cli.command else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    match action {
        ShiftAction::List { all } => {
            let shifts = queries::load_shifts(&pool.conn, !all)?;
            if shifts.is_empty() {
                println!("No shifts in the catalog. Run `shiftlog init` to seed the defaults.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column {
                    header: "Code".into(),
                    width: 8,
                },
                Column {
                    header: "Label".into(),
                    width: 22,
                },
                Column {
                    header: "Start".into(),
                    width: 5,
                },
                Column {
                    header: "End".into(),
                    width: 5,
                },
                Column {
                    header: "Active".into(),
                    width: 6,
                },
            ]);
            for s in &shifts {
                table.add_row(vec![
                    s.code.clone(),
                    s.label.clone(),
                    s.start_str(),
                    s.end_str(),
                    if s.active { "yes".into() } else { "no".into() },
                ]);
            }
            print!("{}", table.render());
        }

        ShiftAction::Set {
            code,
            shift_type,
            date,
        } => {
            let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
            let tz = anchor::parse_tz(&cfg.timezone)?;

            if queries::get_shift(&pool.conn, code)?.is_none() {
                return Err(AppError::UnknownShiftCode(code.clone()));
            }

            let stype = shift_type
                .as_deref()
                .map(ShiftType::parse_cli)
                .transpose()?;
            let day = match date {
                Some(d) => parse_required_date(d)?,
                None => {
                    let catalog = ShiftCatalog::new(queries::load_shifts(&pool.conn, false)?);
                    ClockLogic::attributed_date(
                        &pool.conn,
                        &identity.user_id,
                        Utc::now(),
                        tz,
                        &catalog,
                    )?
                }
            };

            queries::set_day_shift(&pool.conn, &identity.user_id, day, Some(code), stype)?;

            if let Err(e) = oplog(
                &pool.conn,
                "shift-set",
                &identity.user_id,
                &format!("selected shift '{}' for {}", code, day),
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            success(format!("Shift '{}' selected for {}.", code, day));
        }

        ShiftAction::Add {
            code,
            label,
            start,
            end,
            sort,
            inactive,
        } => {
            let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
            identity.require_admin()?;

            let def = ShiftDefinition {
                code: code.clone(),
                label: label.clone(),
                start: parse_required_time(start)?,
                end: parse_required_time(end)?,
                active: !inactive,
                sort_order: *sort,
            };

            queries::insert_shift(&pool.conn, &def)?;

            if let Err(e) = oplog(
                &pool.conn,
                "shift-add",
                code,
                &format!("added shift '{}' ({} - {})", code, start, end),
            ) {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            if def.crosses_midnight() {
                success(format!(
                    "Added shift '{}' ({} - {}, crosses midnight).",
                    code, start, end
                ));
            } else {
                success(format!("Added shift '{}' ({} - {}).", code, start, end));
            }
        }

        ShiftAction::Update {
            code,
            label,
            start,
            end,
            sort,
            active,
        } => {
            let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
            identity.require_admin()?;

            let mut def = queries::get_shift(&pool.conn, code)?
                .ok_or_else(|| AppError::UnknownShiftCode(code.clone()))?;

            if let Some(label) = label {
                def.label = label.clone();
            }
            if let Some(start) = start {
                def.start = parse_required_time(start)?;
            }
            if let Some(end) = end {
                def.end = parse_required_time(end)?;
            }
            if let Some(sort) = sort {
                def.sort_order = *sort;
            }
            if let Some(active) = active {
                def.active = *active;
            }

            queries::update_shift(&pool.conn, &def)?;

            if let Err(e) = oplog(&pool.conn, "shift-update", code, "updated shift definition") {
                eprintln!("⚠️ Failed to write internal log: {}", e);
            }

            success(format!("Updated shift '{}'.", code));
        }

        ShiftAction::Del { code } => {
            let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
            identity.require_admin()?;

            let deleted = queries::delete_shift(&pool.conn, code)?;
            if deleted == 0 {
                warning(format!("No shift with code '{}'.", code));
            } else {
                if let Err(e) = oplog(&pool.conn, "shift-del", code, "deleted shift definition") {
                    eprintln!("⚠️ Failed to write internal log: {}", e);
                }
                success(format!("Deleted shift '{}'.", code));
            }
        }
    }

    Ok(())
}

use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::anchor;
use crate::core::catalog::ShiftCatalog;
use crate::core::reset::ResetLogic;
use crate::core::state::ClockLogic;
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::identity::Identity;
use crate::ui::messages::info;
use crate::utils::date::parse_required_date;
use chrono::Utc;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Reset { date } = &cli.command {
        let identity = Identity::resolve(cfg, cli.user.as_deref(), cli.admin)?;
        let tz = anchor::parse_tz(&cfg.timezone)?;
        let pool = DbPool::new(&cfg.database)?;

        let day = match date {
            Some(d) => parse_required_date(d)?,
            None => {
                let catalog = ShiftCatalog::new(queries::load_shifts(&pool.conn, false)?);
                ClockLogic::attributed_date(&pool.conn, &identity.user_id, Utc::now(), tz, &catalog)?
            }
        };

        let deleted = ResetLogic::apply(&pool.conn, &identity.user_id, day)?;

        if let Err(e) = oplog(
            &pool.conn,
            "reset",
            &identity.user_id,
            &format!("deleted {} events and the day record for {}", deleted, day),
        ) {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }

        info(format!(
            "Deleted {} events and the day record for {}.",
            deleted, day
        ));
    }
    Ok(())
}

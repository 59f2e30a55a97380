use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::print_oplog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let pool = DbPool::new(&cfg.database)?;
        print_oplog(&pool.conn)?;
    }
    Ok(())
}

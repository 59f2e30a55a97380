use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::anchor;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config {
            let path = Config::config_file();
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                println!("📄 {}\n", path.display());
                println!("{}", content);
            } else {
                println!("No config file at {} (using defaults).", path.display());
            }
        }

        if *check {
            // the timezone is the one config value that can break every
            // computation downstream, so validate it here
            anchor::parse_tz(&cfg.timezone)?;
            success(format!(
                "Configuration OK (timezone {}, default shift type {}).",
                cfg.timezone, cfg.default_shift_type
            ));
        }
    }
    Ok(())
}

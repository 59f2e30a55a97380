use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// The authenticated identity consumed by every command.
/// Resolution order: `--user` flag, then the config file. This tool never
/// authenticates; it trusts the identity the environment supplies.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn resolve(cfg: &Config, user_override: Option<&str>, admin_override: bool) -> AppResult<Self> {
        let user_id = user_override
            .map(|s| s.to_string())
            .unwrap_or_else(|| cfg.user.clone());

        if user_id.trim().is_empty() {
            return Err(AppError::NotAuthenticated);
        }

        Ok(Self {
            user_id,
            is_admin: admin_override || cfg.admin,
        })
    }

    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::NotAuthorized)
        }
    }
}

//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid shift type: {0}")]
    InvalidShiftType(String),

    // ---------------------------
    // Configuration errors
    // ---------------------------
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Identity / authorization
    // ---------------------------
    #[error("No user configured: set `user` in the config file or pass --user")]
    NotAuthenticated,

    #[error("Operation requires admin rights")]
    NotAuthorized,

    // ---------------------------
    // Request validation
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown shift code: {0}")]
    UnknownShiftCode(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

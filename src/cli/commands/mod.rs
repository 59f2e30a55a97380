pub mod clock_in;
pub mod clock_out;
pub mod config;
pub mod db;
pub mod init;
pub mod log;
pub mod report;
pub mod reset;
pub mod shift;
pub mod status;

use crate::errors::{AppError, AppResult};
use crate::models::event::Geolocation;
use chrono::NaiveDateTime;

/// Parse the `--at` override: business-timezone wall clock, minute precision.
pub(crate) fn parse_at(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

pub(crate) fn geo_from_args(lat: Option<f64>, lng: Option<f64>, acc: Option<f64>) -> Option<Geolocation> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(Geolocation {
            lat,
            lng,
            accuracy: acc,
        }),
        _ => None,
    }
}

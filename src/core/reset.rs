//! Administrative day reset: bulk delete of a day's logs and day record.
//! Irreversible; the events are gone, not tombstoned.

use crate::db::queries;
use crate::errors::AppResult;
use chrono::NaiveDate;
use rusqlite::Connection;

pub struct ResetLogic;

impl ResetLogic {
    /// Returns the number of deleted log rows.
    pub fn apply(conn: &Connection, user_id: &str, date: NaiveDate) -> AppResult<usize> {
        let deleted = queries::delete_events_for_date(conn, user_id, date)?;
        queries::delete_day(conn, user_id, date)?;
        Ok(deleted)
    }
}

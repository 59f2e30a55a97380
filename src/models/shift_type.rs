use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Secondary shift classification: a user may work at most one shift
/// per type per attributed calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Regular,
    Relief,
}

impl ShiftType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftType::Regular => "regular",
            ShiftType::Relief => "relief",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "regular" => Some(ShiftType::Regular),
            "relief" => Some(ShiftType::Relief),
            _ => None,
        }
    }

    /// Parse CLI input (case-insensitive).
    pub fn parse_cli(s: &str) -> AppResult<Self> {
        Self::from_db_str(&s.to_lowercase()).ok_or_else(|| AppError::InvalidShiftType(s.to_string()))
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_db_str())
    }
}

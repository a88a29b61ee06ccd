//! The fixed set of program statuses.
//!
//! Stored as text in `programs.status`; the database carries a matching
//! CHECK constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProgramStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

impl ProgramStatus {
    pub const ALL: [ProgramStatus; 3] = [
        ProgramStatus::Active,
        ProgramStatus::Inactive,
        ProgramStatus::Pending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProgramStatus::Active => "Active",
            ProgramStatus::Inactive => "Inactive",
            ProgramStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for ProgramStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgramStatus {
    type Err = CoreError;

    /// Exact, case-sensitive match against the allowed values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid status value '{s}'. Valid values are: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Resolve an optional status, defaulting to `Active`.
pub fn status_or_default(raw: Option<&str>) -> Result<ProgramStatus, CoreError> {
    raw.map_or(Ok(ProgramStatus::default()), |s| s.parse())
}

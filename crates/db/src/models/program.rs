//! Program entity model and DTOs.

use chrono::Utc;
use healthtrack_core::dates::{parse_date, parse_optional_date};
use healthtrack_core::error::CoreError;
use healthtrack_core::nullable;
use healthtrack_core::program_lifecycle::ProgramState;
use healthtrack_core::program_status::{status_or_default, ProgramStatus};
use healthtrack_core::types::{Date, DbId, Timestamp};
use healthtrack_core::validation::{require_fields, validate_input};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A program row from the `programs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Program {
    pub id: DbId,
    pub name: String,
    #[serde(serialize_with = "healthtrack_core::dates::empty_if_none::serialize")]
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub status: String,
    pub is_deleted: bool,
    #[serde(serialize_with = "healthtrack_core::dates::opt_timestamp::serialize")]
    pub deleted_at: Option<Timestamp>,
}

impl Program {
    pub fn state(&self) -> ProgramState {
        ProgramState::from_columns(self.is_deleted, self.deleted_at, Utc::now())
    }
}

/// Search result projection: `{ id, name, description }`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramSummary {
    pub id: DbId,
    pub name: String,
    #[serde(serialize_with = "healthtrack_core::dates::empty_if_none::serialize")]
    pub description: Option<String>,
}

/// Picker projection: `{ id, name }`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramOption {
    pub id: DbId,
    pub name: String,
}

/// Filters for the paginated program list.
#[derive(Debug, Clone, Default)]
pub struct ProgramFilter {
    /// Case-insensitive substring of the name.
    pub q: Option<String>,
    /// Exact status match.
    pub status: Option<String>,
    pub is_deleted: Option<bool>,
}

/// Request body for creating a program.
///
/// `is_deleted` / `deleted_at` are not part of the schema; if a caller sends
/// them they are ignored and the program starts live.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProgram {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// Validated insert values for a new program.
#[derive(Debug, Clone)]
pub struct NewProgram {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub status: ProgramStatus,
}

impl CreateProgram {
    pub fn into_new(self) -> Result<NewProgram, CoreError> {
        require_fields(&[
            ("name", self.name.is_some()),
            ("start_date", self.start_date.is_some()),
            ("end_date", self.end_date.is_some()),
        ])?;
        validate_input(&self)?;

        let start_date = parse_date("start_date", self.start_date.as_deref().unwrap_or_default())?;
        let end_date = parse_date("end_date", self.end_date.as_deref().unwrap_or_default())?;
        let status = status_or_default(self.status.as_deref())?;

        Ok(NewProgram {
            name: self.name.unwrap_or_default(),
            description: self.description,
            start_date,
            end_date,
            status,
        })
    }
}

/// Request body for updating a program.
///
/// Unknown fields are rejected, which covers `is_deleted` and `deleted_at`:
/// only the delete operation may change a program's lifecycle state. An
/// explicit `"description": null` clears the description.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProgram {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub description: Option<Option<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// Validated column changes for a program update.
#[derive(Debug, Clone, Default)]
pub struct ProgramChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<ProgramStatus>,
}

impl UpdateProgram {
    pub fn into_changes(self) -> Result<ProgramChanges, CoreError> {
        validate_input(&self)?;
        Ok(ProgramChanges {
            start_date: parse_optional_date("start_date", self.start_date.as_deref())?,
            end_date: parse_optional_date("end_date", self.end_date.as_deref())?,
            status: self.status.as_deref().map(str::parse::<ProgramStatus>).transpose()?,
            name: self.name,
            description: self.description,
        })
    }
}

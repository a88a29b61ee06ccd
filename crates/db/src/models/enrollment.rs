//! Enrollment entity model and DTOs.

use healthtrack_core::dates::parse_optional_date;
use healthtrack_core::enrollment::{client_ref, program_ref};
use healthtrack_core::error::CoreError;
use healthtrack_core::nullable;
use healthtrack_core::types::{ClientId, Date, DbId, LooseId, LooseText};
use healthtrack_core::validation::missing_fields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An enrollment row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub client_id: ClientId,
    pub program_id: DbId,
    pub enrollment_date: Option<Date>,
}

/// Request body for creating an enrollment.
///
/// A `client_id` of any scalar type is accepted; one that is not a UUID
/// resolves to "client not found".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateEnrollment {
    pub client_id: Option<LooseText>,
    pub program_id: Option<LooseId>,
    /// `YYYY-MM-DD`; the current date is stored when omitted.
    pub enrollment_date: Option<String>,
}

/// Parsed references for a new enrollment. Existence is checked separately.
#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub client_id: ClientId,
    pub program_id: DbId,
    pub enrollment_date: Option<Date>,
}

impl CreateEnrollment {
    pub fn into_new(self) -> Result<NewEnrollment, CoreError> {
        match (self.client_id.as_ref(), self.program_id.as_ref()) {
            (Some(client), Some(program)) => Ok(NewEnrollment {
                client_id: client_ref(&client.0)?,
                program_id: program_ref(program)?,
                enrollment_date: parse_optional_date(
                    "enrollment_date",
                    self.enrollment_date.as_deref(),
                )?,
            }),
            (client, program) => Err(missing_fields(&[
                ("client_id", client.is_some()),
                ("program_id", program.is_some()),
            ])),
        }
    }
}

/// Request body for updating an enrollment. Each supplied reference is
/// re-resolved before the write; `"enrollment_date": null` clears the date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEnrollment {
    pub client_id: Option<LooseText>,
    pub program_id: Option<LooseId>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub enrollment_date: Option<Option<String>>,
}

/// Parsed replacements for an enrollment update.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentChanges {
    pub client_id: Option<ClientId>,
    pub program_id: Option<DbId>,
    pub enrollment_date: Option<Option<Date>>,
}

impl UpdateEnrollment {
    pub fn into_changes(self) -> Result<EnrollmentChanges, CoreError> {
        let enrollment_date = self
            .enrollment_date
            .map(|raw| parse_optional_date("enrollment_date", raw.as_deref()))
            .transpose()?;
        Ok(EnrollmentChanges {
            enrollment_date,
            client_id: self.client_id.map(|c| client_ref(&c.0)).transpose()?,
            program_id: self.program_id.as_ref().map(program_ref).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn create_accepts_string_program_id() {
        let client = Uuid::new_v4();
        let input: CreateEnrollment = serde_json::from_value(serde_json::json!({
            "client_id": client.to_string(),
            "program_id": "3",
        }))
        .unwrap();
        let new = input.into_new().unwrap();
        assert_eq!(new.client_id, client);
        assert_eq!(new.program_id, 3);
        assert_eq!(new.enrollment_date, None);
    }

    #[test]
    fn create_requires_both_references() {
        assert_matches!(
            CreateEnrollment::default().into_new(),
            Err(CoreError::Validation(msg)) if msg == "Missing required fields: client_id, program_id"
        );
    }

    #[test]
    fn create_with_unknown_client_format_is_not_found() {
        let input = CreateEnrollment {
            client_id: Some(LooseText("42".into())),
            program_id: Some(LooseId::Valid(1)),
            enrollment_date: None,
        };
        assert_matches!(input.into_new(), Err(CoreError::NotFound { entity: "Client", .. }));
    }

    #[test]
    fn create_rejects_malformed_date() {
        let input = CreateEnrollment {
            client_id: Some(LooseText(Uuid::new_v4().to_string())),
            program_id: Some(LooseId::Valid(1)),
            enrollment_date: Some("May 1st".into()),
        };
        assert_matches!(input.into_new(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn update_parses_only_supplied_fields() {
        let input = UpdateEnrollment {
            program_id: Some(LooseId::Valid(8)),
            ..Default::default()
        };
        let changes = input.into_changes().unwrap();
        assert_eq!(changes.program_id, Some(8));
        assert_eq!(changes.client_id, None);
        assert_eq!(changes.enrollment_date, None);
    }

    #[test]
    fn numeric_client_id_is_not_found() {
        let input: CreateEnrollment =
            serde_json::from_str(r#"{"client_id": 5, "program_id": 1}"#).unwrap();
        assert_matches!(input.into_new(), Err(CoreError::NotFound { entity: "Client", .. }));

        let update: UpdateEnrollment = serde_json::from_str(r#"{"client_id": 5}"#).unwrap();
        assert_matches!(update.into_changes(), Err(CoreError::NotFound { entity: "Client", .. }));
    }

    #[test]
    fn update_null_date_clears_it() {
        let input: UpdateEnrollment =
            serde_json::from_str(r#"{"enrollment_date": null}"#).unwrap();
        assert_eq!(input.into_changes().unwrap().enrollment_date, Some(None));
    }
}

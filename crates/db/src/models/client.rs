//! Client entity model and DTOs.

use healthtrack_core::dates::parse_optional_date;
use healthtrack_core::error::CoreError;
use healthtrack_core::nullable;
use healthtrack_core::types::{ClientId, Date};
use healthtrack_core::validation::{require_fields, validate_input};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A client row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub full_name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Request body for creating a client.
///
/// Every field is optional at the serde level so that missing required
/// fields surface as one validation error listing them all. The required
/// fields only have to be present: any JSON scalar is taken as text, and an
/// explicit `null` is stored as NULL where the column allows it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateClient {
    #[serde(default, deserialize_with = "nullable::loose_text")]
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::loose_text")]
    #[validate(length(max = 10, message = "must be at most 10 characters"))]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::loose_text")]
    pub date_of_birth: Option<Option<String>>,
    #[validate(length(max = 15, message = "must be at most 15 characters"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub address: Option<String>,
}

/// Validated insert values for a new client.
#[derive(Debug, Clone)]
pub struct NewClient {
    pub full_name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<Date>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl CreateClient {
    pub fn into_new(self) -> Result<NewClient, CoreError> {
        require_fields(&[
            ("full_name", self.full_name.is_some()),
            ("gender", self.gender.is_some()),
            ("date_of_birth", self.date_of_birth.is_some()),
        ])?;
        validate_input(&self)?;

        let full_name = self
            .full_name
            .flatten()
            .ok_or_else(|| CoreError::Validation("full_name must not be null".to_string()))?;
        let date_of_birth =
            parse_optional_date("date_of_birth", self.date_of_birth.flatten().as_deref())?;

        Ok(NewClient {
            full_name,
            gender: self.gender.flatten(),
            date_of_birth,
            phone_number: self.phone_number,
            address: self.address,
        })
    }
}

/// Request body for updating a client. Absent fields are left unchanged,
/// an explicit `null` clears a nullable column, and unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClient {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(length(max = 10, message = "must be at most 10 characters"))]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    pub date_of_birth: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(length(max = 15, message = "must be at most 15 characters"))]
    pub phone_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable::deserialize")]
    #[validate(length(max = 255, message = "must be at most 255 characters"))]
    pub address: Option<Option<String>>,
}

/// Validated column changes for a client update.
///
/// The outer `Option` says whether to touch the column; `Some(None)` sets it
/// to NULL.
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub full_name: Option<String>,
    pub gender: Option<Option<String>>,
    pub date_of_birth: Option<Option<Date>>,
    pub phone_number: Option<Option<String>>,
    pub address: Option<Option<String>>,
}

impl UpdateClient {
    pub fn into_changes(self) -> Result<ClientChanges, CoreError> {
        validate_input(&self)?;
        let date_of_birth = self
            .date_of_birth
            .map(|raw| parse_optional_date("date_of_birth", raw.as_deref()))
            .transpose()?;
        Ok(ClientChanges {
            date_of_birth,
            full_name: self.full_name,
            gender: self.gender,
            phone_number: self.phone_number,
            address: self.address,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn alice() -> CreateClient {
        CreateClient {
            full_name: Some(Some("Alice".into())),
            gender: Some(Some("Female".into())),
            date_of_birth: Some(Some("1990-05-21".into())),
            ..Default::default()
        }
    }

    #[test]
    fn create_with_required_fields() {
        let new = alice().into_new().unwrap();
        assert_eq!(new.full_name, "Alice");
        assert_eq!(new.date_of_birth, Date::from_ymd_opt(1990, 5, 21));
        assert_eq!(new.phone_number, None);
    }

    #[test]
    fn create_reports_missing_fields() {
        let input = CreateClient {
            full_name: Some(Some("Bob".into())),
            ..Default::default()
        };
        assert_matches!(
            input.into_new(),
            Err(CoreError::Validation(msg)) if msg == "Missing required fields: gender, date_of_birth"
        );
    }

    #[test]
    fn create_rejects_malformed_birth_date() {
        let input = CreateClient {
            date_of_birth: Some(Some("21/05/1990".into())),
            ..alice()
        };
        assert_matches!(input.into_new(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_rejects_overlong_phone() {
        let input = CreateClient {
            phone_number: Some("0".repeat(16)),
            ..alice()
        };
        assert_matches!(
            input.into_new(),
            Err(CoreError::Validation(msg)) if msg.starts_with("phone_number")
        );
    }

    #[test]
    fn update_parses_birth_date_and_ignores_unknown_fields() {
        let input: UpdateClient =
            serde_json::from_str(r#"{"date_of_birth": "1985-09-10", "favourite_colour": "red"}"#)
                .unwrap();
        let changes = input.into_changes().unwrap();
        assert_eq!(changes.date_of_birth, Some(Date::from_ymd_opt(1985, 9, 10)));
        assert_eq!(changes.full_name, None);
    }

    #[test]
    fn update_rejects_malformed_birth_date() {
        let input = UpdateClient {
            date_of_birth: Some(Some("1985-9".into())),
            ..Default::default()
        };
        assert_matches!(input.into_changes(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_accepts_present_null_and_scalar_values() {
        let input: CreateClient = serde_json::from_str(
            r#"{"full_name": "Carol", "gender": null, "date_of_birth": null, "phone_number": "0712"}"#,
        )
        .unwrap();
        let new = input.into_new().unwrap();
        assert_eq!(new.gender, None);
        assert_eq!(new.date_of_birth, None);

        let input: CreateClient =
            serde_json::from_str(r#"{"full_name": 42, "gender": 1, "date_of_birth": "2001-01-01"}"#)
                .unwrap();
        let new = input.into_new().unwrap();
        assert_eq!(new.full_name, "42");
        assert_eq!(new.gender.as_deref(), Some("1"));
    }

    #[test]
    fn create_rejects_null_full_name() {
        let input: CreateClient =
            serde_json::from_str(r#"{"full_name": null, "gender": "F", "date_of_birth": null}"#)
                .unwrap();
        assert_matches!(
            input.into_new(),
            Err(CoreError::Validation(msg)) if msg.starts_with("full_name")
        );
    }

    #[test]
    fn update_null_clears_and_absent_leaves_alone() {
        let input: UpdateClient =
            serde_json::from_str(r#"{"phone_number": null, "date_of_birth": null}"#).unwrap();
        let changes = input.into_changes().unwrap();
        assert_eq!(changes.phone_number, Some(None));
        assert_eq!(changes.date_of_birth, Some(None));
        assert_eq!(changes.address, None);
        assert_eq!(changes.gender, None);
    }
}

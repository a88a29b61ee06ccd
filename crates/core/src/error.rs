/// Domain-level error shared by every layer.
///
/// `NotFound` carries the id as text because clients are keyed by UUID while
/// programs and enrollments use integer ids.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a `NotFound` with any displayable id.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {detail}")
            })
            .collect();
        fields.sort();
        CoreError::Validation(fields.join("; "))
    }
}

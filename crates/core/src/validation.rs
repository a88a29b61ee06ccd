//! Request field validation shared by the write paths.

use validator::Validate;

use crate::error::CoreError;

/// Fail with a single `Validation` error naming every absent required field.
///
/// Each entry pairs a field name with whether the request supplied it.
pub fn require_fields(fields: &[(&str, bool)]) -> Result<(), CoreError> {
    if fields.iter().all(|(_, present)| *present) {
        Ok(())
    } else {
        Err(missing_fields(fields))
    }
}

/// Build the `Validation` error listing the absent fields of `fields`.
pub fn missing_fields(fields: &[(&str, bool)]) -> CoreError {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    CoreError::Validation(format!("Missing required fields: {}", missing.join(", ")))
}

/// Run a DTO's `validator` rules, converting failures into `CoreError`.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(CoreError::from)
}

/// Escape `%`, `_` and `\` so user text matches literally inside `ILIKE`.
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Wrap user text as a case-insensitive substring pattern.
pub fn contains_pattern(raw: &str) -> String {
    format!("%{}%", escape_like(raw))
}

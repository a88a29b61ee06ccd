//! Enrollment integrity rules and the eligibility computation.
//!
//! The database enforces one enrollment per (client, program) pair with the
//! `uq_enrollments_client_program` constraint; the helpers here produce the
//! matching domain errors and resolve references before any write.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{parse_client_id, ClientId, DbId, LooseId};

/// Name of the storage constraint guarding duplicate enrollments.
pub const UNIQUE_PAIR_CONSTRAINT: &str = "uq_enrollments_client_program";

pub const ALREADY_ENROLLED: &str = "Client is already enrolled in this program.";

/// Error returned whenever a write would duplicate an enrollment.
pub fn already_enrolled() -> CoreError {
    CoreError::Conflict(ALREADY_ENROLLED.to_string())
}

/// The identity an enrollment must keep unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnrollmentPair {
    pub client_id: ClientId,
    pub program_id: DbId,
}

impl EnrollmentPair {
    /// Apply optional replacements from an update request.
    pub fn with_changes(self, client_id: Option<ClientId>, program_id: Option<DbId>) -> Self {
        Self {
            client_id: client_id.unwrap_or(self.client_id),
            program_id: program_id.unwrap_or(self.program_id),
        }
    }
}

/// Read a client reference from request text.
///
/// A value that is not a UUID cannot name an existing client, so it is
/// reported as not found rather than malformed.
pub fn client_ref(raw: &str) -> Result<ClientId, CoreError> {
    parse_client_id(raw).ok_or_else(|| CoreError::not_found("Client", raw))
}

/// Read a program reference from a JSON number or numeric string.
pub fn program_ref(raw: &LooseId) -> Result<DbId, CoreError> {
    match raw {
        LooseId::Valid(id) => Ok(*id),
        LooseId::Invalid(text) => Err(CoreError::not_found("Program", text)),
    }
}

// ---------------------------------------------------------------------------
// Eligibility
// ---------------------------------------------------------------------------

/// A client together with the program ids of its enrollments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientEnrollments {
    pub client_id: ClientId,
    pub name: String,
    pub program_ids: Vec<DbId>,
}

/// A client that can still be enrolled somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibleClient {
    pub id: ClientId,
    pub name: String,
}

/// A client is eligible while it is enrolled in fewer distinct programs than
/// exist. With zero programs nobody is eligible.
pub fn is_eligible(distinct_enrolled: usize, total_programs: usize) -> bool {
    distinct_enrolled < total_programs
}

/// Filter clients down to the eligible ones, preserving input order.
///
/// Duplicate program ids in a client's list count once.
pub fn eligible_clients(
    clients: impl IntoIterator<Item = ClientEnrollments>,
    total_programs: usize,
) -> Vec<EligibleClient> {
    clients
        .into_iter()
        .filter(|c| {
            let distinct: HashSet<DbId> = c.program_ids.iter().copied().collect();
            is_eligible(distinct.len(), total_programs)
        })
        .map(|c| EligibleClient {
            id: c.client_id,
            name: c.name,
        })
        .collect()
}

/// Fold `(client, name, program)` rows from a LEFT JOIN into one entry per
/// client. Rows for the same client must be adjacent; a `None` program
/// marks a client with no enrollments.
pub fn group_enrollment_rows(
    rows: impl IntoIterator<Item = (ClientId, String, Option<DbId>)>,
) -> Vec<ClientEnrollments> {
    let mut grouped: Vec<ClientEnrollments> = Vec::new();
    for (client_id, name, program_id) in rows {
        match grouped.last_mut() {
            Some(last) if last.client_id == client_id => {
                last.program_ids.extend(program_id);
            }
            _ => grouped.push(ClientEnrollments {
                client_id,
                name,
                program_ids: program_id.into_iter().collect(),
            }),
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    fn client(name: &str, programs: &[DbId]) -> ClientEnrollments {
        ClientEnrollments {
            client_id: Uuid::new_v4(),
            name: name.to_string(),
            program_ids: programs.to_vec(),
        }
    }

    // -- eligibility ---------------------------------------------------------

    #[test]
    fn eligible_iff_fewer_programs_than_exist() {
        assert!(is_eligible(0, 1));
        assert!(is_eligible(1, 2));
        assert!(!is_eligible(2, 2));
        assert!(!is_eligible(3, 2));
    }

    #[test]
    fn nobody_is_eligible_without_programs() {
        let out = eligible_clients(vec![client("Alice", &[]), client("James", &[])], 0);
        assert!(out.is_empty());
    }

    #[test]
    fn fully_enrolled_clients_are_excluded() {
        let alice = client("Alice", &[1, 2]);
        let james = client("James", &[2]);
        let mary = client("Mary", &[]);
        let out = eligible_clients(vec![alice, james.clone(), mary.clone()], 2);
        let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["James", "Mary"]);
        assert_eq!(out[0].id, james.client_id);
    }

    #[test]
    fn duplicate_program_ids_count_once() {
        let out = eligible_clients(vec![client("Alice", &[1, 1])], 2);
        assert_eq!(out.len(), 1);
    }

    // -- grouping ------------------------------------------------------------

    #[test]
    fn groups_adjacent_rows_per_client() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            (a, "Alice".to_string(), Some(1)),
            (a, "Alice".to_string(), Some(2)),
            (b, "James".to_string(), None),
        ];
        let grouped = group_enrollment_rows(rows);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].program_ids, vec![1, 2]);
        assert_eq!(grouped[1].name, "James");
        assert!(grouped[1].program_ids.is_empty());
    }

    // -- references ----------------------------------------------------------

    #[test]
    fn malformed_client_reference_is_not_found() {
        assert_matches!(
            client_ref("12"),
            Err(CoreError::NotFound { entity: "Client", id }) if id == "12"
        );
    }

    #[test]
    fn program_reference_from_loose_id() {
        assert_eq!(program_ref(&LooseId::Valid(4)).unwrap(), 4);
        assert_matches!(
            program_ref(&LooseId::Invalid("x".into())),
            Err(CoreError::NotFound { entity: "Program", .. })
        );
    }

    #[test]
    fn update_replaces_only_supplied_references() {
        let pair = EnrollmentPair {
            client_id: Uuid::new_v4(),
            program_id: 1,
        };
        let other = Uuid::new_v4();
        assert_eq!(pair.with_changes(None, None), pair);
        assert_eq!(pair.with_changes(None, Some(9)).program_id, 9);
        assert_eq!(pair.with_changes(Some(other), None).client_id, other);
    }

    #[test]
    fn duplicate_is_a_conflict() {
        assert_matches!(already_enrolled(), CoreError::Conflict(msg) if msg == ALREADY_ENROLLED);
    }
}

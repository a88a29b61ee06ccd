//! Program soft-delete lifecycle.
//!
//! A program is either live or soft-deleted. The only transition is
//! live -> soft-deleted, performed by the delete operation. Nothing moves a
//! program back, and update payloads cannot touch the state columns.

use crate::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    Live,
    SoftDeleted { at: Timestamp },
}

/// Outcome of asking a program to soft-delete itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDelete {
    /// The program was live; stamp it with this time.
    Apply { at: Timestamp },
    /// Already deleted. The original timestamp is kept.
    AlreadyDeleted { at: Timestamp },
}

impl ProgramState {
    /// Rebuild the state from the stored `is_deleted` / `deleted_at` columns.
    ///
    /// A row flagged deleted without a timestamp (legacy data) falls back to
    /// `fallback` so the state is always well formed.
    pub fn from_columns(is_deleted: bool, deleted_at: Option<Timestamp>, fallback: Timestamp) -> Self {
        match (is_deleted, deleted_at) {
            (false, _) => ProgramState::Live,
            (true, Some(at)) => ProgramState::SoftDeleted { at },
            (true, None) => ProgramState::SoftDeleted { at: fallback },
        }
    }

    pub fn is_deleted(self) -> bool {
        matches!(self, ProgramState::SoftDeleted { .. })
    }

    pub fn soft_delete(self, now: Timestamp) -> SoftDelete {
        match self {
            ProgramState::Live => SoftDelete::Apply { at: now },
            ProgramState::SoftDeleted { at } => SoftDelete::AlreadyDeleted { at },
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 4, 26, 9, 0, 0).unwrap()
    }

    #[test]
    fn live_program_gets_stamped() {
        let now = t0();
        assert_eq!(ProgramState::Live.soft_delete(now), SoftDelete::Apply { at: now });
    }

    #[test]
    fn second_delete_keeps_first_timestamp() {
        let first = t0();
        let state = ProgramState::SoftDeleted { at: first };
        assert_eq!(
            state.soft_delete(first + Duration::hours(3)),
            SoftDelete::AlreadyDeleted { at: first }
        );
    }

    #[test]
    fn state_from_columns() {
        let at = t0();
        assert_eq!(ProgramState::from_columns(false, None, at), ProgramState::Live);
        assert_eq!(ProgramState::from_columns(false, Some(at), at), ProgramState::Live);
        assert!(ProgramState::from_columns(true, Some(at), at).is_deleted());
        assert_eq!(
            ProgramState::from_columns(true, None, at),
            ProgramState::SoftDeleted { at }
        );
    }
}

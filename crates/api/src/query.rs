//! Shared query parameter types for API handlers.
//!
//! Every field is kept as raw text: a malformed `page` or flag falls back to
//! its default instead of rejecting the request.

use healthtrack_core::pagination::PageRequest;
use healthtrack_core::types::{parse_client_id, parse_db_id, ClientId, DbId};
use healthtrack_db::models::program::ProgramFilter;
use serde::Deserialize;

/// `?page=&limit=` as sent by the client.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.limit.as_deref())
    }
}

/// `?q=` for the unpaginated search endpoints. Absent means empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Query string of `GET /clients`.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListParams {
    pub q: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

/// Query string of `GET /programs`.
#[derive(Debug, Default, Deserialize)]
pub struct ProgramListParams {
    pub q: Option<String>,
    pub status: Option<String>,
    pub is_deleted: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl ProgramListParams {
    pub fn filter(&self) -> ProgramFilter {
        ProgramFilter {
            q: self.q.clone(),
            status: self.status.clone(),
            is_deleted: parse_flag(self.is_deleted.as_deref()),
        }
    }
}

/// `"true"` in any case is true, any other non-empty text is false, and an
/// empty or absent value means "do not filter".
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.eq_ignore_ascii_case("true"))
}

/// Query string of `GET /enrollments/search`.
#[derive(Debug, Default, Deserialize)]
pub struct EnrollmentSearchParams {
    pub client_id: Option<String>,
    pub program_id: Option<String>,
}

/// A search filter that either applies, is absent, or can never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter<T> {
    Any,
    Exact(T),
    Unmatchable,
}

impl<T> Filter<T> {
    fn parse(raw: Option<&str>, parse: impl Fn(&str) -> Option<T>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Filter::Any,
            Some(text) => parse(text).map_or(Filter::Unmatchable, Filter::Exact),
        }
    }

    pub fn exact(self) -> Option<T> {
        match self {
            Filter::Exact(value) => Some(value),
            _ => None,
        }
    }
}

impl EnrollmentSearchParams {
    pub fn client_filter(&self) -> Filter<ClientId> {
        Filter::parse(self.client_id.as_deref(), parse_client_id)
    }

    pub fn program_filter(&self) -> Filter<DbId> {
        Filter::parse(self.program_id.as_deref(), parse_db_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing() {
        assert_eq!(parse_flag(Some("TRUE")), Some(true));
        assert_eq!(parse_flag(Some("true")), Some(true));
        assert_eq!(parse_flag(Some("yes")), Some(false));
        assert_eq!(parse_flag(Some("")), None);
        assert_eq!(parse_flag(None), None);
    }

    #[test]
    fn malformed_enrollment_filters_never_match() {
        let params = EnrollmentSearchParams {
            client_id: Some("not-a-uuid".into()),
            program_id: Some("abc".into()),
        };
        assert_eq!(params.client_filter(), Filter::Unmatchable);
        assert_eq!(params.program_filter(), Filter::Unmatchable);
    }

    #[test]
    fn blank_enrollment_filters_match_everything() {
        let params = EnrollmentSearchParams {
            client_id: Some(" ".into()),
            program_id: None,
        };
        assert_eq!(params.client_filter(), Filter::Any);
        assert_eq!(params.program_filter(), Filter::Any);
    }

    #[test]
    fn numeric_program_filter() {
        let params = EnrollmentSearchParams {
            client_id: None,
            program_id: Some("4".into()),
        };
        assert_eq!(params.program_filter().exact(), Some(4));
    }
}

//! Domain rules for the enrollment tracker.
//!
//! Pure logic only: no database or HTTP dependencies, so every rule can be
//! unit tested in isolation and shared by the `db` and `api` crates.

pub mod dates;
pub mod enrollment;
pub mod error;
pub mod nullable;
pub mod pagination;
pub mod program_lifecycle;
pub mod program_status;
pub mod types;
pub mod validation;

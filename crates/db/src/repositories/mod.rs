//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod client_repo;
pub mod dashboard_repo;
pub mod enrollment_repo;
pub mod program_repo;

pub use client_repo::{ClientDeletion, ClientRepo};
pub use dashboard_repo::DashboardRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use program_repo::ProgramRepo;

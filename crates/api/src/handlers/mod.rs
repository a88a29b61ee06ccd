pub mod client;
pub mod dashboard;
pub mod enrollment;
pub mod program;
pub mod report;

//! Domain model structs and DTOs.
//!
//! Each entity submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the JSON contract
//! - A `Deserialize` create DTO converted into validated insert values
//! - A `Deserialize` update DTO (all `Option` fields) converted into changes

pub mod client;
pub mod dashboard;
pub mod enrollment;
pub mod program;

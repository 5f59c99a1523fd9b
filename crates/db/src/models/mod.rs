//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` request DTOs for the operations on that entity

pub mod form_field;
pub mod preference;
pub mod progress;
pub mod user;

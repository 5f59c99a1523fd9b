//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod form_field_repo;
pub mod preference_repo;
pub mod progress_repo;
pub mod user_repo;

pub use form_field_repo::FormFieldRepo;
pub use preference_repo::PreferenceRepo;
pub use progress_repo::ProgressRepo;
pub use user_repo::UserRepo;

// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod error;
pub mod id;

pub use auth::Actor;
pub use entity_ids::*;
pub use error::{is_unique_violation, RecordError};
pub use id::Id;

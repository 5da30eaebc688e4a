//! Domain-specific error types
//!
//! - **ApiError**: request handling faults, mapped onto HTTP status codes
//! - **SeedError**: faults while loading the CSV seed files at startup
//!
//! Validation faults are defined next to the schemas that raise them
//! ([`crate::schemas::ValidationError`]) and wrapped by `ApiError::Validation`.

pub mod api;
pub mod seed;

pub use api::{ApiError, INTERNAL_ERROR_MESSAGE};
pub use seed::SeedError;

/// Result type alias for request handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for bootstrap seeding
pub type SeedResult<T> = Result<T, SeedError>;

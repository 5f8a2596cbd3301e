//! Diesel models mirroring the SQLite schema.

use crate::domain::types::{NonEmptyString, TypeConstraintError};

pub mod address;
#[cfg(feature = "server")]
pub mod auth;
pub mod banner;
pub mod brand;
pub mod business;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod product;
pub mod user;

/// Maps a nullable column into an optional value object, treating blank
/// strings as absent.
pub(crate) fn optional<T, F>(value: Option<String>, build: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value {
        Some(raw) if !raw.trim().is_empty() => build(raw).map(Some),
        _ => Ok(None),
    }
}

pub(crate) fn optional_text(value: Option<String>) -> Result<Option<NonEmptyString>, TypeConstraintError> {
    optional(value, NonEmptyString::new)
}

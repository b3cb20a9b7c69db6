//! Core data-access logic, independent of the HTTP layer.
//!
//! Each submodule owns one entity: listing, lookup, creation, partial update,
//! and deletion, plus the consistency rules that span tables (cascade and
//! nullify on delete, foreign-key checks on write). Multi-step writes run in a
//! single database transaction.

/// Device category operations
pub mod category;
/// Device operations and relation resolution
pub mod device;
/// Device change-log operations
pub mod device_log;
/// Room operations
pub mod room;
/// Optional sample data for an empty database
pub mod seed;
/// Dashboard aggregate counts
pub mod stats;
/// User operations
pub mod user;

use crate::errors::{Error, Result};
use serde::{Deserialize, Deserializer};

/// Returns the trimmed value of a required text field, or a validation error
/// naming the field when it is empty or whitespace-only.
pub(crate) fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Deserializes a field that is present in the input, even as `null`, into `Some(..)`.
///
/// Combined with `#[serde(default)]` this turns `Option<Option<T>>` into a
/// three-state patch value: absent → `None`, `null` → `Some(None)`,
/// value → `Some(Some(v))`.
pub(crate) fn deserialize_present<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

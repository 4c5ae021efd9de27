//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize the
//! mapping between stored string ids and typed [`Uuid`]s.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

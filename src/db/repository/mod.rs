//! Repository layer: entity-scoped database operations.
//!
//! Functions take a `&Connection` so callers can run them inside a
//! transaction (`Transaction` derefs to `Connection`).

mod analysis;
mod assessment;
mod tracking_case;

use std::str::FromStr;

use uuid::Uuid;

use super::DatabaseError;
use crate::models::Severity;

pub use analysis::*;
pub use assessment::*;
pub use tracking_case::*;

pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

pub(crate) fn parse_severity(v: i64) -> Result<Severity, DatabaseError> {
    Severity::new(v).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

pub(crate) fn parse_enum<T: FromStr<Err = DatabaseError>>(s: &str) -> Result<T, DatabaseError> {
    T::from_str(s)
}

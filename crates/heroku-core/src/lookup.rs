//! Translation of the platform's `not_found` sentinel into absent results.
//!
//! Lookups by name (`GET /apps/{name}`, `GET /pipelines/{name}`) answer with
//! a body whose `id` is the literal `not_found` when nothing matches. That
//! answer must surface as `None`, never as a populated record and never as an
//! error. Every lookup in the workspace goes through [`resolve`] so the rule
//! lives in one place.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Identifier the platform returns in place of a record that does not exist.
pub const NOT_FOUND_ID: &str = "not_found";

/// Returns true when `id` is the not-found sentinel.
#[must_use]
pub fn is_not_found_id(id: &str) -> bool {
    id == NOT_FOUND_ID
}

/// Returns true when a decoded JSON body carries the not-found sentinel.
#[must_use]
pub fn is_not_found_body(body: &Value) -> bool {
    body.get("id")
        .and_then(Value::as_str)
        .is_some_and(is_not_found_id)
}

/// Resolves the outcome of a lookup call into an optional record.
///
/// - a body carrying the sentinel yields `Ok(None)`
/// - an [`Error::Status`] carrying the sentinel yields `Ok(None)`
/// - any other body is decoded into `T`
/// - any other error is returned unchanged
///
/// # Errors
///
/// Returns the original error when it is not the sentinel, or a
/// serialization error when the body does not decode into `T`.
pub fn resolve<T: DeserializeOwned>(outcome: Result<Value>) -> Result<Option<T>> {
    match outcome {
        Ok(body) if is_not_found_body(&body) => Ok(None),
        Ok(body) => serde_json::from_value(body)
            .map(Some)
            .map_err(|e| Error::serialization(format!("invalid lookup response: {e}"))),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

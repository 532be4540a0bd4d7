//! Decoding of caller-supplied request bodies.
//!
//! Both surfaces receive bodies as raw JSON and decode them here, so a malformed body is
//! reported the same way over HTTP and as a tool argument.

use crate::{ServiceError, ServiceResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode `value` into a request type.
///
/// `root` names the whole body in errors (`body`, `arguments`). Derived request types would
/// accept a JSON array positionally, so anything but an object is rejected first.
///
/// # Errors
///
/// [`ServiceError::InputFormat`] naming the offending field when the value does not fit `T`.
pub fn decode<T: DeserializeOwned>(root: &str, value: Value) -> ServiceResult<T> {
    if !value.is_object() {
        return Err(ServiceError::input_format(root, "Expected a JSON object."));
    }

    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let field = match err.path().iter().next() {
            Some(_) => err.path().to_string(),
            None => root.to_string(),
        };
        ServiceError::input_format(&field, format!("{}.", err.into_inner()))
    })
}

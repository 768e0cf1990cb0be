//! Structured `{statusCode, body}` results returned to API Gateway and the scheduler.

use serde::Serialize;
use serde_json::{Value, json};

use crate::errors::WatchError;

/// Returns a 200 OK response whose body is the JSON encoding of `message`.
#[must_use]
pub fn ok_text(message: &str) -> Value {
    json!({
        "statusCode": 200,
        "body": Value::String(message.to_string()).to_string()
    })
}

/// Returns a 200 OK response with a serialized JSON body.
#[must_use]
pub fn ok_json<T: Serialize>(body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    json!({ "statusCode": 200, "body": body })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "body": json!({ "error": message }).to_string()
    })
}

/// Converts a pipeline failure into its error response.
#[must_use]
pub fn from_error(error: &WatchError) -> Value {
    err_response(error.status_code(), &error.to_string())
}

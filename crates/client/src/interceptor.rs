//! Response interception.
//!
//! Every response passes through [`intercept`] before resource code sees
//! it. Error bodies from the API are not uniform, so the known shapes are
//! folded into one [`ClientError`] representation here:
//!
//! - `{"errors": [{"field": "...", "msg": "..."}]}` becomes
//!   [`ClientError::Validation`].
//! - `{"msg": "..."}` or `{"description": "..."}` becomes
//!   [`ClientError::Api`] with that message.
//! - Anything else becomes [`ClientError::Api`] with the canonical reason
//!   phrase for the status code.
//!
//! Each part of the body is read on its own. An `errors[]` entry without a
//! string `msg` is skipped, and when no entry survives the top-level
//! `msg` or `description` is used instead.

use serde_json::Value;

use crate::error::{ClientError, ClientResult, FieldError};
use crate::transport::ApiResponse;

/// Pass 2xx responses through unchanged and classify everything else.
pub fn intercept(response: ApiResponse) -> ClientResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }
    Err(classify(&response))
}

fn classify(response: &ApiResponse) -> ClientError {
    let body: Value = serde_json::from_slice(&response.body).unwrap_or(Value::Null);

    let errors = field_errors(&body);
    if !errors.is_empty() {
        return ClientError::Validation(errors);
    }

    let message = string_field(&body, "msg")
        .or_else(|| string_field(&body, "description"))
        .unwrap_or_else(|| status_text(response.status));

    ClientError::Api {
        status: response.status,
        message,
    }
}

fn field_errors(body: &Value) -> Vec<FieldError> {
    let Some(items) = body.get("errors").and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            Some(FieldError {
                field: string_field(item, "field"),
                msg: string_field(item, "msg")?,
            })
        })
        .collect()
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn status_text(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"))
}

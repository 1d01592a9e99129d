// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request body extraction
//!
//! Clients only ever see one message for an unusable quote body. The precise
//! reason (wrong content type, syntax error location, wrong member type) is
//! logged at debug level so it can be recovered from the server logs.

use axum::http::header;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{ServiceError, ServiceResult},
    handler::HandlerRequest,
};

mod error_hints {
    pub const MISSING_COMMA: &str =
        "check for missing or extra commas between object properties or array elements";
    pub const MISSING_BRACE: &str = "check for missing closing brace '}' for JSON object";
    pub const MISSING_QUOTES: &str =
        "check for missing or improperly escaped quotes around string values";
    pub const CONTROL_CHARS: &str = "JSON contains invalid control characters that must be escaped";
    pub const EXPECTED_VALUE: &str =
        "expected a valid JSON value (string, number, boolean, null, object, or array)";
    pub const DEFAULT_SYNTAX: &str = "check JSON formatting and structure";
    pub const EMPTY_BODY: &str = "request body is empty, expected a JSON object";
    pub const TRUNCATED_JSON: &str =
        "unexpected end of JSON input, request appears to be truncated";
    pub const UNREADABLE_BODY: &str = "request body could not be read or exceeds the size limit";
}

/// Largest request body the service reads
pub const MAX_JSON_PAYLOAD_SIZE: usize = 1024 * 1024; // 1MB limit

/// A JSON object body carrying a string `quote` member
///
/// Other members of the object are ignored. A `quote` that is present but
/// not a string, such as `{"quote": 42}`, is rejected like a missing one
/// rather than stored as an arbitrary JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuoteBody {
    /// Quote text supplied by the client
    pub quote: String,
}

impl QuoteBody {
    /// Extract the quote body from a request
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError::Validation`] carrying the fixed
    /// "must supply 'quote'" message whenever the body does not qualify.
    pub fn extract(request: &HandlerRequest) -> ServiceResult<Self> {
        Self::parse(request).map_err(|reason| {
            debug!(
                method = %request.method(),
                path = request.path(),
                %reason,
                "rejected quote body"
            );
            ServiceError::missing_quote()
        })
    }

    fn parse(request: &HandlerRequest) -> Result<Self, String> {
        if let Some(content_type) = request.headers().get(header::CONTENT_TYPE)
            && let Ok(content_type_str) = content_type.to_str()
            && !content_type_str.starts_with("application/json")
        {
            return Err(format!(
                "invalid content-type: expected 'application/json', got '{content_type_str}'"
            ));
        }

        let Some(bytes) = request.body() else {
            return Err(error_hints::UNREADABLE_BODY.to_string());
        };

        if bytes.is_empty() {
            return Err(error_hints::EMPTY_BODY.to_string());
        }

        serde_json::from_slice::<Self>(bytes).map_err(|err| {
            if err.is_syntax() {
                format!(
                    "invalid JSON syntax at line {}, column {}: {}",
                    err.line(),
                    err.column(),
                    json_syntax_hint(&err)
                )
            } else if err.is_eof() {
                error_hints::TRUNCATED_JSON.to_string()
            } else {
                format!("JSON data validation failed: {err}")
            }
        })
    }
}

/// Provides helpful hints for JSON syntax errors
fn json_syntax_hint(err: &serde_json::Error) -> &'static str {
    let err_msg = err.to_string();

    if err_msg.contains("expected ','") || err_msg.contains("trailing comma") {
        error_hints::MISSING_COMMA
    } else if err_msg.contains("expected '}'") {
        error_hints::MISSING_BRACE
    } else if err_msg.contains("expected '\"'") {
        error_hints::MISSING_QUOTES
    } else if err_msg.contains("control character") {
        error_hints::CONTROL_CHARS
    } else if err_msg.contains("expected value") {
        error_hints::EXPECTED_VALUE
    } else {
        error_hints::DEFAULT_SYNTAX
    }
}

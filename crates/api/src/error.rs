// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides two error families:
//!
//! - [`ServerError`] for server lifecycle operations (configuration, binding,
//!   startup, shutdown)
//! - [`ServiceError`] for request handlers. Handlers propagate these with `?`
//!   and the request wrapper in [`crate::handler`] is the only place they are
//!   turned into response envelopes.

use std::net::SocketAddr;

use axum::http::{Method, StatusCode};
use quote_store::StoreError;
use thiserror::Error;

/// Message for request bodies without a usable `quote` member
pub const MISSING_QUOTE_MESSAGE: &str = "must supply 'quote' via JSON dictionary";

/// Message for quote IDs that are not integers
pub const NON_NUMERIC_ID_MESSAGE: &str = "quote IDs must be numbers";

/// Error types for server lifecycle operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// Failures raised by request handlers
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Malformed request: bad path parameter or unusable JSON body
    #[error("{0}")]
    Validation(String),

    /// Quote index outside the collection
    #[error("no quote ID {index}")]
    OutOfRange {
        /// Index as supplied by the client, in canonical integer form
        index: String,
    },

    /// No route matches the request
    #[error("no route for {method} {path}")]
    NotFound {
        /// Request method
        method: Method,
        /// Request path
        path: String,
    },

    /// Route exists but does not accept the method
    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed {
        /// Request method
        method: Method,
        /// Request path
        path: String,
    },

    /// Anything else that went wrong inside a handler
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result type for request handlers
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Body without a usable `quote` member
    pub fn missing_quote() -> Self {
        Self::Validation(MISSING_QUOTE_MESSAGE.to_string())
    }

    /// Path parameter that is not an integer
    pub fn non_numeric_id() -> Self {
        Self::Validation(NON_NUMERIC_ID_MESSAGE.to_string())
    }

    /// Index outside the collection
    pub fn out_of_range(index: impl ToString) -> Self {
        Self::OutOfRange {
            index: index.to_string(),
        }
    }

    /// HTTP status hint carried into the failure envelope
    ///
    /// Internal failures carry no hint and surface as 500.
    pub fn status_hint(&self) -> Option<StatusCode> {
        match self {
            Self::Validation(_) | Self::OutOfRange { .. } => Some(StatusCode::BAD_REQUEST),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            Self::MethodNotAllowed { .. } => Some(StatusCode::METHOD_NOT_ALLOWED),
            Self::Internal(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::OutOfRange { index } => Self::out_of_range(index),
            other @ (StoreError::Empty | StoreError::MissingField { .. }) => {
                Self::Internal(anyhow::Error::new(other))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_carry_bad_request_hint() {
        assert_eq!(
            ServiceError::missing_quote().status_hint(),
            Some(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            ServiceError::non_numeric_id().to_string(),
            "quote IDs must be numbers"
        );
        assert_eq!(
            ServiceError::out_of_range(999).status_hint(),
            Some(StatusCode::BAD_REQUEST)
        );
    }

    #[test]
    fn out_of_range_keeps_indices_wider_than_i64() {
        let error = ServiceError::out_of_range("99999999999999999999");
        assert_eq!(error.to_string(), "no quote ID 99999999999999999999");
        assert_eq!(error.status_hint(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn internal_errors_have_no_hint() {
        let error = ServiceError::from(anyhow::anyhow!("disk on fire"));
        assert_eq!(error.status_hint(), None);
        assert_eq!(error.to_string(), "disk on fire");
    }

    #[test]
    fn store_errors_are_classified() {
        let out_of_range = ServiceError::from(StoreError::OutOfRange { index: -2 });
        assert!(matches!(&out_of_range, ServiceError::OutOfRange { index } if index == "-2"));
        assert_eq!(out_of_range.to_string(), "no quote ID -2");

        let missing = ServiceError::from(StoreError::MissingField {
            index: 1,
            field: "iambs",
        });
        assert!(matches!(missing, ServiceError::Internal(_)));
        assert_eq!(missing.to_string(), "quote ID 1 has no 'iambs' annotation");
    }

    #[test]
    fn not_found_message() {
        let error = ServiceError::NotFound {
            method: Method::DELETE,
            path: "/quote/1".to_string(),
        };
        assert_eq!(error.to_string(), "no route for DELETE /quote/1");
        assert_eq!(error.status_hint(), Some(StatusCode::NOT_FOUND));

        let error = ServiceError::MethodNotAllowed {
            method: Method::DELETE,
            path: "/quote/1".to_string(),
        };
        assert_eq!(error.to_string(), "method DELETE not allowed for /quote/1");
        assert_eq!(error.status_hint(), Some(StatusCode::METHOD_NOT_ALLOWED));
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Uniform request handling
//!
//! Every route of the service registers its business handler through
//! [`standard_handler`]. The wrapper is the only place where:
//!
//! - session and identity headers are read and attached to the envelope
//! - handler failures and panics are caught, logged and turned into failure
//!   envelopes
//! - the HTTP status is derived from the envelope
//! - the session header is echoed back
//! - request metrics are recorded
//!
//! Business handlers run on their own task, so a dropped connection or a
//! transport timeout never interrupts a handler halfway through.

use std::{any::Any, collections::HashMap, future::Future, pin::Pin, time::Instant};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequestParts, Path, Request, State, rejection::PathRejection},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use shared_types::StatusEnvelope;
use tokio::task::JoinError;
use tracing::{debug, error, warn};

use crate::{
    error::{ServiceError, ServiceResult},
    extractors::MAX_JSON_PAYLOAD_SIZE,
    metrics,
    state::ServerState,
};

/// Opaque client session token, echoed back on the response
pub const SESSION_HEADER: HeaderName = HeaderName::from_static("x-shakespeare-session");

/// Caller identity asserted by an upstream proxy, copied into the body
pub const AUTHENTICATED_AS_HEADER: HeaderName = HeaderName::from_static("x-authenticated-as");

/// Future returned by a wrapped handler
pub type WrappedFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Request as seen by a business handler
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    params: HashMap<String, String>,
    params_undecodable: bool,
    body: Option<Bytes>,
}

impl HandlerRequest {
    /// Create a request without headers, path parameters or body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            params: HashMap::new(),
            params_undecodable: false,
            body: None,
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a path parameter
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set the request body
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Request method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request body, `None` if it could not be read within the size limit
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Raw path parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Path parameter parsed as a quote index
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the parameter is not an integer
    /// or does not decode to UTF-8, [`ServiceError::OutOfRange`] if it is an
    /// integer too wide for `i64`, or [`ServiceError::Internal`] if the route
    /// does not define it.
    pub fn index_param(&self, name: &str) -> ServiceResult<i64> {
        let Some(raw) = self.param(name) else {
            if self.params_undecodable {
                return Err(ServiceError::non_numeric_id());
            }
            return Err(ServiceError::Internal(anyhow::anyhow!(
                "route has no '{name}' path parameter"
            )));
        };

        let raw = raw.trim();
        raw.parse().map_err(|_| match wide_integer(raw) {
            Some(index) => ServiceError::out_of_range(index),
            None => ServiceError::non_numeric_id(),
        })
    }
}

/// Canonical form of an integer literal, `None` if `raw` is not one
///
/// Only called after an `i64` parse failed, so any integer here is out of range.
fn wide_integer(raw: &str) -> Option<String> {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match digits.trim_start_matches('0') {
        "" => Some("0".to_string()),
        significant => Some(format!("{sign}{significant}")),
    }
}

/// Wrap a business handler into an axum handler
///
/// `name` labels log lines, metrics and internal failure messages.
pub fn standard_handler<H, Fut>(
    name: &'static str,
    handler: H,
) -> impl Fn(State<ServerState>, Request) -> WrappedFuture + Clone + Send + Sync + 'static
where
    H: Fn(ServerState, HandlerRequest) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = ServiceResult<StatusEnvelope>> + Send + 'static,
{
    move |State(state): State<ServerState>, request: Request| -> WrappedFuture {
        Box::pin(handle(name, handler.clone(), state, request))
    }
}

async fn handle<H, Fut>(
    name: &'static str,
    handler: H,
    state: ServerState,
    request: Request,
) -> Response
where
    H: Fn(ServerState, HandlerRequest) -> Fut,
    Fut: Future<Output = ServiceResult<StatusEnvelope>> + Send + 'static,
{
    let started = Instant::now();
    let (mut parts, body) = request.into_parts();

    let session = present_header(&parts.headers, &SESSION_HEADER).cloned();
    let session_text = session
        .as_ref()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let username = present_header(&parts.headers, &AUTHENTICATED_AS_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

    let method = parts.method.clone();
    let path = parts.uri.path().to_string();

    debug!(
        handler = name,
        %method,
        path,
        session = session_text.as_deref(),
        username = username.as_deref(),
        "handling request"
    );

    let (params, params_undecodable) =
        match Path::<HashMap<String, String>>::from_request_parts(&mut parts, &state).await {
            Ok(Path(params)) => (params, false),
            Err(rejection) => {
                debug!(handler = name, %rejection, "no usable path parameters");
                let undecodable =
                    matches!(rejection, PathRejection::FailedToDeserializePathParams(_));
                (HashMap::new(), undecodable)
            }
        };

    let body = match axum::body::to_bytes(body, MAX_JSON_PAYLOAD_SIZE).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!(handler = name, error = %e, "failed to read request body");
            None
        }
    };

    let handler_request = HandlerRequest {
        method: method.clone(),
        path: path.clone(),
        headers: parts.headers,
        params,
        params_undecodable,
        body,
    };

    let outcome = tokio::spawn(handler(state.clone(), handler_request)).await;

    let mut envelope = match outcome {
        Ok(Ok(envelope)) => envelope,
        Ok(Err(failure)) => failure_envelope(&state, name, &method, &path, &failure),
        Err(join_error) => {
            let message = join_error_message(join_error);
            error!(
                handler = name,
                %method,
                path,
                panic = %message,
                "handler panicked"
            );
            StatusEnvelope::failure(
                state.identity(),
                format!("{name}: {method} {path} failed: {message}"),
            )
        }
    };

    if let Some(session) = &session_text {
        envelope.attach_session(session);
    }
    if let Some(username) = &username {
        envelope.attach_username(username);
    }

    let status = response_status(&envelope);
    if !envelope.is_ok() {
        debug!(handler = name, %envelope, "request failed");
    }
    metrics::observe_request(name, status, started.elapsed().as_secs_f64());

    let mut response = (status, Json(envelope)).into_response();
    if let Some(session) = session {
        response.headers_mut().insert(SESSION_HEADER, session);
    }
    response
}

/// Envelope for a failure returned by a business handler
fn failure_envelope(
    state: &ServerState,
    name: &str,
    method: &Method,
    path: &str,
    failure: &ServiceError,
) -> StatusEnvelope {
    match failure {
        ServiceError::Internal(e) => {
            error!(
                handler = name,
                %method,
                path,
                error = ?e,
                "handler failed"
            );
            StatusEnvelope::failure(
                state.identity(),
                format!("{name}: {method} {path} failed: {e}"),
            )
        }
        client_error => {
            let envelope = StatusEnvelope::failure(state.identity(), client_error.to_string());
            match client_error.status_hint() {
                Some(status) => envelope.with_status_code(status.as_u16()),
                None => envelope,
            }
        }
    }
}

/// HTTP status for an envelope: 200 when ok, else its status hint, else 500
pub fn response_status(envelope: &StatusEnvelope) -> StatusCode {
    if envelope.is_ok() {
        return StatusCode::OK;
    }
    envelope
        .status_code()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn present_header<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a HeaderValue> {
    headers.get(name).filter(|value| !value.is_empty())
}

fn join_error_message(join_error: JoinError) -> String {
    if !join_error.is_panic() {
        warn!("handler task was cancelled before completing");
        return "handler task was cancelled".to_string();
    }
    panic_message(join_error.into_panic().as_ref())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

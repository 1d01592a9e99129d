// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shakespeare Quote Server Implementation
//!
//! This crate provides the HTTP server for the Shakespeare quote service, a
//! small demo service for request/response conventions, health checks and
//! failure-injection testing. It is built with Axum and supports hierarchical
//! configuration, request middleware and graceful shutdown.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Server lifecycle errors and the handler failure taxonomy
//! - [`extractors`]: Quote body extraction with debug-level diagnostics
//! - [`handler`]: The uniform request wrapper every route is registered through
//! - [`metrics`]: Prometheus request and mutation metrics
//! - [`routes`]: Route table and business handlers
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`state`]: Shared application state (stores, identity, terminator)
//! - [`terminator`]: Process termination seam used by `/crash`
//!
//! # Response Envelope
//!
//! Every endpoint except `/metrics` answers with a JSON status envelope that
//! always carries `ok`, `hostname`, `time` and `version`. Failures add `error`
//! and, for client errors, a `status_code`. A client-supplied
//! `x-shakespeare-session` header is echoed back on every response.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handler;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;
pub mod terminator;

pub use config::{CrashConfig, Environment, ServerConfig};
pub use error::{ServerError, ServerResult, ServiceError, ServiceResult};
pub use handler::{AUTHENTICATED_AS_HEADER, HandlerRequest, SESSION_HEADER, standard_handler};
pub use server::{Server, ShutdownConfig};
pub use shared_types::{ServiceIdentity, StatusEnvelope};
pub use state::ServerState;
pub use terminator::{ProcessTerminator, Terminator};

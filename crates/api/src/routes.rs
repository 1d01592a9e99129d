// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides the route table of the Shakespeare server. Every
//! endpoint, including the not-found and method-not-allowed fallbacks, is
//! registered through [`standard_handler`] so it answers with a status
//! envelope.

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    crash, health, method_not_allowed, new_quote, not_found, qd_statement, shakespeare_iambs,
    shakespeare_play, shakespeare_spaketh, specific_quote, specific_shakespeare, statement,
};
use tracing::warn;

use crate::{
    config::CrashConfig, handler::standard_handler, metrics::metrics_handler, state::ServerState,
};

/// Create application routes
///
/// `/crash` is only registered when enabled in `crash`.
pub fn create_routes(crash_config: &CrashConfig) -> Router<ServerState> {
    let mut routes = Router::new()
        .route("/health", get(standard_handler("health", health)))
        .route("/", get(standard_handler("statement", statement)))
        .route(
            "/quote/{id}",
            get(standard_handler("specific_quote", specific_quote))
                .put(standard_handler("specific_quote", specific_quote)),
        )
        .route("/quote", post(standard_handler("new_quote", new_quote)))
        .route(
            "/shakespeare/",
            get(standard_handler("qd_statement", qd_statement)),
        )
        .route(
            "/shakespeare/{idx}",
            get(standard_handler("specific_shakespeare", specific_shakespeare))
                .put(standard_handler("specific_shakespeare", specific_shakespeare)),
        )
        .route(
            "/shakespeare/{idx}/spaketh",
            get(standard_handler("shakespeare_spaketh", shakespeare_spaketh)),
        )
        .route(
            "/shakespeare/{idx}/play",
            get(standard_handler("shakespeare_play", shakespeare_play)),
        )
        .route(
            "/shakespeare/{idx}/iambs",
            get(standard_handler("shakespeare_iambs", shakespeare_iambs)),
        );

    if crash_config.enabled {
        warn!("/crash endpoint enabled, any client can terminate this process");
        routes = routes.route("/crash", get(standard_handler("crash", crash)));
    }

    // Operational endpoint, not part of the envelope surface
    let metrics_routes = Router::new().route("/metrics", get(metrics_handler));

    routes
        .merge(metrics_routes)
        .method_not_allowed_fallback(standard_handler(
            "method_not_allowed",
            method_not_allowed,
        ))
        .fallback(standard_handler("not_found", not_found))
}

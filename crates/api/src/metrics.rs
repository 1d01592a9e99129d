// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Prometheus metrics module
//!
//! Provides global metrics using the default Prometheus registry via macros and
//! an Axum-compatible metrics handler.

use std::sync::LazyLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::{
    Encoder, HistogramVec, IntCounterVec, TextEncoder, register_histogram_vec,
    register_int_counter_vec,
};
use tracing::error;

/// Total number of requests served, labeled by handler and response status.
pub static REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "shakespeare_requests_total",
        "Total number of requests, labeled by handler and status",
        &["handler", "status"]
    )
    .expect("Failed to create shakespeare_requests_total counter vec")
});

/// Histogram for handler durations in seconds.
pub static REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "shakespeare_request_duration_seconds",
        "Handler durations in seconds",
        &["handler"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to create request duration histogram")
});

/// Quote store writes, labeled by store and operation.
pub static QUOTE_MUTATIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "shakespeare_quote_mutations_total",
        "Total number of quote store writes",
        &["store", "operation"]
    )
    .expect("Failed to create quote mutations counter vec")
});

/// Record a finished request
///
/// # Arguments
/// * `handler` - Name of the handler that served the request
/// * `status` - HTTP status of the response
/// * `duration_secs` - Time spent in the handler in seconds
pub fn observe_request(handler: &str, status: StatusCode, duration_secs: f64) {
    REQUESTS
        .with_label_values(&[handler, status.as_str()])
        .inc();
    REQUEST_DURATION
        .with_label_values(&[handler])
        .observe(duration_secs);
}

/// Record a write to one of the quote stores
///
/// # Arguments
/// * `store` - `quotes` or `shakespeare`
/// * `operation` - `append` or `replace`
pub fn record_quote_mutation(store: &str, operation: &str) {
    QUOTE_MUTATIONS
        .with_label_values(&[store, operation])
        .inc();
}

/// Axum handler that exports metrics in Prometheus text format
pub async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!(error = %e, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    match String::from_utf8(buffer) {
        Ok(body) => (
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "metrics buffer is not valid UTF-8");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_counter_is_labeled_by_status() {
        let before = REQUESTS
            .with_label_values(&["metrics_test", "404"])
            .get();

        observe_request("metrics_test", StatusCode::NOT_FOUND, 0.002);

        assert_eq!(
            REQUESTS.with_label_values(&["metrics_test", "404"]).get(),
            before + 1
        );
        assert_eq!(
            REQUEST_DURATION
                .with_label_values(&["metrics_test"])
                .get_sample_count(),
            1
        );
    }

    #[tokio::test]
    async fn exported_text_contains_recorded_series() {
        record_quote_mutation("quotes", "append");

        let response = metrics_handler().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("shakespeare_quote_mutations_total"));
    }
}

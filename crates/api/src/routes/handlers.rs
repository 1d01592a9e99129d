// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! Business handlers for the Shakespeare endpoints. Each one builds a
//! [`StatusEnvelope`] from the server state and returns failures as
//! [`ServiceError`]s; the wrapper in [`crate::handler`] turns those into
//! responses.

use anyhow::anyhow;
use axum::http::Method;
use quote_store::AnnotatedEntry;
use shared_types::StatusEnvelope;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    error::{ServiceError, ServiceResult},
    extractors::QuoteBody,
    handler::HandlerRequest,
    metrics::record_quote_mutation,
    state::ServerState,
};

/// Message returned by the health check
pub const HEALTH_MESSAGE: &str = "shakespeare health check OK";

/// `GET /health`
pub async fn health(
    state: ServerState,
    _request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    Ok(StatusEnvelope::success(state.identity()).with("msg", HEALTH_MESSAGE))
}

/// `GET /`: a random quote from the flat store
pub async fn statement(
    state: ServerState,
    _request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let (_, quote) = state.quotes().pick_random().await;
    Ok(StatusEnvelope::success(state.identity()).with("quote", quote))
}

/// `GET|PUT /quote/{id}`
///
/// The index is range checked before a PUT body is looked at.
pub async fn specific_quote(
    state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let index = request.index_param("id")?;
    let current = state.quotes().get(index).await?;

    let quote = if request.method() == Method::PUT {
        let QuoteBody { quote } = QuoteBody::extract(&request)?;
        let stored = state.quotes().set(index, quote).await?;
        record_quote_mutation("quotes", "replace");
        stored
    } else {
        current
    };

    Ok(StatusEnvelope::success(state.identity()).with("quote", quote))
}

/// `POST /quote`: append a quote to the flat store
pub async fn new_quote(
    state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let QuoteBody { quote } = QuoteBody::extract(&request)?;
    let (index, quote) = state.quotes().append(quote).await;
    record_quote_mutation("quotes", "append");
    info!(quoteid = index, "new quote added");

    Ok(StatusEnvelope::success(state.identity())
        .with("quote", quote)
        .with("quoteid", index))
}

/// `GET /shakespeare/`: a random annotated quote
pub async fn qd_statement(
    state: ServerState,
    _request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let (index, entry) = state.shakespeare().pick_random().await;
    Ok(StatusEnvelope::success(state.identity())
        .with("idx", index)
        .with("quote", entry.quote()))
}

/// `GET|PUT /shakespeare/{idx}`
///
/// A PUT stores the body's `quote` string as the whole slot, dropping the
/// slot's play, verse, speaker and meter.
pub async fn specific_shakespeare(
    state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let index = request.index_param("idx")?;
    state.shakespeare().check_index(index).await?;

    let entry = if request.method() == Method::PUT {
        let QuoteBody { quote } = QuoteBody::extract(&request)?;
        let stored = state
            .shakespeare()
            .replace(index, AnnotatedEntry::Bare(quote))
            .await?;
        record_quote_mutation("shakespeare", "replace");
        stored
    } else {
        state.shakespeare().get(index).await?
    };

    Ok(StatusEnvelope::success(state.identity())
        .with("idx", index)
        .with("quote", entry.quote()))
}

/// `GET /shakespeare/{idx}/spaketh`
pub async fn shakespeare_spaketh(
    state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let index = request.index_param("idx")?;
    let speaker = state.shakespeare().speaker(index).await?;

    Ok(StatusEnvelope::success(state.identity())
        .with("idx", index)
        .with("quote", speaker.quote)
        .with("spaketh", speaker.spaketh))
}

/// `GET /shakespeare/{idx}/play`
pub async fn shakespeare_play(
    state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let index = request.index_param("idx")?;
    let play = state.shakespeare().play_and_verse(index).await?;

    Ok(StatusEnvelope::success(state.identity())
        .with("idx", index)
        .with("quote", play.quote)
        .with("play", play.play)
        .with("verse", play.verse))
}

/// `GET /shakespeare/{idx}/iambs`
pub async fn shakespeare_iambs(
    state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    let index = request.index_param("idx")?;
    let meter = state.shakespeare().meter(index).await?;

    Ok(StatusEnvelope::success(state.identity())
        .with("idx", index)
        .with("quote", meter.quote)
        .with("iambs", meter.iambs))
}

/// `GET /crash`: terminate the process
///
/// Waits, asks for graceful termination, waits again and then forces the
/// process down. Only returns if forced termination did not end the process.
pub async fn crash(state: ServerState, request: HandlerRequest) -> ServiceResult<StatusEnvelope> {
    let crash = &state.config().crash;
    let terminate_delay = crash.terminate_delay_ms.value();
    let kill_delay = crash.kill_delay_ms.value();

    warn!(
        path = request.path(),
        ?terminate_delay,
        ?kill_delay,
        "crash requested, dying in {terminate_delay:?}"
    );
    sleep(terminate_delay).await;
    state.terminator().terminate();

    sleep(kill_delay).await;
    state.terminator().kill();

    Err(anyhow!("process survived forced termination").into())
}

/// Fallback for requests that match no route
pub async fn not_found(
    _state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    Err(ServiceError::NotFound {
        method: request.method().clone(),
        path: request.path().to_string(),
    })
}

/// Fallback for known paths requested with an unsupported method
pub async fn method_not_allowed(
    _state: ServerState,
    request: HandlerRequest,
) -> ServiceResult<StatusEnvelope> {
    Err(ServiceError::MethodNotAllowed {
        method: request.method().clone(),
        path: request.path().to_string(),
    })
}

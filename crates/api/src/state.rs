// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the Shakespeare server:
//! configuration, process identity, both quote stores, the process terminator
//! and the token used for coordinated cancellation.

use std::sync::Arc;

use quote_store::{AnnotatedQuoteStore, QuoteStore};
use shared_types::ServiceIdentity;
use tokio_util::sync::CancellationToken;

use crate::{config::ServerConfig, terminator::Terminator};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Identity stamped into every envelope
    identity: Arc<ServiceIdentity>,
    /// Flat quote collection
    quotes: Arc<QuoteStore>,
    /// Annotated quote collection
    shakespeare: Arc<AnnotatedQuoteStore>,
    /// Process terminator used by `/crash`
    terminator: Arc<dyn Terminator>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state with freshly seeded stores
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `terminator` - Process terminator used by `/crash`
    /// * `cancellation_token` - Token for coordinated cancellation
    pub fn new(
        config: ServerConfig,
        terminator: Arc<dyn Terminator>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self::with_stores(
            config,
            Arc::new(QuoteStore::seeded()),
            Arc::new(AnnotatedQuoteStore::seeded()),
            terminator,
            cancellation_token,
        )
    }

    /// Create server state around existing stores
    pub fn with_stores(
        config: ServerConfig,
        quotes: Arc<QuoteStore>,
        shakespeare: Arc<AnnotatedQuoteStore>,
        terminator: Arc<dyn Terminator>,
        cancellation_token: CancellationToken,
    ) -> Self {
        let identity = Arc::new(config.identity());
        Self {
            config,
            identity,
            quotes,
            shakespeare,
            terminator,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Hostname and version of this process
    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// Flat quote store
    pub fn quotes(&self) -> &QuoteStore {
        &self.quotes
    }

    /// Annotated quote store
    pub fn shakespeare(&self) -> &AnnotatedQuoteStore {
        &self.shakespeare
    }

    /// Process terminator
    pub fn terminator(&self) -> &dyn Terminator {
        self.terminator.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminator::MockTerminator;

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let state = ServerState::new(
            ServerConfig::for_testing(),
            Arc::new(MockTerminator::new()),
            token.clone(),
        );

        assert!(!state.cancellation_token.is_cancelled());

        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[tokio::test]
    async fn clones_share_stores() {
        let state = ServerState::new(
            ServerConfig::for_testing(),
            Arc::new(MockTerminator::new()),
            CancellationToken::new(),
        );
        let clone = state.clone();

        let (index, _) = clone.quotes().append("Once more unto the breach".to_string()).await;

        assert_eq!(
            state.quotes().get(i64::try_from(index).unwrap()).await.unwrap(),
            "Once more unto the breach"
        );
        assert_eq!(state.identity().hostname(), Some("shakespeare-test"));
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Test fixtures for driving a live Shakespeare server
//!
//! Each [`TestServer`] owns fresh quote stores, so tests can mutate them
//! without affecting each other.

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use serde_json::Value;
use shakespeare::{Server, ServerConfig, ShutdownConfig, Terminator};
use tokio_util::sync::CancellationToken;

/// Terminator that only counts how often it was asked to end the process
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    terminations: AtomicUsize,
    kills: AtomicUsize,
}

impl RecordingTerminator {
    /// Number of graceful termination requests
    pub fn terminations(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }

    /// Number of forced termination requests
    pub fn kills(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self) {
        self.terminations.fetch_add(1, Ordering::SeqCst);
    }

    fn kill(&self) {
        self.kills.fetch_add(1, Ordering::SeqCst);
    }
}

/// A server bound to an ephemeral local port
#[derive(Debug)]
pub struct TestServer {
    /// Bound address
    pub addr: SocketAddr,
    /// HTTP client for the server
    pub client: reqwest::Client,
    /// Terminator handed to the server
    pub terminator: Arc<RecordingTerminator>,
    token: CancellationToken,
}

impl TestServer {
    /// Start a server with the testing configuration
    pub async fn start() -> Self {
        Self::start_with(ServerConfig::for_testing()).await
    }

    /// Start a server with the given configuration
    pub async fn start_with(config: ServerConfig) -> Self {
        let terminator = Arc::new(RecordingTerminator::default());
        let (addr, token) = Server::with_terminator(
            config,
            ShutdownConfig::default(),
            CancellationToken::new(),
            terminator.clone(),
        )
        .expect("Failed to create server")
        .run_for_testing()
        .await
        .expect("Failed to start test server");

        Self {
            addr,
            client: reqwest::Client::new(),
            terminator,
            token,
        }
    }

    /// Absolute URL for `path`
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Read a response body as JSON
pub async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.expect("Failed to parse response body")
}

// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Process termination seam
//!
//! The `/crash` endpoint never touches the process directly. It goes through a
//! [`Terminator`] held in the server state, so tests can substitute a mock.

use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{error, warn};

/// Exit status used for forced termination (128 + SIGKILL)
pub const FORCED_EXIT_CODE: i32 = 137;

/// Ends the running process
#[cfg_attr(test, mockall::automock)]
pub trait Terminator: Send + Sync + fmt::Debug {
    /// Ask the process to shut down gracefully
    fn terminate(&self);

    /// End the process immediately
    ///
    /// Implementations backed by a real process do not return.
    fn kill(&self);
}

/// Terminator for the running server process
///
/// Graceful termination cancels the server's shutdown token, which stops
/// accepting connections and drains in-flight requests. Forced termination
/// exits the process.
#[derive(Debug, Clone)]
pub struct ProcessTerminator {
    shutdown_token: CancellationToken,
}

impl ProcessTerminator {
    /// Create a terminator bound to the server's shutdown token
    pub fn new(shutdown_token: CancellationToken) -> Self {
        Self { shutdown_token }
    }
}

impl Terminator for ProcessTerminator {
    fn terminate(&self) {
        warn!("graceful termination requested, cancelling server");
        self.shutdown_token.cancel();
    }

    fn kill(&self) {
        error!(
            exit_code = FORCED_EXIT_CODE,
            "process still alive after graceful termination, exiting"
        );
        std::process::exit(FORCED_EXIT_CODE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminate_cancels_shutdown_token() {
        let token = CancellationToken::new();
        let terminator = ProcessTerminator::new(token.clone());

        assert!(!token.is_cancelled());
        terminator.terminate();
        assert!(token.is_cancelled());
    }
}

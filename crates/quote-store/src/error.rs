// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for quote store operations

use thiserror::Error;

/// Result type alias for quote store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the quote stores
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Index is negative or not below the current length
    #[error("no quote ID {index}")]
    OutOfRange {
        /// Index as supplied by the caller
        index: i64,
    },

    /// A store cannot be built without any quotes
    #[error("quote store requires at least one quote")]
    Empty,

    /// Slot no longer carries the requested annotation
    #[error("quote ID {index} has no '{field}' annotation")]
    MissingField {
        /// Index of the slot
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },
}

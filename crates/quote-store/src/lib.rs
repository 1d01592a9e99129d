// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory quote collections
//!
//! This crate provides the two quote collections served by the Shakespeare
//! quote service. Both are process-local, start from built-in seed data and
//! are lost on restart.
//!
//! # Collections
//!
//! - [`QuoteStore`]: a flat list of quote strings supporting random pick,
//!   indexed get and set, and append
//! - [`AnnotatedQuoteStore`]: quote records carrying play, verse, speaker and
//!   meter annotations, supporting random pick, indexed get, whole-slot
//!   replacement and field projections
//!
//! # Concurrency
//!
//! Each store guards its sequence with a `tokio::sync::RwLock`. Reads share the
//! lock; every mutation takes it exclusively and re-validates the index while
//! holding it, so concurrent writers can neither lose updates nor race an index
//! check. Neither store supports deletion, so a store built from non-empty seed
//! data can never become empty.

pub mod annotated;
pub mod error;
pub mod flat;
pub mod seed;

pub use annotated::{
    AnnotatedEntry, AnnotatedQuote, AnnotatedQuoteStore, Meter, PlayAndVerse, Speaker,
};
pub use error::{StoreError, StoreResult};
pub use flat::QuoteStore;

/// Resolve a client-supplied index against the current length
pub(crate) fn resolve_index(index: i64, len: usize) -> StoreResult<usize> {
    usize::try_from(index)
        .ok()
        .filter(|&position| position < len)
        .ok_or(StoreError::OutOfRange { index })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_index_bounds() {
        assert_eq!(resolve_index(0, 3).unwrap(), 0);
        assert_eq!(resolve_index(2, 3).unwrap(), 2);
        assert!(matches!(
            resolve_index(3, 3),
            Err(StoreError::OutOfRange { index: 3 })
        ));
        assert!(matches!(
            resolve_index(-1, 3),
            Err(StoreError::OutOfRange { index: -1 })
        ));
        assert!(resolve_index(0, 0).is_err());
    }
}

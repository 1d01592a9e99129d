// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Flat collection of quote strings

use rand::Rng;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    error::{StoreError, StoreResult},
    resolve_index, seed,
};

/// Ordered, growable list of quote strings
#[derive(Debug)]
pub struct QuoteStore {
    quotes: RwLock<Vec<String>>,
}

impl QuoteStore {
    /// Create a store from the given quotes
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Empty`] if `quotes` is empty.
    pub fn new(quotes: Vec<String>) -> StoreResult<Self> {
        if quotes.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(Self {
            quotes: RwLock::new(quotes),
        })
    }

    /// Create a store holding the built-in seed quotes
    pub fn seeded() -> Self {
        Self {
            quotes: RwLock::new(seed::quotes()),
        }
    }

    /// Number of quotes currently stored
    pub async fn len(&self) -> usize {
        self.quotes.read().await.len()
    }

    /// Whether the store holds no quotes
    pub async fn is_empty(&self) -> bool {
        self.quotes.read().await.is_empty()
    }

    /// Pick a uniformly random quote, returning its index and text
    pub async fn pick_random(&self) -> (usize, String) {
        let quotes = self.quotes.read().await;
        let index = rand::thread_rng().gen_range(0..quotes.len());
        (index, quotes[index].clone())
    }

    /// Pick a random quote using the supplied random source
    pub async fn pick_random_with<R: Rng + Send>(&self, rng: &mut R) -> (usize, String) {
        let quotes = self.quotes.read().await;
        let index = rng.gen_range(0..quotes.len());
        (index, quotes[index].clone())
    }

    /// Quote at `index`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] if `index` is negative or past the end.
    pub async fn get(&self, index: i64) -> StoreResult<String> {
        let quotes = self.quotes.read().await;
        let position = resolve_index(index, quotes.len())?;
        Ok(quotes[position].clone())
    }

    /// Replace the quote at `index`, returning the stored text
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] if `index` is negative or past the end.
    pub async fn set(&self, index: i64, quote: String) -> StoreResult<String> {
        let mut quotes = self.quotes.write().await;
        let position = resolve_index(index, quotes.len())?;
        quotes[position].clone_from(&quote);
        debug!(index = position, "replaced quote");
        Ok(quote)
    }

    /// Append a quote, returning its new index and text
    pub async fn append(&self, quote: String) -> (usize, String) {
        let mut quotes = self.quotes.write().await;
        let index = quotes.len();
        quotes.push(quote.clone());
        debug!(index, "appended quote");
        (index, quote)
    }
}

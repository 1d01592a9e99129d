// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Annotated Shakespeare quotes
//!
//! Each slot normally holds an [`AnnotatedQuote`] with its play, verse,
//! speaker and a stress-annotated rendition. A slot can also hold a bare quote
//! string: replacing a slot stores exactly the value the caller supplied and
//! does not merge it with the previous annotations.

use rand::Rng;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::{
    error::{StoreError, StoreResult},
    resolve_index, seed,
};

/// A quote with its provenance and meter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedQuote {
    /// Quote text
    pub quote: String,
    /// Play the quote comes from
    pub play: String,
    /// Act and scene locator
    pub verse: String,
    /// Character who speaks the line
    pub spaketh: String,
    /// Stress-annotated rendition of the line
    pub iambs: String,
}

/// Content of one slot of the annotated store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnnotatedEntry {
    /// Full record with annotations
    Record(AnnotatedQuote),
    /// Quote text without annotations
    Bare(String),
}

impl AnnotatedEntry {
    /// Quote text of the slot
    pub fn quote(&self) -> &str {
        match self {
            Self::Record(record) => &record.quote,
            Self::Bare(quote) => quote,
        }
    }

    /// Full record, if the slot still has its annotations
    pub fn record(&self) -> Option<&AnnotatedQuote> {
        match self {
            Self::Record(record) => Some(record),
            Self::Bare(_) => None,
        }
    }
}

impl From<AnnotatedQuote> for AnnotatedEntry {
    fn from(record: AnnotatedQuote) -> Self {
        Self::Record(record)
    }
}

/// Quote with its speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    /// Quote text
    pub quote: String,
    /// Character who speaks the line
    pub spaketh: String,
}

/// Quote with its play and verse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayAndVerse {
    /// Quote text
    pub quote: String,
    /// Play the quote comes from
    pub play: String,
    /// Act and scene locator
    pub verse: String,
}

/// Quote with its meter annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meter {
    /// Quote text
    pub quote: String,
    /// Stress-annotated rendition of the line
    pub iambs: String,
}

/// Ordered list of annotated quote slots
#[derive(Debug)]
pub struct AnnotatedQuoteStore {
    entries: RwLock<Vec<AnnotatedEntry>>,
}

impl AnnotatedQuoteStore {
    /// Create a store from the given records
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Empty`] if `records` is empty.
    pub fn new(records: Vec<AnnotatedQuote>) -> StoreResult<Self> {
        if records.is_empty() {
            return Err(StoreError::Empty);
        }
        Ok(Self::from_records(records))
    }

    /// Create a store holding the built-in seed records
    pub fn seeded() -> Self {
        Self::from_records(seed::annotated_quotes())
    }

    fn from_records(records: Vec<AnnotatedQuote>) -> Self {
        Self {
            entries: RwLock::new(records.into_iter().map(AnnotatedEntry::from).collect()),
        }
    }

    /// Number of slots
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no slots
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Pick a uniformly random slot, returning its index and content
    pub async fn pick_random(&self) -> (usize, AnnotatedEntry) {
        let entries = self.entries.read().await;
        let index = rand::thread_rng().gen_range(0..entries.len());
        (index, entries[index].clone())
    }

    /// Pick a random slot using the supplied random source
    pub async fn pick_random_with<R: Rng + Send>(&self, rng: &mut R) -> (usize, AnnotatedEntry) {
        let entries = self.entries.read().await;
        let index = rng.gen_range(0..entries.len());
        (index, entries[index].clone())
    }

    /// Validate `index` without reading the slot
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] if `index` is negative or past the end.
    pub async fn check_index(&self, index: i64) -> StoreResult<usize> {
        resolve_index(index, self.entries.read().await.len())
    }

    /// Content of the slot at `index`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] if `index` is negative or past the end.
    pub async fn get(&self, index: i64) -> StoreResult<AnnotatedEntry> {
        let entries = self.entries.read().await;
        let position = resolve_index(index, entries.len())?;
        Ok(entries[position].clone())
    }

    /// Overwrite the whole slot at `index`, returning the stored content
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] if `index` is negative or past the end.
    pub async fn replace(&self, index: i64, entry: AnnotatedEntry) -> StoreResult<AnnotatedEntry> {
        let mut entries = self.entries.write().await;
        let position = resolve_index(index, entries.len())?;
        if matches!(entry, AnnotatedEntry::Bare(_)) {
            warn!(
                index = position,
                "annotated quote replaced by bare text, play/verse/speaker/meter discarded"
            );
        } else {
            debug!(index = position, "annotated quote replaced");
        }
        entries[position] = entry.clone();
        Ok(entry)
    }

    /// Quote and speaker of the slot at `index`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] on a bad index, or
    /// [`StoreError::MissingField`] if the slot lost its annotations.
    pub async fn speaker(&self, index: i64) -> StoreResult<Speaker> {
        let (position, entry) = self.annotated(index).await?;
        let record = Self::require(position, &entry, "spaketh")?;
        Ok(Speaker {
            quote: record.quote.clone(),
            spaketh: record.spaketh.clone(),
        })
    }

    /// Quote, play and verse of the slot at `index`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] on a bad index, or
    /// [`StoreError::MissingField`] if the slot lost its annotations.
    pub async fn play_and_verse(&self, index: i64) -> StoreResult<PlayAndVerse> {
        let (position, entry) = self.annotated(index).await?;
        let record = Self::require(position, &entry, "play")?;
        Ok(PlayAndVerse {
            quote: record.quote.clone(),
            play: record.play.clone(),
            verse: record.verse.clone(),
        })
    }

    /// Quote and meter annotation of the slot at `index`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] on a bad index, or
    /// [`StoreError::MissingField`] if the slot lost its annotations.
    pub async fn meter(&self, index: i64) -> StoreResult<Meter> {
        let (position, entry) = self.annotated(index).await?;
        let record = Self::require(position, &entry, "iambs")?;
        Ok(Meter {
            quote: record.quote.clone(),
            iambs: record.iambs.clone(),
        })
    }

    async fn annotated(&self, index: i64) -> StoreResult<(usize, AnnotatedEntry)> {
        let entries = self.entries.read().await;
        let position = resolve_index(index, entries.len())?;
        Ok((position, entries[position].clone()))
    }

    fn require<'a>(
        position: usize,
        entry: &'a AnnotatedEntry,
        field: &'static str,
    ) -> StoreResult<&'a AnnotatedQuote> {
        entry.record().ok_or(StoreError::MissingField {
            index: position,
            field,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;
    use tokio_test::assert_err;

    use super::*;

    #[tokio::test]
    async fn get_returns_seed_record() {
        let store = AnnotatedQuoteStore::seeded();
        let entry = store.get(1).await.unwrap();

        assert_eq!(entry.quote(), "To be, or not to be: that is the question");
        assert_eq!(entry.record().unwrap().spaketh, "Prince Hamlet");
    }

    #[tokio::test]
    async fn projections_return_subsets() {
        let store = AnnotatedQuoteStore::seeded();

        let speaker = store.speaker(8).await.unwrap();
        assert_eq!(speaker.spaketh, "Three Witches");

        let play = store.play_and_verse(7).await.unwrap();
        assert_eq!(play.play, "Twelfth Night");
        assert_eq!(play.verse, "Act I, Scene I");

        let meter = store.meter(1).await.unwrap();
        assert_eq!(meter.iambs, "to BE - or NOT - to BE - that IS - the QUESTION");
    }

    #[tokio::test]
    async fn out_of_range_is_reported_for_every_operation() {
        let store = AnnotatedQuoteStore::seeded();

        assert_eq!(
            assert_err!(store.get(999).await),
            StoreError::OutOfRange { index: 999 }
        );
        assert_eq!(
            assert_err!(store.check_index(10).await),
            StoreError::OutOfRange { index: 10 }
        );
        assert_eq!(
            assert_err!(store.speaker(-1).await),
            StoreError::OutOfRange { index: -1 }
        );
        assert_eq!(
            assert_err!(store.play_and_verse(10).await),
            StoreError::OutOfRange { index: 10 }
        );
        assert_eq!(
            assert_err!(store.meter(42).await),
            StoreError::OutOfRange { index: 42 }
        );
        assert_eq!(
            assert_err!(
                store
                    .replace(10, AnnotatedEntry::Bare("x".to_string()))
                    .await
            ),
            StoreError::OutOfRange { index: 10 }
        );
    }

    #[tokio::test]
    async fn bare_replacement_discards_annotations() {
        let store = AnnotatedQuoteStore::seeded();

        store
            .replace(3, AnnotatedEntry::Bare("Wherefore art thou".to_string()))
            .await
            .unwrap();

        let entry = store.get(3).await.unwrap();
        assert_eq!(entry, AnnotatedEntry::Bare("Wherefore art thou".to_string()));
        assert_eq!(entry.quote(), "Wherefore art thou");
        assert_eq!(
            store.speaker(3).await.unwrap_err(),
            StoreError::MissingField {
                index: 3,
                field: "spaketh"
            }
        );
        assert!(store.meter(4).await.is_ok());
    }

    #[tokio::test]
    async fn record_replacement_round_trips() {
        let store = AnnotatedQuoteStore::seeded();
        let record = AnnotatedQuote {
            quote: "Now is the winter of our discontent".to_string(),
            play: "Richard III".to_string(),
            verse: "Act I, Scene I".to_string(),
            spaketh: "Richard".to_string(),
            iambs: "now IS - the WIN - ter OF - our DIS - con TENT".to_string(),
        };

        store
            .replace(0, AnnotatedEntry::from(record.clone()))
            .await
            .unwrap();

        assert_eq!(store.get(0).await.unwrap().record(), Some(&record));
        assert_eq!(store.speaker(0).await.unwrap().spaketh, "Richard");
    }

    #[tokio::test]
    async fn random_pick_stays_in_range() {
        let store = AnnotatedQuoteStore::seeded();
        let len = store.len().await;
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let (index, entry) = store.pick_random_with(&mut rng).await;
            assert!(index < len);
            assert_eq!(entry, store.get(i64::try_from(index).unwrap()).await.unwrap());
        }
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn concurrent_replacements_are_never_torn() {
        let store = Arc::new(AnnotatedQuoteStore::seeded());
        let len = store.len().await;

        let writers: Vec<_> = (0..32_i64)
            .map(|n| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let index = n % 4 + 1;
                    let entry = AnnotatedEntry::Bare(format!("rewrite {n}"));
                    store.replace(index, entry.clone()).await.unwrap();
                    store.get(index).await.unwrap()
                })
            })
            .collect();

        for writer in writers {
            let entry = writer.await.unwrap();
            assert!(entry.quote().starts_with("rewrite "));
            assert!(entry.record().is_none());
        }

        for index in 1..=4 {
            let entry = store.get(index).await.unwrap();
            assert!(
                matches!(entry, AnnotatedEntry::Bare(ref quote) if quote.starts_with("rewrite "))
            );
        }
        assert_eq!(store.len().await, len);
        assert!(store.speaker(5).await.is_ok());
    }

    #[test]
    fn entries_serialize_untagged() {
        let bare = AnnotatedEntry::Bare("bare".to_string());
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!("bare"));

        let record = AnnotatedEntry::from(seed::annotated_quotes().remove(0));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "quote": "quote",
                "play": "play",
                "verse": "verse",
                "spaketh": "spaketh",
                "iambs": "iambs"
            })
        );
    }

    #[test]
    fn empty_store_is_rejected() {
        assert_eq!(
            AnnotatedQuoteStore::new(Vec::new()).unwrap_err(),
            StoreError::Empty
        );
    }
}

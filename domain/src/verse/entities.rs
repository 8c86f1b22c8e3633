//! Verse corpus entities

use super::window::window_bounds;
use serde::{Deserialize, Serialize};

/// One indivisible unit of source text (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    position: usize,
    text: String,
}

impl VerseRecord {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The ordered verse corpus.
///
/// Positions are dense and equal to the record's index; the ordering is
/// fixed at construction and never changes.
#[derive(Debug, Clone, Default)]
pub struct VerseStore {
    verses: Vec<VerseRecord>,
}

impl VerseStore {
    /// Build a store from verse texts in corpus order.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let verses = texts
            .into_iter()
            .enumerate()
            .map(|(position, text)| VerseRecord {
                position,
                text: text.into(),
            })
            .collect();
        Self { verses }
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&VerseRecord> {
        self.verses.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerseRecord> {
        self.verses.iter()
    }

    /// Texts of the verses in `[start, end)`, clipped to the store.
    pub fn slice_texts(&self, start: usize, end: usize) -> Vec<String> {
        let end = end.min(self.verses.len());
        let start = start.min(end);
        self.verses[start..end]
            .iter()
            .map(|v| v.text.clone())
            .collect()
    }

    /// Texts of the expansion window around `position`.
    ///
    /// See [`window_bounds`] for the exact boundary arithmetic.
    pub fn window(&self, position: usize, radius: usize) -> Vec<String> {
        let range = window_bounds(position, radius, self.verses.len());
        self.slice_texts(range.start, range.end)
    }
}

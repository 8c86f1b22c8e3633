//! Verse table loading.
//!
//! The corpus is a CSV file with one verse per row; the row index is the
//! verse position the similarity index refers to.

mod csv_loader;

pub use csv_loader::{CorpusError, CsvVerseLoader};

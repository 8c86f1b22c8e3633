//! CSV verse table loader.

use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use verse_rag_domain::VerseStore;

/// Errors raised while loading the verse table
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Cannot open verse table {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed verse table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
}

/// Loads a [`VerseStore`] from a CSV table by header name.
#[derive(Debug, Clone)]
pub struct CsvVerseLoader {
    text_column: String,
}

impl CsvVerseLoader {
    pub fn new(text_column: impl Into<String>) -> Self {
        Self {
            text_column: text_column.into(),
        }
    }

    pub fn text_column(&self) -> &str {
        &self.text_column
    }

    /// Load the table at `path`.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<VerseStore, CorpusError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CorpusError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = self.load_reader(file)?;
        info!("Loaded {} verses from {}", store.len(), path.display());
        Ok(store)
    }

    /// Load a table from any reader. Rows shorter than the header yield an
    /// empty verse so positions stay aligned with row indices.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<VerseStore, CorpusError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let column = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}').trim() == self.text_column)
            .ok_or_else(|| CorpusError::MissingColumn {
                column: self.text_column.clone(),
                available: headers.iter().map(str::to_string).collect(),
            })?;
        debug!("Verse text column '{}' at index {}", self.text_column, column);

        let mut texts = Vec::new();
        for record in reader.records() {
            let record = record?;
            texts.push(record.get(column).unwrap_or_default().to_string());
        }

        Ok(VerseStore::from_texts(texts))
    }
}

impl Default for CsvVerseLoader {
    fn default() -> Self {
        Self::new("Ayat")
    }
}

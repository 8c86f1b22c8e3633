//! Similarity index adapters.

mod http_index;

pub use http_index::HttpSimilarityIndex;

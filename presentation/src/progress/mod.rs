//! Progress indication while waiting on the index and the model

pub mod reporter;

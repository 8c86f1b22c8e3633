//! Application-level parameters.
//!
//! - [`RetrievalParams`]: how many hits to fetch and how far to expand them
//! - [`SessionParams`]: model, history budget and initial system prompt

pub mod retrieval_params;
pub mod session_params;

pub use retrieval_params::RetrievalParams;
pub use session_params::SessionParams;

//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording retrieval and
//! completion events to a machine-readable transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures what was retrieved
//! and what the model answered.

use serde_json::Value;

/// A structured conversation event for logging.
pub struct ConversationEvent {
    /// Event type identifier.
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub const RETRIEVAL: &'static str = "retrieval";
    pub const RETRIEVAL_FAILED: &'static str = "retrieval_failed";
    pub const COMPLETION: &'static str = "completion";

    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; implementations swallow their own
/// write failures so the chat keeps going.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

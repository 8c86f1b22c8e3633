//! Bounded conversation history

use super::entities::Message;
use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Chronological user/assistant turns, bounded to the latest exchanges.
///
/// Turns are appended freely; [`enforce_limit`] drops the oldest entries
/// until at most `2 * max_exchanges` remain. The cut is a plain suffix
/// of the log and does not respect exchange boundaries.
///
/// [`enforce_limit`]: BoundedHistory::enforce_limit
#[derive(Debug, Clone)]
pub struct BoundedHistory {
    turns: VecDeque<Message>,
    max_exchanges: NonZeroUsize,
}

impl BoundedHistory {
    pub fn new(max_exchanges: NonZeroUsize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_exchanges.get() * 2 + 1),
            max_exchanges,
        }
    }

    pub fn max_exchanges(&self) -> NonZeroUsize {
        self.max_exchanges
    }

    /// Maximum number of turns kept after [`enforce_limit`](Self::enforce_limit).
    pub fn turn_limit(&self) -> usize {
        self.max_exchanges.get().saturating_mul(2)
    }

    pub fn push(&mut self, message: Message) {
        self.turns.push_back(message);
    }

    /// Drop the oldest turns beyond the limit. Returns how many were dropped.
    pub fn enforce_limit(&mut self) -> usize {
        let limit = self.turn_limit();
        let excess = self.turns.len().saturating_sub(limit);
        self.turns.drain(..excess);
        excess
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.turns.iter()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

//! Context bundle value object

use super::payload::ContextPayload;
use serde::{Deserialize, Serialize};

/// The retrieval output for one query (Value Object)
///
/// `direct_hits` mirrors the similarity index's grouping (one group per
/// query text, ranked best first). `expanded_groups` holds one neighbor
/// window per successfully parsed identifier, in the order the index
/// returned the identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBundle {
    direct_hits: Vec<Vec<String>>,
    expanded_groups: Vec<Vec<String>>,
}

impl ContextBundle {
    pub fn new(direct_hits: Vec<Vec<String>>, expanded_groups: Vec<Vec<String>>) -> Self {
        Self {
            direct_hits,
            expanded_groups,
        }
    }

    pub fn direct_hits(&self) -> &[Vec<String>] {
        &self.direct_hits
    }

    pub fn expanded_groups(&self) -> &[Vec<String>] {
        &self.expanded_groups
    }

    /// True when neither the hits nor the windows contain any verse text.
    pub fn is_empty(&self) -> bool {
        self.direct_hits.iter().all(Vec::is_empty)
            && self.expanded_groups.iter().all(Vec::is_empty)
    }

    /// Total number of direct hits across all query groups.
    pub fn hit_count(&self) -> usize {
        self.direct_hits.iter().map(Vec::len).sum()
    }

    /// The expanded windows as a conversation payload.
    pub fn expanded_payload(&self) -> ContextPayload {
        ContextPayload::Groups(self.expanded_groups.clone())
    }

    /// The direct hits flattened to one verse per line, for display.
    pub fn direct_hits_text(&self) -> String {
        self.direct_hits
            .iter()
            .map(|group| group.join("\n"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

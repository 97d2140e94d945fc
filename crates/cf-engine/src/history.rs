//! Recent flip history (most recent first)
//!
//! Input for achievement predicates only; not an authoritative log.

use serde::{Deserialize, Serialize};

use crate::outcome::FlipOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipHistory {
    entries: Vec<FlipOutcome>,
    capacity: usize,
}

impl FlipHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Record an outcome at the front, dropping the oldest beyond capacity
    pub fn push(&mut self, outcome: FlipOutcome) {
        self.entries.insert(0, outcome);
        self.entries.truncate(self.capacity);
    }

    pub fn as_slice(&self) -> &[FlipOutcome] {
        &self.entries
    }

    pub fn latest(&self) -> Option<FlipOutcome> {
        self.entries.first().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Compact form, e.g. `HTTH`
    pub fn to_strip(&self) -> String {
        self.entries.iter().map(|o| o.short()).collect()
    }
}

impl Default for FlipHistory {
    fn default() -> Self {
        Self::new(6)
    }
}

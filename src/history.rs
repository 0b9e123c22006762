//! @dose
//! purpose: Bounded record of recent analyses, newest first. Used by callers that analyze
//!     several inputs in one session and want to list or revisit earlier results.
//!
//! invariants:
//!     - len() never exceeds capacity; recording past capacity evicts the oldest entry
//!     - A result already present (same id), or one repeating the newest entry's text,
//!       model and role, is not recorded twice
//!
//! gotchas:
//!     - A capacity of 0 is raised to 1

use crate::types::AnalysisResult;
use std::collections::VecDeque;
use uuid::Uuid;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone)]
pub struct AnalysisHistory {
    entries: VecDeque<AnalysisResult>,
    capacity: usize,
}

impl Default for AnalysisHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }
}

impl AnalysisHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a result at the front. Returns false if it was a duplicate.
    pub fn record(&mut self, result: AnalysisResult) -> bool {
        if self.entries.iter().any(|e| e.id == result.id) {
            return false;
        }
        if let Some(latest) = self.entries.front() {
            if latest.text == result.text
                && latest.model == result.model
                && latest.role == result.role
            {
                return false;
            }
        }

        self.entries.push_front(result);
        self.entries.truncate(self.capacity);
        true
    }

    pub fn latest(&self) -> Option<&AnalysisResult> {
        self.entries.front()
    }

    pub fn get(&self, id: Uuid) -> Option<&AnalysisResult> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
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
}

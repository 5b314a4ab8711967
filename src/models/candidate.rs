//! Candidate identifiers and the pool of candidates still in the running.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a place in the external catalog.
pub type CandidateId = String;

/// Candidates in the running, in the order they were added (or ranked, after a cut).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidatePool {
    ids: Vec<CandidateId>,
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns true when it is now in the pool.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.ids.iter().position(|c| c == id) {
            Some(idx) => {
                self.ids.remove(idx);
                false
            }
            None => {
                self.ids.push(id.to_string());
                true
            }
        }
    }

    /// Set the pool to exactly `ids` (duplicates collapse to their first occurrence).
    pub fn replace(&mut self, ids: Vec<CandidateId>) {
        let mut next: Vec<CandidateId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        self.ids = next;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|c| c == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[CandidateId] {
        &self.ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

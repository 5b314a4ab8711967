//! VoteTally: per-round vote counts and ranked extraction.

use crate::catalog::PlaceCatalog;
use crate::models::candidate::{CandidateId, CandidatePool};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// A single vote adjustment. Only +1 / -1 exist.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDelta {
    Up,
    Down,
}

/// Vote counts for the current round. Absent ids count as 0; counts never go negative.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteTally {
    counts: BTreeMap<CandidateId, u32>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one vote adjustment; decrementing at zero stays at zero. Returns the new count.
    pub fn cast_vote(&mut self, id: &str, delta: VoteDelta) -> u32 {
        let current = self.count(id);
        let next = match delta {
            VoteDelta::Up => current.saturating_add(1),
            VoteDelta::Down => current.saturating_sub(1),
        };
        if next == 0 {
            self.counts.remove(id);
        } else {
            self.counts.insert(id.to_string(), next);
        }
        next
    }

    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }

    /// True when any pool member has at least one vote.
    pub fn any_votes_in(&self, pool: &CandidatePool) -> bool {
        pool.ids().iter().any(|id| self.count(id) > 0)
    }

    /// Pool sorted by votes (descending), ties by display name ascending.
    ///
    /// Names compare case-insensitively first, then case-sensitively, then by id, so the
    /// order is total and independent of the order votes were cast.
    pub fn rank(&self, pool: &CandidatePool, catalog: &dyn PlaceCatalog) -> Vec<CandidateId> {
        let mut keyed: Vec<(Reverse<u32>, String, String, CandidateId)> = pool
            .ids()
            .iter()
            .map(|id| {
                let name = catalog.display_name(id);
                (Reverse(self.count(id)), name.to_lowercase(), name, id.clone())
            })
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, _, _, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, PlaceView};

    fn pool(ids: &[&str]) -> CandidatePool {
        let mut p = CandidatePool::new();
        for id in ids {
            p.toggle(id);
        }
        p
    }

    #[test]
    fn decrement_at_zero_stays_zero() {
        let mut tally = VoteTally::new();
        assert_eq!(tally.cast_vote("a", VoteDelta::Down), 0);
        tally.cast_vote("a", VoteDelta::Up);
        tally.cast_vote("a", VoteDelta::Down);
        tally.cast_vote("a", VoteDelta::Down);
        assert_eq!(tally.count("a"), 0);
    }

    #[test]
    fn tie_break_uses_catalog_name_case_insensitively() {
        let catalog = InMemoryCatalog::from_places(vec![
            PlaceView::new("1", "banana"),
            PlaceView::new("2", "Apple"),
            PlaceView::new("3", "cherry"),
        ])
        .unwrap();
        let p = pool(&["1", "2", "3"]);
        let mut tally = VoteTally::new();
        tally.cast_vote("3", VoteDelta::Up);
        assert_eq!(tally.rank(&p, &catalog), vec!["3", "2", "1"]);
    }

    #[test]
    fn rank_ignores_vote_order() {
        let catalog = InMemoryCatalog::new();
        let p = pool(&["Banana", "Apple"]);
        let mut first = VoteTally::new();
        first.cast_vote("Banana", VoteDelta::Up);
        first.cast_vote("Apple", VoteDelta::Up);
        let mut second = VoteTally::new();
        second.cast_vote("Apple", VoteDelta::Up);
        second.cast_vote("Banana", VoteDelta::Up);
        assert_eq!(first.rank(&p, &catalog), second.rank(&p, &catalog));
        assert_eq!(first.rank(&p, &catalog), vec!["Apple", "Banana"]);
    }
}

//! GroupConfig: host-supplied settings for a decision session, plus clamping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fewest rounds a session may have (discovery + final).
pub const MIN_ROUNDS: i32 = 2;
/// Most rounds a session may have.
pub const MAX_ROUNDS: i32 = 5;

/// Whether per-candidate vote counts are shown while a round is open.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteVisibility {
    #[default]
    Realtime,
    Hidden,
}

/// Configuration supplied by the host at `start`.
///
/// Every field has a serde default so partial JSON bodies are accepted; out-of-range
/// values are clamped by [`GroupConfig::normalized`], never rejected.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupConfig {
    pub group_name: String,
    /// Informational only; never enforced.
    pub start_date: String,
    /// Informational only; never enforced.
    pub end_date: String,
    pub round_duration_hours: i32,
    pub round_duration_minutes: i32,
    pub num_rounds: i32,
    /// Keep-count per round number (2..num_rounds-1). The last round is always 1.
    pub round_keep_counts: BTreeMap<u32, u32>,
    pub vote_visibility: VoteVisibility,
    /// Advisory; the engine does not enforce it.
    pub max_votes_per_person: u32,
    /// Outside engine scope; carried for the UI.
    pub allow_user_invites: bool,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            group_name: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            round_duration_hours: 0,
            round_duration_minutes: 0,
            num_rounds: 3,
            round_keep_counts: BTreeMap::new(),
            vote_visibility: VoteVisibility::Realtime,
            max_votes_per_person: 1,
            allow_user_invites: false,
        }
    }
}

impl GroupConfig {
    /// Copy of this config with every numeric field clamped into its legal range.
    ///
    /// Keep-counts outside 2..num_rounds-1 are dropped (the final round is forced to 1
    /// by the planner) and zero keep-counts are raised to 1.
    pub fn normalized(&self) -> Self {
        let num_rounds = clamp_rounds(self.num_rounds);
        let last = num_rounds as u32;
        let round_keep_counts = self
            .round_keep_counts
            .iter()
            .filter(|(&round, _)| round >= 2 && round < last)
            .map(|(&round, &keep)| (round, keep.max(1)))
            .collect();
        Self {
            group_name: self.group_name.trim().to_string(),
            round_duration_hours: self.round_duration_hours.max(0),
            round_duration_minutes: self.round_duration_minutes.clamp(0, 59),
            num_rounds,
            round_keep_counts,
            max_votes_per_person: self.max_votes_per_person.max(1),
            ..self.clone()
        }
    }

    /// Parsed (start, end) dates when both are valid `YYYY-MM-DD` strings.
    pub fn schedule(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(self.end_date.trim(), "%Y-%m-%d").ok()?;
        Some((start, end))
    }
}

/// Clamp a requested round count into [MIN_ROUNDS, MAX_ROUNDS].
pub fn clamp_rounds(num_rounds: i32) -> i32 {
    num_rounds.clamp(MIN_ROUNDS, MAX_ROUNDS)
}

//! RoundDefinition: one entry of the planned round sequence.

use serde::{Deserialize, Serialize};

/// A planned round. Round 1 is discovery (no cut); the last round keeps exactly one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundDefinition {
    /// 1-based.
    pub round_number: u32,
    /// None for discovery; otherwise how many candidates survive this round.
    pub keep_count: Option<u32>,
    /// Display-only.
    pub label: String,
    pub is_final: bool,
}

impl RoundDefinition {
    pub fn discovery() -> Self {
        Self {
            round_number: 1,
            keep_count: None,
            label: "discovery".to_string(),
            is_final: false,
        }
    }

    pub fn voting(round_number: u32, keep_count: u32) -> Self {
        Self {
            round_number,
            keep_count: Some(keep_count),
            label: format!("Round {}: keep top {}", round_number, keep_count),
            is_final: false,
        }
    }

    pub fn final_round(round_number: u32) -> Self {
        Self {
            round_number,
            keep_count: Some(1),
            label: "Final round".to_string(),
            is_final: true,
        }
    }
}

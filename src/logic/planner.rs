//! Round planning: turn a round count and keep-counts into the ordered round list.

use crate::models::{clamp_rounds, RoundDefinition};
use std::collections::BTreeMap;

/// Keep-count for round 2 when the host did not set one.
const DEFAULT_SECOND_ROUND_KEEP: u32 = 5;
/// Keep-count for later non-final rounds when the host did not set one.
const DEFAULT_LATER_ROUND_KEEP: u32 = 3;

fn default_keep_for(round: u32) -> u32 {
    if round == 2 {
        DEFAULT_SECOND_ROUND_KEEP
    } else {
        DEFAULT_LATER_ROUND_KEEP
    }
}

/// Build the round sequence.
///
/// `num_rounds` is clamped to [2, 5]. Round 1 is discovery (no keep-count); the last round
/// always keeps 1 and never reads `keep_counts`. Rounds in between use `keep_counts[r]`,
/// falling back to 5 for round 2 and 3 afterwards.
pub fn build_rounds(num_rounds: i32, keep_counts: &BTreeMap<u32, u32>) -> Vec<RoundDefinition> {
    let last = clamp_rounds(num_rounds) as u32;
    let mut rounds = vec![RoundDefinition::discovery()];
    for r in 2..=last {
        if r == last {
            rounds.push(RoundDefinition::final_round(r));
        } else {
            let keep = keep_counts
                .get(&r)
                .copied()
                .unwrap_or_else(|| default_keep_for(r))
                .max(1);
            rounds.push(RoundDefinition::voting(r, keep));
        }
    }
    rounds
}

//! GroupSession and Phase.

use crate::models::candidate::{CandidateId, CandidatePool};
use crate::models::config::GroupConfig;
use crate::models::round::RoundDefinition;
use crate::models::timer::RoundTimer;
use crate::models::votes::VoteTally;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters used in group codes (no 0/O, 1/I lookalikes).
const GROUP_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const GROUP_CODE_LEN: usize = 6;

/// Current phase of the decision session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Not started; waiting for the host's configuration.
    #[default]
    Setup,
    /// Round 1: members add and remove candidates, nothing is eliminated.
    Discovery,
    /// Round 2 or later: votes are cast, then the pool is cut to the round's keep-count.
    Voting { round: u32 },
    /// Terminal: a single winner has been picked.
    Winner,
}

impl Phase {
    /// 1-based round for Discovery/Voting, None otherwise.
    pub fn round(&self) -> Option<u32> {
        match self {
            Phase::Discovery => Some(1),
            Phase::Voting { round } => Some(*round),
            Phase::Setup | Phase::Winner => None,
        }
    }
}

/// Full session state: configuration, planned rounds, pool, votes, timer and phase.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupSession {
    /// Short join code shared with the group.
    pub group_code: String,
    /// Clamped configuration; None until started.
    pub config: Option<GroupConfig>,
    pub rounds: Vec<RoundDefinition>,
    pub phase: Phase,
    pub pool: CandidatePool,
    pub votes: VoteTally,
    pub timer: RoundTimer,
    /// Set exactly once, on leaving the final round.
    pub winner: Option<CandidateId>,
}

impl GroupSession {
    /// New session in Setup with a random group code.
    pub fn new() -> Self {
        Self::with_code(generate_group_code())
    }

    pub fn with_code(group_code: impl Into<String>) -> Self {
        Self {
            group_code: group_code.into(),
            config: None,
            rounds: Vec::new(),
            phase: Phase::Setup,
            pool: CandidatePool::new(),
            votes: VoteTally::new(),
            timer: RoundTimer::new(),
            winner: None,
        }
    }

    /// Definition of the round currently open, if any.
    pub fn current_round(&self) -> Option<&RoundDefinition> {
        let round = self.phase.round()?;
        self.rounds.iter().find(|r| r.round_number == round)
    }

    pub fn num_rounds(&self) -> u32 {
        self.rounds.len() as u32
    }

    /// (hours, minutes) configured for each round's countdown.
    pub fn round_duration(&self) -> (i32, i32) {
        self.config
            .as_ref()
            .map(|c| (c.round_duration_hours, c.round_duration_minutes))
            .unwrap_or((0, 0))
    }
}

impl Default for GroupSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Random group code, e.g. `K7QX2M`.
pub fn generate_group_code() -> String {
    let mut rng = rand::thread_rng();
    (0..GROUP_CODE_LEN)
        .map(|_| GROUP_CODE_ALPHABET[rng.gen_range(0..GROUP_CODE_ALPHABET.len())] as char)
        .collect()
}

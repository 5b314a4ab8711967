//! Data structures for a group decision session: config, rounds, pool, votes, timer, phase.

mod candidate;
mod config;
mod round;
mod session;
mod timer;
mod votes;

pub use candidate::{CandidateId, CandidatePool};
pub use config::{clamp_rounds, GroupConfig, VoteVisibility, MAX_ROUNDS, MIN_ROUNDS};
pub use round::RoundDefinition;
pub use session::{generate_group_code, GroupSession, Phase};
pub use timer::{format_seconds, RoundTimer};
pub use votes::{VoteDelta, VoteTally};

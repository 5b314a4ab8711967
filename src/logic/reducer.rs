//! Actions and the pure reducer that drives the phase machine.

use crate::catalog::PlaceCatalog;
use crate::logic::discovery::{can_close_discovery, close_discovery, toggle_candidate};
use crate::logic::setup::{reset_session, start_session};
use crate::logic::voting::{can_close_voting, cast_vote, close_voting};
use crate::models::{CandidateId, GroupConfig, GroupSession, Phase, VoteDelta};
use serde::{Deserialize, Serialize};

/// Everything that can happen to a session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Start { config: GroupConfig },
    ToggleCandidate { candidate: CandidateId },
    CastVote { candidate: CandidateId, delta: VoteDelta },
    Advance,
    Reset,
    /// One second elapsed on the countdown started at `generation`.
    Tick { generation: u64 },
}

/// Close the open round if its guard holds; otherwise leave the session untouched.
///
/// Discovery needs a non-empty pool. A voting round additionally needs at least one vote
/// on a pool candidate.
pub fn advance(session: &mut GroupSession, catalog: &dyn PlaceCatalog) -> bool {
    let advanced = match session.phase {
        Phase::Discovery => close_discovery(session),
        Phase::Voting { .. } => close_voting(session, catalog),
        Phase::Setup | Phase::Winner => false,
    };
    if !advanced {
        log::debug!("[{}] advance ignored in {:?}", session.group_code, session.phase);
    }
    advanced
}

/// Whether `advance` would do anything right now.
pub fn can_advance(session: &GroupSession) -> bool {
    match session.phase {
        Phase::Discovery => can_close_discovery(session),
        Phase::Voting { .. } => can_close_voting(session),
        Phase::Setup | Phase::Winner => false,
    }
}

/// Count the timer down one second if `generation` is still the live countdown.
pub fn tick_timer(session: &mut GroupSession, generation: u64) -> bool {
    if session.timer.generation() != generation {
        return false;
    }
    let ticked = session.timer.tick();
    if ticked && !session.timer.is_running() {
        log::info!("[{}] round timer reached zero", session.group_code);
    }
    ticked
}

/// Apply `action` in place. Returns false when it was ignored (session unchanged).
pub fn apply(session: &mut GroupSession, action: &Action, catalog: &dyn PlaceCatalog) -> bool {
    match action {
        Action::Start { config } => start_session(session, config),
        Action::ToggleCandidate { candidate } => toggle_candidate(session, candidate),
        Action::CastVote { candidate, delta } => cast_vote(session, candidate, *delta),
        Action::Advance => advance(session, catalog),
        Action::Reset => reset_session(session),
        Action::Tick { generation } => tick_timer(session, *generation),
    }
}

/// Pure form of [`apply`]: `(state, action) -> state`.
pub fn reduce(session: &GroupSession, action: &Action, catalog: &dyn PlaceCatalog) -> GroupSession {
    let mut next = session.clone();
    apply(&mut next, action, catalog);
    next
}

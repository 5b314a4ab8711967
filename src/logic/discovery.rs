//! Discovery round: collecting candidates, then opening the first voting round.

use crate::models::{GroupSession, Phase};

/// Add `id` to the pool, or remove it if already there. Discovery only; ignored elsewhere.
///
/// Ids are not checked against the catalog.
pub fn toggle_candidate(session: &mut GroupSession, id: &str) -> bool {
    if session.phase != Phase::Discovery {
        log::debug!("[{}] toggle '{}' ignored in {:?}", session.group_code, id, session.phase);
        return false;
    }
    let added = session.pool.toggle(id);
    log::debug!(
        "[{}] {} candidate '{}' ({} in pool)",
        session.group_code,
        if added { "added" } else { "removed" },
        id,
        session.pool.len()
    );
    true
}

pub(crate) fn can_close_discovery(session: &GroupSession) -> bool {
    session.phase == Phase::Discovery && !session.pool.is_empty()
}

/// Close discovery: pool carries over unchanged, votes reset, round 2 opens.
pub(crate) fn close_discovery(session: &mut GroupSession) -> bool {
    if !can_close_discovery(session) {
        return false;
    }
    session.votes.reset();
    let (hours, minutes) = session.round_duration();
    session.timer.start(hours, minutes);
    session.phase = Phase::Voting { round: 2 };
    log::info!(
        "[{}] discovery closed with {} candidates, round 2 open",
        session.group_code,
        session.pool.len()
    );
    true
}

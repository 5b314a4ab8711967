//! Voting rounds: vote casting and the per-round cut.

use crate::catalog::PlaceCatalog;
use crate::models::{GroupSession, Phase, VoteDelta};

/// Adjust a candidate's vote count by one. Voting rounds only; ignored elsewhere.
pub fn cast_vote(session: &mut GroupSession, id: &str, delta: VoteDelta) -> bool {
    if !matches!(session.phase, Phase::Voting { .. }) {
        log::debug!("[{}] vote for '{}' ignored in {:?}", session.group_code, id, session.phase);
        return false;
    }
    let before = session.votes.count(id);
    let after = session.votes.cast_vote(id, delta);
    before != after
}

pub(crate) fn can_close_voting(session: &GroupSession) -> bool {
    matches!(session.phase, Phase::Voting { .. })
        && !session.pool.is_empty()
        && session.votes.any_votes_in(&session.pool)
}

/// Close the open voting round: keep the top `keep_count` by rank, then either open the
/// next round or, after the final round, record the winner.
pub(crate) fn close_voting(session: &mut GroupSession, catalog: &dyn PlaceCatalog) -> bool {
    if !can_close_voting(session) {
        return false;
    }
    let Some(definition) = session.current_round().cloned() else {
        return false;
    };
    let keep = if definition.is_final {
        1
    } else {
        definition.keep_count.unwrap_or(1).max(1) as usize
    };

    let ranked = session.votes.rank(&session.pool, catalog);
    let kept: Vec<_> = ranked.into_iter().take(keep).collect();
    session.pool.replace(kept);
    session.votes.reset();

    if definition.is_final {
        session.winner = session.pool.ids().first().cloned();
        session.timer.stop();
        session.phase = Phase::Winner;
        log::info!(
            "[{}] final round closed, winner '{}'",
            session.group_code,
            session.winner.as_deref().unwrap_or_default()
        );
    } else {
        let next = definition.round_number + 1;
        let (hours, minutes) = session.round_duration();
        session.timer.start(hours, minutes);
        session.phase = Phase::Voting { round: next };
        log::info!(
            "[{}] round {} closed, {} kept, round {} open",
            session.group_code,
            definition.round_number,
            session.pool.len(),
            next
        );
    }
    true
}

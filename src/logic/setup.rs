//! Setup phase: start a session (Setup -> Discovery) and reset it back to Setup.

use crate::logic::planner::build_rounds;
use crate::models::{GroupConfig, GroupSession, Phase};

/// Start the session with `config` (clamped). Only valid in Setup; otherwise ignored.
pub fn start_session(session: &mut GroupSession, config: &GroupConfig) -> bool {
    if session.phase != Phase::Setup {
        log::debug!("[{}] start ignored in {:?}", session.group_code, session.phase);
        return false;
    }
    let config = config.normalized();
    session.rounds = build_rounds(config.num_rounds, &config.round_keep_counts);
    session.pool.clear();
    session.votes.reset();
    session.winner = None;
    session
        .timer
        .start(config.round_duration_hours, config.round_duration_minutes);
    log::info!(
        "[{}] started '{}' with {} rounds",
        session.group_code,
        config.group_name,
        session.rounds.len()
    );
    session.config = Some(config);
    session.phase = Phase::Discovery;
    true
}

/// Clear everything and return to Setup (valid from any phase). The group code is kept.
pub fn reset_session(session: &mut GroupSession) -> bool {
    let mut timer = std::mem::take(&mut session.timer);
    timer.clear();
    let before = session.phase;
    *session = GroupSession {
        timer,
        ..GroupSession::with_code(std::mem::take(&mut session.group_code))
    };
    log::info!("[{}] reset from {:?}", session.group_code, before);
    true
}

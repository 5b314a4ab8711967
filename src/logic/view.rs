//! Read model for the UI: what the host and members see for a session.

use crate::catalog::{PlaceCatalog, PlaceView};
use crate::logic::reducer::can_advance;
use crate::models::{GroupSession, Phase, VoteVisibility};
use chrono::NaiveDate;
use serde::Serialize;

/// A pool member resolved against the catalog.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CandidateView {
    pub place: PlaceView,
    /// None while votes are hidden.
    pub votes: Option<u32>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SessionView {
    pub group_code: String,
    pub group_name: String,
    pub phase: Phase,
    pub round: Option<u32>,
    pub num_rounds: u32,
    pub round_label: Option<String>,
    pub keep_count: Option<u32>,
    pub candidates: Vec<CandidateView>,
    pub can_advance: bool,
    /// None when the timer is disabled or a winner has been picked.
    pub time_remaining: Option<String>,
    pub timer_running: bool,
    pub winner: Option<PlaceView>,
    pub vote_visibility: VoteVisibility,
    pub max_votes_per_person: Option<u32>,
    pub allow_user_invites: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SessionView {
    pub fn build(session: &GroupSession, catalog: &dyn PlaceCatalog) -> Self {
        let config = session.config.as_ref();
        let visibility = config.map(|c| c.vote_visibility).unwrap_or_default();
        let show_votes = visibility == VoteVisibility::Realtime || session.phase == Phase::Winner;
        let resolve = |id: &str| catalog.resolve(id).unwrap_or_else(|| PlaceView::unknown(id));

        let candidates = session
            .pool
            .ids()
            .iter()
            .map(|id| CandidateView {
                place: resolve(id.as_str()),
                votes: show_votes.then(|| session.votes.count(id)),
            })
            .collect();
        let current = session.current_round();
        let schedule = config.and_then(|c| c.schedule());

        Self {
            group_code: session.group_code.clone(),
            group_name: config.map(|c| c.group_name.clone()).unwrap_or_default(),
            phase: session.phase,
            round: session.phase.round(),
            num_rounds: session.num_rounds(),
            round_label: current.map(|r| r.label.clone()),
            keep_count: current.and_then(|r| r.keep_count),
            candidates,
            can_advance: can_advance(session),
            time_remaining: if session.phase == Phase::Winner {
                None
            } else {
                session.timer.formatted_remaining()
            },
            timer_running: session.timer.is_running(),
            winner: session.winner.as_deref().map(|id| resolve(id)),
            vote_visibility: visibility,
            max_votes_per_person: config.map(|c| c.max_votes_per_person),
            allow_user_invites: config.map(|c| c.allow_user_invites).unwrap_or(false),
            start_date: schedule.map(|(start, _)| start),
            end_date: schedule.map(|(_, end)| end),
        }
    }
}

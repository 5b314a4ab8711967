//! Integration tests for the round engine: start, discovery, voting cuts, winner, reset.

use group_round_picker::{
    advance, apply, can_advance, cast_vote, reduce, start_session, toggle_candidate, Action,
    GroupConfig, GroupSession, InMemoryCatalog, Phase, PlaceView, SessionView, VoteDelta,
    VoteVisibility,
};
use std::collections::BTreeMap;

fn config(num_rounds: i32, keep: &[(u32, u32)]) -> GroupConfig {
    GroupConfig {
        group_name: "Friday dinner".to_string(),
        num_rounds,
        round_keep_counts: keep.iter().copied().collect::<BTreeMap<_, _>>(),
        ..GroupConfig::default()
    }
}

fn started(num_rounds: i32, keep: &[(u32, u32)]) -> GroupSession {
    let mut s = GroupSession::with_code("TEST01");
    assert!(start_session(&mut s, &config(num_rounds, keep)));
    s
}

fn votes(s: &mut GroupSession, id: &str, n: u32) {
    for _ in 0..n {
        cast_vote(s, id, VoteDelta::Up);
    }
}

#[test]
fn start_enters_discovery_with_planned_rounds() {
    let s = started(9, &[]);
    assert_eq!(s.phase, Phase::Discovery);
    assert_eq!(s.rounds.len(), 5);
    assert!(s.pool.is_empty());
    assert_eq!(s.config.as_ref().unwrap().num_rounds, 5);
    assert_eq!(s.current_round().unwrap().keep_count, None);
    assert_eq!(s.current_round().unwrap().label, "discovery");
}

#[test]
fn three_round_scenario_picks_b() {
    let catalog = InMemoryCatalog::new();
    let mut s = started(3, &[(2, 3)]);
    for id in ["A", "B", "C", "D", "E", "F"] {
        assert!(toggle_candidate(&mut s, id));
    }

    assert!(advance(&mut s, &catalog));
    assert_eq!(s.phase, Phase::Voting { round: 2 });
    assert_eq!(s.pool.len(), 6);
    assert!(!s.votes.any_votes_in(&s.pool));

    for (id, n) in [("A", 5), ("B", 4), ("C", 3), ("D", 2), ("E", 1)] {
        votes(&mut s, id, n);
    }
    assert!(advance(&mut s, &catalog));
    assert_eq!(s.phase, Phase::Voting { round: 3 });
    assert_eq!(s.pool.ids(), ["A", "B", "C"]);
    assert!(!s.pool.contains("D"));
    assert_eq!(s.votes.count("A"), 0);
    assert!(s.winner.is_none());

    votes(&mut s, "B", 2);
    votes(&mut s, "A", 1);
    assert!(advance(&mut s, &catalog));
    assert_eq!(s.phase, Phase::Winner);
    assert_eq!(s.winner.as_deref(), Some("B"));
    assert_eq!(s.pool.ids(), ["B"]);
    assert!(!s.timer.is_running());
}

#[test]
fn cut_keeps_min_of_keep_count_and_pool() {
    let catalog = InMemoryCatalog::new();
    let mut s = started(4, &[(2, 5)]);
    toggle_candidate(&mut s, "x");
    toggle_candidate(&mut s, "y");
    advance(&mut s, &catalog);
    votes(&mut s, "y", 1);
    assert!(advance(&mut s, &catalog));
    assert_eq!(s.phase, Phase::Voting { round: 3 });
    // tied candidates order by name after the vote leader
    assert_eq!(s.pool.ids(), ["y", "x"]);
}

#[test]
fn advance_guards_leave_session_unchanged() {
    let catalog = InMemoryCatalog::new();
    let mut s = started(3, &[]);
    let before = s.clone();
    assert!(!can_advance(&s));
    assert!(!advance(&mut s, &catalog));
    assert_eq!(s, before);

    toggle_candidate(&mut s, "A");
    toggle_candidate(&mut s, "B");
    advance(&mut s, &catalog);
    // votes only on an id outside the pool do not satisfy the guard
    votes(&mut s, "Z", 3);
    let before = s.clone();
    assert!(!can_advance(&s));
    assert_eq!(reduce(&s, &Action::Advance, &catalog), before);
}

#[test]
fn actions_outside_their_phase_are_ignored() {
    let catalog = InMemoryCatalog::new();
    let mut setup = GroupSession::with_code("IDLE00");
    let before = setup.clone();
    assert!(!toggle_candidate(&mut setup, "A"));
    assert!(!cast_vote(&mut setup, "A", VoteDelta::Up));
    assert!(!advance(&mut setup, &catalog));
    assert_eq!(setup, before);

    let mut s = started(2, &[]);
    assert!(!cast_vote(&mut s, "A", VoteDelta::Up));
    toggle_candidate(&mut s, "A");
    advance(&mut s, &catalog);
    assert!(!toggle_candidate(&mut s, "B"));
    assert!(!start_session(&mut s, &config(4, &[])));
    assert_eq!(s.pool.ids(), ["A"]);
}

#[test]
fn winner_is_terminal_until_reset() {
    let catalog = InMemoryCatalog::new();
    let mut s = started(2, &[]);
    toggle_candidate(&mut s, "A");
    toggle_candidate(&mut s, "B");
    advance(&mut s, &catalog);
    votes(&mut s, "A", 1);
    assert!(advance(&mut s, &catalog));
    assert_eq!(s.winner.as_deref(), Some("A"));

    let done = s.clone();
    for action in [
        Action::ToggleCandidate { candidate: "C".into() },
        Action::CastVote { candidate: "B".into(), delta: VoteDelta::Up },
        Action::Advance,
        Action::Start { config: config(3, &[]) },
    ] {
        assert!(!apply(&mut s, &action, &catalog));
    }
    assert_eq!(s, done);

    assert!(apply(&mut s, &Action::Reset, &catalog));
    assert_eq!(s.phase, Phase::Setup);
    assert_eq!(s.group_code, "TEST01");
    assert!(s.winner.is_none() && s.pool.is_empty() && s.config.is_none());
}

#[test]
fn alphabetical_tie_break_uses_catalog_names() {
    let catalog = InMemoryCatalog::from_places(vec![
        PlaceView::new("p-banana", "Banana"),
        PlaceView::new("p-apple", "Apple"),
    ])
    .unwrap();
    let mut s = started(2, &[]);
    toggle_candidate(&mut s, "p-banana");
    toggle_candidate(&mut s, "p-apple");
    advance(&mut s, &catalog);
    votes(&mut s, "p-banana", 2);
    votes(&mut s, "p-apple", 2);
    assert_eq!(s.votes.rank(&s.pool, &catalog), vec!["p-apple", "p-banana"]);
    advance(&mut s, &catalog);
    assert_eq!(s.winner.as_deref(), Some("p-apple"));
}

#[test]
fn view_hides_votes_until_winner_when_hidden() {
    let catalog = InMemoryCatalog::from_places(vec![PlaceView::new("a", "Arcade")]).unwrap();
    let mut s = GroupSession::with_code("VIEW01");
    let cfg = GroupConfig {
        vote_visibility: VoteVisibility::Hidden,
        round_duration_minutes: 10,
        start_date: "2026-10-23".to_string(),
        end_date: "not a date".to_string(),
        num_rounds: 2,
        ..GroupConfig::default()
    };
    start_session(&mut s, &cfg);
    toggle_candidate(&mut s, "a");
    toggle_candidate(&mut s, "unknown");
    advance(&mut s, &catalog);
    cast_vote(&mut s, "a", VoteDelta::Up);

    let view = SessionView::build(&s, &catalog);
    assert_eq!(view.round, Some(2));
    assert_eq!(view.round_label.as_deref(), Some("Final round"));
    assert_eq!(view.keep_count, Some(1));
    assert!(view.can_advance);
    assert_eq!(view.time_remaining.as_deref(), Some("10:00"));
    assert!(view.candidates.iter().all(|c| c.votes.is_none()));
    assert_eq!(view.candidates[0].place.name, "Arcade");
    assert_eq!(view.candidates[1].place.name, "unknown");
    assert_eq!(view.start_date, None);

    advance(&mut s, &catalog);
    let view = SessionView::build(&s, &catalog);
    assert_eq!(view.phase, Phase::Winner);
    assert_eq!(view.winner.unwrap().name, "Arcade");
    assert_eq!(view.candidates[0].votes, Some(0));
    assert!(!view.can_advance);
    assert_eq!(view.time_remaining, None);
}

#[test]
fn config_is_clamped_not_rejected() {
    let raw = GroupConfig {
        round_duration_hours: -2,
        round_duration_minutes: 75,
        num_rounds: 1,
        max_votes_per_person: 0,
        round_keep_counts: BTreeMap::from([(2, 0), (7, 4)]),
        ..GroupConfig::default()
    };
    let cfg = raw.normalized();
    assert_eq!(cfg.round_duration_hours, 0);
    assert_eq!(cfg.round_duration_minutes, 59);
    assert_eq!(cfg.num_rounds, 2);
    assert_eq!(cfg.max_votes_per_person, 1);
    // round 2 is the final round when there are only two
    assert!(cfg.round_keep_counts.is_empty());
}

#[test]
fn config_deserializes_from_camel_case_json() {
    let cfg: GroupConfig = serde_json::from_str(
        r#"{
            "groupName": "Team outing",
            "startDate": "2026-11-01",
            "endDate": "2026-11-02",
            "roundDurationHours": 1,
            "roundDurationMinutes": 30,
            "numRounds": 4,
            "roundKeepCounts": { "2": 6, "3": 2 },
            "voteVisibility": "hidden",
            "maxVotesPerPerson": 3,
            "allowUserInvites": true
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.round_keep_counts.get(&2), Some(&6));
    assert_eq!(cfg.vote_visibility, VoteVisibility::Hidden);
    let (start, end) = cfg.schedule().unwrap();
    assert!(start < end);

    let mut s = GroupSession::with_code("JSON01");
    start_session(&mut s, &cfg);
    assert_eq!(s.timer.seconds_remaining(), 5400);
    let keeps: Vec<_> = s.rounds.iter().map(|r| r.keep_count).collect();
    assert_eq!(keeps, vec![None, Some(6), Some(2), Some(1)]);
}

#[test]
fn empty_json_body_yields_default_config() {
    let cfg: GroupConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, GroupConfig::default());
    assert!(serde_json::from_str::<GroupConfig>(r#"{ "numRounds": "three" }"#).is_err());
}

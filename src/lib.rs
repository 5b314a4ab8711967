//! Group venue picker: library with the decision-round engine and its models.

pub mod catalog;
pub mod controller;
pub mod logic;
pub mod models;
pub mod scheduler;

pub use catalog::{CatalogError, InMemoryCatalog, PlaceCatalog, PlaceView};
pub use controller::SessionController;
pub use logic::{
    advance, apply, build_rounds, can_advance, cast_vote, reduce, reset_session, start_session,
    tick_timer, toggle_candidate, Action, CandidateView, SessionView,
};
pub use models::{
    CandidateId, CandidatePool, GroupConfig, GroupSession, Phase, RoundDefinition, RoundTimer,
    VoteDelta, VoteTally, VoteVisibility,
};
pub use scheduler::{ManualScheduler, Scheduler, TickFn, TickHandle, TokioScheduler};

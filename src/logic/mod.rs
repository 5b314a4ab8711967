//! Session business logic: planning, setup, discovery, voting, reducer, read model.

mod discovery;
mod planner;
mod reducer;
mod setup;
mod view;
mod voting;

pub use discovery::toggle_candidate;
pub use planner::build_rounds;
pub use reducer::{advance, apply, can_advance, reduce, tick_timer, Action};
pub use setup::{reset_session, start_session};
pub use view::{CandidateView, SessionView};
pub use voting::cast_vote;

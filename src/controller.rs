//! SessionController: one live session, its catalog, and the task ticking its timer.

use crate::catalog::PlaceCatalog;
use crate::logic::{apply, tick_timer, Action, SessionView};
use crate::models::{GroupConfig, GroupSession, VoteDelta};
use crate::scheduler::{Scheduler, TickHandle};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Serializes every mutation of one session and keeps exactly one tick task alive for the
/// running countdown. Dropping the controller cancels that task.
pub struct SessionController {
    session: Arc<RwLock<GroupSession>>,
    catalog: Arc<dyn PlaceCatalog>,
    scheduler: Arc<dyn Scheduler>,
    /// Also the writer lock: held for the whole of `dispatch`.
    ticker: Mutex<Option<TickHandle>>,
}

impl SessionController {
    pub fn new(
        session: GroupSession,
        catalog: Arc<dyn PlaceCatalog>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
            catalog,
            scheduler,
            ticker: Mutex::new(None),
        }
    }

    /// Apply `action`. Returns false when it was ignored.
    ///
    /// When the action started, restarted or stopped the countdown, the previous tick task is
    /// cancelled and, if the countdown is running, a new one is scheduled for it. A countdown
    /// that already reached zero has its task cancelled on the next dispatch.
    pub fn dispatch(&self, action: Action) -> bool {
        let mut ticker = self.lock_ticker();
        let (applied, rescheduled, running, generation) = {
            let mut session = self.write();
            let before = session.timer.generation();
            let applied = apply(&mut session, &action, self.catalog.as_ref());
            let timer = &session.timer;
            (
                applied,
                timer.generation() != before,
                timer.is_running(),
                timer.generation(),
            )
        };
        // drop cancels the superseded (or expired) task
        if rescheduled || !running {
            ticker.take();
        }
        if rescheduled && running {
            *ticker = Some(self.schedule_ticks(generation));
        }
        applied
    }

    fn schedule_ticks(&self, generation: u64) -> TickHandle {
        let session = Arc::downgrade(&self.session);
        self.scheduler.every_second(Box::new(move || {
            if let Some(session) = session.upgrade() {
                let mut session = session.write().unwrap_or_else(|p| p.into_inner());
                tick_timer(&mut session, generation);
            }
        }))
    }

    pub fn start(&self, config: GroupConfig) -> bool {
        self.dispatch(Action::Start { config })
    }

    pub fn toggle_candidate(&self, candidate: impl Into<String>) -> bool {
        self.dispatch(Action::ToggleCandidate {
            candidate: candidate.into(),
        })
    }

    pub fn cast_vote(&self, candidate: impl Into<String>, delta: VoteDelta) -> bool {
        self.dispatch(Action::CastVote {
            candidate: candidate.into(),
            delta,
        })
    }

    pub fn advance(&self) -> bool {
        self.dispatch(Action::Advance)
    }

    pub fn reset(&self) -> bool {
        self.dispatch(Action::Reset)
    }

    /// Copy of the current session state.
    pub fn snapshot(&self) -> GroupSession {
        self.read().clone()
    }

    pub fn view(&self) -> SessionView {
        SessionView::build(&self.read(), self.catalog.as_ref())
    }

    /// Whether a tick task is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.lock_ticker().is_some()
    }

    fn read(&self) -> RwLockReadGuard<'_, GroupSession> {
        self.session.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, GroupSession> {
        self.session.write().unwrap_or_else(|p| p.into_inner())
    }

    fn lock_ticker(&self) -> MutexGuard<'_, Option<TickHandle>> {
        self.ticker.lock().unwrap_or_else(|p| p.into_inner())
    }
}

//! Once-per-second tick sources for the round timer.
//!
//! `TokioScheduler` ticks on wall-clock time; `ManualScheduler` ticks only when told to,
//! so tests can move time forward deterministically.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;

/// Callback run on every tick.
pub type TickFn = Box<dyn FnMut() + Send + 'static>;

/// Something that can run a callback once per second until cancelled.
pub trait Scheduler: Send + Sync {
    fn every_second(&self, on_tick: TickFn) -> TickHandle;
}

/// Handle to a periodic tick task. Cancelling (or dropping) it stops the task immediately.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop ticking. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Ticks from a spawned tokio task driven by `tokio::time::interval`.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime of the calling context, if there is one.
    pub fn from_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn every_second(&self, mut on_tick: TickFn) -> TickHandle {
        let task = self.handle.spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // first tick resolves immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                on_tick();
            }
        });
        TickHandle::new(move || task.abort())
    }
}

#[derive(Default)]
struct ManualTasks {
    next_id: u64,
    tasks: BTreeMap<u64, TickFn>,
}

/// Scheduler whose time only moves when [`ManualScheduler::advance`] is called.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualTasks>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live task once per elapsed second, in registration order.
    pub fn advance(&self, seconds: u64) {
        for _ in 0..seconds {
            let mut inner = lock(&self.inner);
            for on_tick in inner.tasks.values_mut() {
                on_tick();
            }
        }
    }

    /// Number of tasks that have not been cancelled.
    pub fn active_tasks(&self) -> usize {
        lock(&self.inner).tasks.len()
    }
}

impl Scheduler for ManualScheduler {
    fn every_second(&self, on_tick: TickFn) -> TickHandle {
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.tasks.insert(id, on_tick);
            id
        };
        let weak: Weak<Mutex<ManualTasks>> = Arc::downgrade(&self.inner);
        TickHandle::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner).tasks.remove(&id);
            }
        })
    }
}

fn lock(inner: &Mutex<ManualTasks>) -> std::sync::MutexGuard<'_, ManualTasks> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn manual_ticks_until_cancelled() {
        let scheduler = ManualScheduler::new();
        let count = Arc::new(AtomicU64::new(0));
        let c = count.clone();
        let mut handle = scheduler.every_second(Box::new(move || {
            c.fetch_add(1, Ordering::SeqCst);
        }));
        scheduler.advance(3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
        handle.cancel();
        handle.cancel();
        scheduler.advance(3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn dropping_handle_cancels() {
        let scheduler = ManualScheduler::new();
        let handle = scheduler.every_second(Box::new(|| {}));
        assert_eq!(scheduler.active_tasks(), 1);
        drop(handle);
        assert_eq!(scheduler.active_tasks(), 0);
    }
}

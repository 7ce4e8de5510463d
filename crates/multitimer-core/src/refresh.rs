//! Periodic display refresh for running timers.
//!
//! Each running timer gets at most one tokio task that recomputes its elapsed
//! time on a fixed cadence and hands a [`Frame`] to a sink. Tasks work on a
//! snapshot of the timer and never touch the ledger, so the refresh is purely
//! cosmetic: a skipped or late tick only delays what is drawn.
//!
//! Tasks must be restarted whenever the timer's running interval changes and
//! cancelled as soon as it stops running; [`DisplayRefresh::apply`] does both
//! from ledger events.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

use crate::events::Event;
use crate::format::format_time;
use crate::timer::{ActiveTimer, Clock};

/// One redraw of one timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: String,
    pub name: String,
    pub elapsed_ms: u64,
    pub formatted: String,
}

pub type FrameSink = Arc<dyn Fn(Frame) + Send + Sync>;

struct RefreshTask {
    snapshot: ActiveTimer,
    handle: JoinHandle<()>,
}

/// Owner of the per-timer refresh tasks.
///
/// Must be used from within a tokio runtime.
pub struct DisplayRefresh<C> {
    clock: C,
    cadence: Duration,
    sink: FrameSink,
    tasks: HashMap<String, RefreshTask>,
}

impl<C> DisplayRefresh<C>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    pub fn new(clock: C, cadence: Duration, sink: FrameSink) -> Self {
        Self {
            clock,
            // tokio intervals reject a zero period.
            cadence: cadence.max(Duration::from_millis(1)),
            sink,
            tasks: HashMap::new(),
        }
    }

    /// Begin refreshing `timer`, replacing any task already bound to its id.
    ///
    /// Returns `false` (and cancels any existing task) if the timer is paused.
    pub fn start(&mut self, timer: &ActiveTimer) -> bool {
        self.cancel(&timer.id);
        if !timer.is_running {
            return false;
        }

        let snapshot = timer.clone();
        let task_timer = timer.clone();
        let clock = self.clock.clone();
        let sink = Arc::clone(&self.sink);
        let cadence = self.cadence;
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cadence);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let elapsed_ms = task_timer.elapsed_ms(clock.now_ms());
                sink(Frame {
                    id: task_timer.id.clone(),
                    name: task_timer.name.clone(),
                    elapsed_ms,
                    formatted: format_time(elapsed_ms),
                });
            }
        });
        trace!(id = %timer.id, "refresh task started");
        self.tasks.insert(timer.id.clone(), RefreshTask { snapshot, handle });
        true
    }

    /// Stop refreshing `id`. Returns whether a task was running.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.tasks.remove(id) {
            Some(task) => {
                task.handle.abort();
                trace!(id, "refresh task cancelled");
                true
            }
            None => false,
        }
    }

    /// React to a ledger transition.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::TimerCreated { timer, .. } | Event::TimerResumed { timer, .. } => {
                self.start(timer);
            }
            Event::TimerPaused { id, .. } => {
                self.cancel(id);
            }
            Event::TimerStopped { entry, .. } => {
                self.cancel(&entry.id);
            }
            Event::HistoryCleared { .. } => {}
        }
    }

    /// Reconcile tasks with a full snapshot of the active timers.
    ///
    /// Tasks for timers that are gone or paused are cancelled. Running timers
    /// get a task unless one already exists for the identical snapshot.
    pub fn sync(&mut self, timers: &[ActiveTimer]) {
        let stale: Vec<String> = self
            .tasks
            .keys()
            .filter(|id| !timers.iter().any(|t| t.is_running && &t.id == *id))
            .cloned()
            .collect();
        for id in stale {
            self.cancel(&id);
        }

        for timer in timers.iter().filter(|t| t.is_running) {
            let current = self
                .tasks
                .get(&timer.id)
                .is_some_and(|task| task.snapshot == *timer && !task.handle.is_finished());
            if !current {
                self.start(timer);
            }
        }
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.tasks
            .get(id)
            .is_some_and(|task| !task.handle.is_finished())
    }

    pub fn active_count(&self) -> usize {
        self.tasks.values().filter(|t| !t.handle.is_finished()).count()
    }

    /// Cancel every task.
    pub fn shutdown(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }
}

impl<C> Drop for DisplayRefresh<C> {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.handle.abort();
        }
    }
}

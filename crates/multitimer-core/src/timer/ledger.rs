//! The timer ledger.
//!
//! Owns the active timers and the bounded history log and is the only place
//! where elapsed time is accounted. Like the rest of the core it holds no
//! threads: time is read from the injected [`Clock`] whenever an operation runs.
//!
//! ## State Transitions
//!
//! ```text
//! create -> Running <-> Paused
//!           Running | Paused -> stop -> (removed, HistoryEntry emitted)
//! ```
//!
//! Every command returns `Some(Event)` when it changed state and `None` when
//! it was a no-op (unknown id, wrong state, blank name).

use tracing::debug;

use super::clock::{timestamp, Clock, IdGenerator, SystemClock, UuidGenerator};
use super::model::{ActiveTimer, HistoryEntry, LedgerState, HISTORY_LIMIT};
use crate::events::Event;

pub struct Ledger<C: Clock = SystemClock> {
    state: LedgerState,
    clock: C,
    ids: Box<dyn IdGenerator + Send>,
}

impl Ledger<SystemClock> {
    /// Ledger on the wall clock with UUID ids.
    pub fn new(state: LedgerState) -> Self {
        Self::with_clock(state, SystemClock, UuidGenerator)
    }
}

impl<C: Clock> Ledger<C> {
    pub fn with_clock(
        mut state: LedgerState,
        clock: C,
        ids: impl IdGenerator + Send + 'static,
    ) -> Self {
        state.history.truncate(HISTORY_LIMIT);
        Self {
            state,
            clock,
            ids: Box::new(ids),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn active_timers(&self) -> &[ActiveTimer] {
        &self.state.active_timers
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.history
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn into_state(self) -> LedgerState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn get(&self, id: &str) -> Option<&ActiveTimer> {
        self.state.active_timers.iter().find(|t| t.id == id)
    }

    /// Current elapsed time of an active timer.
    pub fn elapsed_ms(&self, id: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        self.get(id).map(|t| t.elapsed_ms(now))
    }

    pub fn running_count(&self) -> usize {
        self.state.active_timers.iter().filter(|t| t.is_running).count()
    }

    pub fn total_count(&self) -> usize {
        self.state.active_timers.len()
    }

    /// Find an active timer by exact id or by a prefix matching exactly one id.
    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        if prefix.is_empty() {
            return None;
        }
        if let Some(timer) = self.get(prefix) {
            return Some(&timer.id);
        }
        let mut matches = self
            .state
            .active_timers
            .iter()
            .filter(|t| t.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(timer), None) => Some(&timer.id),
            _ => None,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn create(&mut self, name: &str) -> Option<Event> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let now = self.clock.now_ms();
        let timer = ActiveTimer {
            id: self.ids.next_id(),
            name: name.to_string(),
            start_time: now,
            accumulated_time: 0,
            is_running: true,
            created_at: now,
        };
        debug!(id = %timer.id, name = %timer.name, "timer created");
        self.state.active_timers.insert(0, timer.clone());
        Some(Event::TimerCreated {
            timer,
            at: timestamp(now),
        })
    }

    pub fn pause(&mut self, id: &str) -> Option<Event> {
        let now = self.clock.now_ms();
        let timer = self.find_mut(id)?;
        if !timer.is_running {
            return None;
        }
        timer.accumulated_time = timer
            .accumulated_time
            .saturating_add(now.saturating_sub(timer.start_time));
        timer.is_running = false;
        debug!(id, accumulated_ms = timer.accumulated_time, "timer paused");
        Some(Event::TimerPaused {
            id: timer.id.clone(),
            accumulated_ms: timer.accumulated_time,
            at: timestamp(now),
        })
    }

    pub fn resume(&mut self, id: &str) -> Option<Event> {
        let now = self.clock.now_ms();
        let timer = self.find_mut(id)?;
        if timer.is_running {
            return None;
        }
        timer.start_time = now;
        timer.is_running = true;
        debug!(id, "timer resumed");
        Some(Event::TimerResumed {
            timer: timer.clone(),
            at: timestamp(now),
        })
    }

    pub fn stop(&mut self, id: &str) -> Option<Event> {
        let now = self.clock.now_ms();
        let index = self.state.active_timers.iter().position(|t| t.id == id)?;
        let timer = self.state.active_timers.remove(index);
        let entry = HistoryEntry {
            duration: timer.elapsed_ms(now),
            id: timer.id,
            name: timer.name,
            finished_at: now,
        };
        debug!(id, duration_ms = entry.duration, "timer stopped");

        self.state.history.insert(0, entry.clone());
        self.state.history.truncate(HISTORY_LIMIT);
        Some(Event::TimerStopped {
            entry,
            at: timestamp(now),
        })
    }

    /// Empty the history log. Always clears; asking the user first is the caller's job.
    pub fn clear_history(&mut self) -> Option<Event> {
        let removed = self.state.history.len();
        self.state.history.clear();
        debug!(removed, "history cleared");
        Some(Event::HistoryCleared {
            removed,
            at: timestamp(self.clock.now_ms()),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn find_mut(&mut self, id: &str) -> Option<&mut ActiveTimer> {
        self.state.active_timers.iter_mut().find(|t| t.id == id)
    }
}

impl<C: Clock + std::fmt::Debug> std::fmt::Debug for Ledger<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("state", &self.state)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

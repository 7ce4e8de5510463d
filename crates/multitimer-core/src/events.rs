use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{ActiveTimer, HistoryEntry};

/// Every state change in the ledger produces an Event.
/// Persistence and the display refresh react to them; no-ops produce none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerCreated {
        timer: ActiveTimer,
        at: DateTime<Utc>,
    },
    TimerPaused {
        id: String,
        accumulated_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        timer: ActiveTimer,
        at: DateTime<Utc>,
    },
    TimerStopped {
        entry: HistoryEntry,
        at: DateTime<Utc>,
    },
    HistoryCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether the active timer set changed.
    pub fn touches_active_timers(&self) -> bool {
        !matches!(self, Event::HistoryCleared { .. })
    }

    /// Whether the history log changed.
    pub fn touches_history(&self) -> bool {
        matches!(
            self,
            Event::TimerStopped { .. } | Event::HistoryCleared { .. }
        )
    }
}

use serde::{Deserialize, Serialize};

/// Maximum number of finished timers kept in the history log.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Running,
    Paused,
}

impl TimerStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }
}

/// A stopwatch that has been started and not yet stopped.
///
/// Field names serialize in camelCase; this is the on-disk layout of the
/// `active_timers` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTimer {
    pub id: String,
    pub name: String,
    /// Start of the current running interval (epoch ms). Stale while paused.
    pub start_time: u64,
    /// Milliseconds from all completed running intervals.
    pub accumulated_time: u64,
    pub is_running: bool,
    pub created_at: u64,
}

impl ActiveTimer {
    /// Total elapsed time at `now_ms`, including the in-progress interval.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.is_running {
            self.accumulated_time
                .saturating_add(now_ms.saturating_sub(self.start_time))
        } else {
            self.accumulated_time
        }
    }

    pub fn status(&self) -> TimerStatus {
        if self.is_running {
            TimerStatus::Running
        } else {
            TimerStatus::Paused
        }
    }
}

/// A finished timer. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub name: String,
    pub duration: u64,
    pub finished_at: u64,
}

impl HistoryEntry {
    /// Row key for list views.
    pub fn display_key(&self) -> String {
        format!("{}-{}", self.id, self.finished_at)
    }
}

/// Everything the ledger owns, in its persisted shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    /// Newest first.
    pub active_timers: Vec<ActiveTimer>,
    /// Newest first, at most [`HISTORY_LIMIT`] entries.
    pub history: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(is_running: bool) -> ActiveTimer {
        ActiveTimer {
            id: "a".into(),
            name: "Tapete".into(),
            start_time: 10_000,
            accumulated_time: 3_000,
            is_running,
            created_at: 1_000,
        }
    }

    #[test]
    fn running_timer_adds_current_interval() {
        assert_eq!(timer(true).elapsed_ms(12_500), 5_500);
    }

    #[test]
    fn paused_timer_ignores_start_time() {
        assert_eq!(timer(false).elapsed_ms(99_999), 3_000);
    }

    #[test]
    fn clock_behind_start_time_does_not_underflow() {
        assert_eq!(timer(true).elapsed_ms(9_000), 3_000);
    }

    #[test]
    fn huge_accumulated_time_saturates() {
        let mut t = timer(true);
        t.accumulated_time = u64::MAX - 10;
        assert_eq!(t.elapsed_ms(12_500), u64::MAX);
    }

    #[test]
    fn status_follows_running_flag() {
        assert_eq!(timer(true).status(), TimerStatus::Running);
        assert_eq!(timer(false).status().as_str(), "paused");
    }

    #[test]
    fn active_timer_uses_camel_case_fields() {
        let json = serde_json::to_value(timer(true)).unwrap();
        assert_eq!(json["startTime"], 10_000);
        assert_eq!(json["accumulatedTime"], 3_000);
        assert_eq!(json["isRunning"], true);
        assert_eq!(json["createdAt"], 1_000);
    }

    #[test]
    fn history_entry_parses_stored_layout() {
        let entry: HistoryEntry = serde_json::from_str(
            r#"{"id":"x","name":"Sala","duration":7000,"finishedAt":1700000000000}"#,
        )
        .unwrap();
        assert_eq!(entry.duration, 7_000);
        assert_eq!(entry.display_key(), "x-1700000000000");
    }
}

//! Persistence adapter between the ledger and a [`KvStore`].
//!
//! The two collections live under independent keys so that a corrupt history
//! blob never costs the user their running timers, and vice versa.
//!
//! Writes are refused until [`Persistence::load`] has run once. Without that
//! gate a caller that mutates before hydrating would overwrite good data with
//! empty defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::kv::KvStore;
use crate::error::StorageError;
use crate::events::Event;
use crate::timer::{ActiveTimer, HistoryEntry, LedgerState, HISTORY_LIMIT};

pub const ACTIVE_TIMERS_KEY: &str = "active_timers";
pub const HISTORY_KEY: &str = "history";

pub struct Persistence<S: KvStore> {
    store: S,
    hydrated: bool,
}

impl<S: KvStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            hydrated: false,
        }
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read both collections. Never fails: a missing, unreadable or unparsable
    /// record is logged and treated as empty.
    pub fn load(&mut self) -> LedgerState {
        let active_timers: Vec<ActiveTimer> = self.read_collection(ACTIVE_TIMERS_KEY);
        let mut history: Vec<HistoryEntry> = self.read_collection(HISTORY_KEY);
        if history.len() > HISTORY_LIMIT {
            warn!(
                stored = history.len(),
                limit = HISTORY_LIMIT,
                "stored history exceeds limit, truncating"
            );
            history.truncate(HISTORY_LIMIT);
        }
        self.hydrated = true;
        info!(
            active = active_timers.len(),
            history = history.len(),
            "ledger state loaded"
        );
        LedgerState {
            active_timers,
            history,
        }
    }

    /// Overwrite the `active_timers` record.
    ///
    /// # Errors
    /// `NotHydrated` before [`load`](Self::load), or any store write failure.
    pub fn save_active_timers(&mut self, timers: &[ActiveTimer]) -> Result<(), StorageError> {
        self.write_collection(ACTIVE_TIMERS_KEY, timers)
    }

    /// Overwrite the `history` record.
    ///
    /// # Errors
    /// `NotHydrated` before [`load`](Self::load), or any store write failure.
    pub fn save_history(&mut self, history: &[HistoryEntry]) -> Result<(), StorageError> {
        self.write_collection(HISTORY_KEY, history)
    }

    /// Save whichever collections `event` changed, taking their contents from `state`.
    pub fn persist(&mut self, event: &Event, state: &LedgerState) -> Result<(), StorageError> {
        if event.touches_active_timers() {
            self.save_active_timers(&state.active_timers)?;
        }
        if event.touches_history() {
            self.save_history(&state.history)?;
        }
        Ok(())
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &'static str) -> Vec<T> {
        let raw = match self.store.kv_get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "failed to read stored record, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "stored record is malformed, starting empty");
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(
        &mut self,
        key: &'static str,
        items: &[T],
    ) -> Result<(), StorageError> {
        if !self.hydrated {
            return Err(StorageError::NotHydrated { key });
        }
        let json =
            serde_json::to_string(items).map_err(|source| StorageError::Serialize { key, source })?;
        self.store.kv_set(key, &json)
    }
}

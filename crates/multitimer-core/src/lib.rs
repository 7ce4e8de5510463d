//! # multitimer Core Library
//!
//! Business logic for a local multi-stopwatch utility: any number of named
//! timers that can be paused, resumed and stopped independently, with
//! finished timers kept in a short history log that survives restarts.
//! The `multitimer` CLI is a thin presentation layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Ledger**: owns active timers and the bounded history; all
//!   elapsed-time accounting happens here, driven by an injected clock
//! - **Persistence**: JSON records in a key-value store (SQLite by default),
//!   loaded once at start-up and rewritten after every mutation
//! - **Display Refresh**: cancellable per-timer tokio tasks that redraw
//!   running timers without mutating anything
//!
//! ## Key Components
//!
//! - [`Ledger`]: timer state machine and history log
//! - [`Persistence`]: load/save of ledger state with corruption recovery
//! - [`Database`]: SQLite key-value store
//! - [`DisplayRefresh`]: periodic redraw tasks
//! - [`Config`]: application configuration

pub mod error;
pub mod events;
pub mod format;
pub mod refresh;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use format::{format_date, format_date_in, format_time};
pub use refresh::{DisplayRefresh, Frame, FrameSink};
pub use storage::{Config, Database, KvStore, MemoryStore, Persistence};
pub use timer::{ActiveTimer, Clock, HistoryEntry, Ledger, LedgerState, SystemClock, HISTORY_LIMIT};

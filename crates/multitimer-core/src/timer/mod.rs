mod clock;
mod ledger;
mod model;

pub use clock::{timestamp, Clock, IdGenerator, ManualClock, SequentialIds, SystemClock, UuidGenerator};
pub use ledger::Ledger;
pub use model::{ActiveTimer, HistoryEntry, LedgerState, TimerStatus, HISTORY_LIMIT};

pub mod config;
pub mod history;
pub mod timer;
pub mod watch;

use multitimer_core::{Database, Event, Ledger, Persistence};

/// A hydrated ledger bound to the on-disk store for one CLI invocation.
pub struct Session {
    pub ledger: Ledger,
    persistence: Persistence<Database>,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let mut persistence = Persistence::new(Database::open()?);
        let ledger = Ledger::new(persistence.load());
        Ok(Self {
            ledger,
            persistence,
        })
    }

    /// Persist whatever `event` changed. `None` (a no-op) writes nothing.
    pub fn commit(&mut self, event: Option<Event>) -> Result<Option<Event>, Box<dyn std::error::Error>> {
        if let Some(ref event) = event {
            self.persistence.persist(event, self.ledger.state())?;
        }
        Ok(event)
    }
}

/// First eight characters of an id, enough to address it from the shell.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_long_ids() {
        assert_eq!(short_id("3f2a9c1e-aaaa-bbbb"), "3f2a9c1e");
        assert_eq!(short_id("abc"), "abc");
    }
}

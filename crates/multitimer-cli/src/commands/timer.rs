use multitimer_core::timer::TimerStatus;
use multitimer_core::{format_time, ActiveTimer, Event};

use super::{short_id, Session};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn print_event(event: &Event) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn start(name: &str) -> CmdResult {
    let mut session = Session::open()?;
    let event = session.ledger.create(name);
    match session.commit(event)? {
        Some(event) => print_event(&event),
        None => {
            eprintln!("timer name is empty, nothing started");
            Ok(())
        }
    }
}

/// Resolve `id_or_prefix`, apply `op`, persist. Unknown ids and wrong-state
/// transitions are reported on stderr but are not failures.
fn transition<F>(id_or_prefix: &str, verb: &str, op: F) -> CmdResult
where
    F: FnOnce(&mut Session, &str) -> Option<Event>,
{
    let mut session = Session::open()?;
    let Some(id) = session.ledger.resolve(id_or_prefix).map(str::to_owned) else {
        eprintln!("no active timer matches '{id_or_prefix}'");
        return Ok(());
    };
    let event = op(&mut session, &id);
    match session.commit(event)? {
        Some(event) => print_event(&event),
        None => {
            eprintln!("timer {} is already {verb}", short_id(&id));
            Ok(())
        }
    }
}

pub fn pause(id: &str) -> CmdResult {
    transition(id, "paused", |s, id| s.ledger.pause(id))
}

pub fn resume(id: &str) -> CmdResult {
    transition(id, "running", |s, id| s.ledger.resume(id))
}

pub fn stop(id: &str) -> CmdResult {
    transition(id, "stopped", |s, id| s.ledger.stop(id))
}

pub fn list(json: bool) -> CmdResult {
    let session = Session::open()?;
    let ledger = &session.ledger;
    if json {
        println!("{}", serde_json::to_string_pretty(ledger.active_timers())?);
        return Ok(());
    }

    println!(
        "{} running / {} total",
        ledger.running_count(),
        ledger.total_count()
    );
    let now = ledger.now_ms();
    for timer in ledger.active_timers() {
        println!("{}", render_row(timer, now));
    }
    Ok(())
}

pub(crate) fn render_row(timer: &ActiveTimer, now_ms: u64) -> String {
    format_row(
        &timer.id,
        timer.status(),
        &format_time(timer.elapsed_ms(now_ms)),
        &timer.name,
    )
}

/// One line of the active-timer table, shared by `list` and `watch`.
pub(crate) fn format_row(id: &str, status: TimerStatus, elapsed: &str, name: &str) -> String {
    format!(
        "{:<8}  {:<7}  {:>11}  {}",
        short_id(id),
        status.as_str(),
        elapsed,
        name
    )
}

//! `multitimer watch`: redraws active timers in place until Ctrl-C.
//!
//! Read-only. The store is re-read every second so timers started, paused
//! or stopped from another shell show up; running rows are redrawn by the
//! core's per-timer refresh tasks at the configured cadence.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use multitimer_core::timer::TimerStatus;
use multitimer_core::{
    ActiveTimer, Clock, Config, Database, DisplayRefresh, Frame, FrameSink, Persistence,
    SystemClock,
};
use tracing::debug;

use super::timer::{format_row, render_row};

const RELOAD_INTERVAL: Duration = Duration::from_secs(1);

/// A block of terminal lines, one per active timer, rewritten in place.
#[derive(Default)]
struct Screen {
    order: Vec<String>,
    lines: HashMap<String, String>,
    drawn: usize,
}

impl Screen {
    fn reset(&mut self, timers: &[ActiveTimer], now_ms: u64) {
        self.order = timers.iter().map(|t| t.id.clone()).collect();
        self.lines = timers
            .iter()
            .map(|t| (t.id.clone(), render_row(t, now_ms)))
            .collect();
    }

    fn update(&mut self, frame: &Frame) {
        if let Some(line) = self.lines.get_mut(&frame.id) {
            *line = format_row(&frame.id, TimerStatus::Running, &frame.formatted, &frame.name);
        }
    }

    /// ANSI output that moves back over the previous draw and repaints.
    fn render(&mut self) -> String {
        let mut out = String::new();
        if self.drawn > 0 {
            out.push_str(&format!("\x1b[{}A", self.drawn));
        }
        if self.order.is_empty() {
            out.push_str("\x1b[2Kno active timers\n");
            self.drawn = 1;
        } else {
            for id in &self.order {
                out.push_str("\x1b[2K");
                out.push_str(self.lines.get(id).map(String::as_str).unwrap_or_default());
                out.push('\n');
            }
            self.drawn = self.order.len();
        }
        // Clear anything left over from a taller previous draw.
        out.push_str("\x1b[J");
        out
    }
}

fn paint(out: &str) {
    let mut stdout = std::io::stdout().lock();
    // A failed redraw is only cosmetic; the next frame tries again.
    let _ = stdout.write_all(out.as_bytes());
    let _ = stdout.flush();
}

fn load_timers() -> Result<Vec<ActiveTimer>, Box<dyn std::error::Error>> {
    let mut persistence = Persistence::new(Database::open()?);
    Ok(persistence.load().active_timers)
}

pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(watch(Duration::from_millis(config.refresh.interval_ms)))
}

async fn watch(cadence: Duration) -> Result<(), Box<dyn std::error::Error>> {
    let screen = Arc::new(Mutex::new(Screen::default()));
    let sink_screen = Arc::clone(&screen);
    let sink: FrameSink = Arc::new(move |frame: Frame| {
        if let Ok(mut screen) = sink_screen.lock() {
            screen.update(&frame);
            paint(&screen.render());
        }
    });

    let mut refresh = DisplayRefresh::new(SystemClock, cadence, sink);
    let mut reload = tokio::time::interval(RELOAD_INTERVAL);
    let mut last: Option<Vec<ActiveTimer>> = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = reload.tick() => {
                let timers = load_timers()?;
                if last.as_ref() == Some(&timers) {
                    continue;
                }
                debug!(count = timers.len(), "active timers changed, resyncing");
                {
                    let mut screen = screen.lock().map_err(|_| "screen lock poisoned")?;
                    screen.reset(&timers, SystemClock.now_ms());
                    paint(&screen.render());
                }
                refresh.sync(&timers);
                last = Some(timers);
            }
        }
    }

    refresh.shutdown();
    Ok(())
}

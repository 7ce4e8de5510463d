use std::io::{BufRead, Write};

use chrono::Utc;
use clap::Subcommand;
use multitimer_core::{format_date, format_date_in, format_time, Config, HistoryEntry};

use super::{short_id, Session};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Delete every history entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(
    action: Option<HistoryAction>,
    json: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        None => {
            let history = session.ledger.history();
            if json {
                println!("{}", serde_json::to_string_pretty(history)?);
            } else if history.is_empty() {
                println!("no finished timers");
            } else {
                for entry in history {
                    println!("{}", render_row(entry, config.display.utc));
                }
            }
        }
        Some(HistoryAction::Clear { yes }) => {
            let count = session.ledger.history().len();
            if !yes && !confirm(&format!("Clear {count} history entries?"))? {
                println!("aborted");
                return Ok(());
            }
            let event = session.ledger.clear_history();
            session.commit(event)?;
            println!("history cleared ({count} removed)");
        }
    }
    Ok(())
}

fn render_row(entry: &HistoryEntry, utc: bool) -> String {
    let finished = if utc {
        format_date_in(entry.finished_at, &Utc)
    } else {
        format_date(entry.finished_at)
    };
    format!(
        "{:<8}  {:>11}  {}  {}",
        short_id(&entry.id),
        format_time(entry.duration),
        finished,
        entry.name
    )
}

fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

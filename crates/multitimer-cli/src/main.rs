use clap::{CommandFactory, Parser, Subcommand};
use multitimer_core::Config;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "multitimer", version, about = "Named stopwatches with a short history")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new running timer
    Start {
        /// Timer name (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Pause a running timer
    Pause {
        /// Timer id or unique id prefix
        id: String,
    },
    /// Resume a paused timer
    Resume {
        /// Timer id or unique id prefix
        id: String,
    },
    /// Stop a timer and record it in history
    Stop {
        /// Timer id or unique id prefix
        id: String,
    },
    /// List active timers
    List {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or clear finished timers
    History {
        #[command(subcommand)]
        action: Option<commands::history::HistoryAction>,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Live display of running timers (Ctrl-C to exit)
    Watch,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_env("MULTITIMER_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_tracing(&config);
    if let Err(e) = &loaded {
        warn!(error = %e, "using default configuration");
    }

    let result = match cli.command {
        Commands::Start { name } => commands::timer::start(&name.join(" ")),
        Commands::Pause { id } => commands::timer::pause(&id),
        Commands::Resume { id } => commands::timer::resume(&id),
        Commands::Stop { id } => commands::timer::stop(&id),
        Commands::List { json } => commands::timer::list(json),
        Commands::History { action, json } => commands::history::run(action, json, &config),
        Commands::Watch => commands::watch::run(&config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "multitimer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

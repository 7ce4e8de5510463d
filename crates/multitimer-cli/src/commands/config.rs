use clap::Subcommand;
use multitimer_core::{Config, ConfigError};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dotted key: refresh.interval_ms, display.utc or log.filter
        key: String,
    },
    /// Change one setting and write config.toml
    Set {
        key: String,
        value: String,
    },
    /// Print every setting as `key = value`
    List,
    /// Overwrite config.toml with the defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let value = Config::load()?
                .get(&key)
                .ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List => {
            let config = Config::load()?;
            for line in list_lines(&config) {
                println!("{line}");
            }
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

fn list_lines(config: &Config) -> Vec<String> {
    Config::KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|value| format!("{key} = {value}")))
        .collect()
}

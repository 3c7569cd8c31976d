//! Command-line front end over the entity store and the report services.

mod commands;
pub mod output;

use std::env;

use chrono::NaiveDate;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::{Clock, EntityStore, FixedClock, SystemClock};
use crate::errors::FinanceError;
use crate::storage::JsonFileStore;

/// Overrides the current date, e.g. `FINANCE_CORE_TODAY=2024-01-15`.
pub const TODAY_ENV: &str = "FINANCE_CORE_TODAY";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error("{0}")]
    Usage(String),
}

/// State shared by every command of one invocation.
pub struct CliContext {
    pub store: EntityStore,
    pub config: Config,
    pub json: bool,
}

impl CliContext {
    pub fn open(json: bool) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let storage = JsonFileStore::new(manager.resolve_data_dir(&config))?;
        let store = EntityStore::load(Box::new(storage), clock_from_env()?)?;
        Ok(Self {
            store,
            config,
            json,
        })
    }
}

fn clock_from_env() -> Result<Box<dyn Clock>, CliError> {
    match env::var(TODAY_ENV) {
        Ok(raw) => {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| {
                CliError::Usage(format!("{TODAY_ENV} must be YYYY-MM-DD ({err})"))
            })?;
            Ok(Box::new(FixedClock::on(date)))
        }
        Err(_) => Ok(Box::new(SystemClock)),
    }
}

/// Runs one command given the process arguments without the program name.
pub fn run_cli<I>(args: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut json = false;
    let mut positional = Vec::new();
    for arg in args {
        if arg == "--json" {
            json = true;
        } else {
            positional.push(arg);
        }
    }

    let Some((command, rest)) = positional.split_first() else {
        commands::print_usage();
        return Ok(());
    };

    match command.as_str() {
        "help" | "--help" | "-h" => {
            commands::print_usage();
            Ok(())
        }
        "version" | "--version" => commands::version(json),
        name if commands::is_known(name) => {
            let mut context = CliContext::open(json)?;
            commands::dispatch(&mut context, name, rest)
        }
        other => Err(CliError::Usage(format!(
            "unknown command `{other}`; run `help` for usage"
        ))),
    }
}

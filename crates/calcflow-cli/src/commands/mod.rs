pub mod config;
pub mod eval;
pub mod history;
pub mod repl;

use anyhow::Result;
use calcflow_core::{Calculator, Config, FileHistory};

/// Calculator backed by the configured history file
pub(crate) fn open_calculator(config: &Config) -> Result<Calculator<FileHistory>> {
    let store = FileHistory::open(config.history_path()?)?;
    Ok(Calculator::new(config, store))
}


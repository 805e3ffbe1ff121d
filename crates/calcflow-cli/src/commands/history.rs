//! History command - list, delete and clear saved calculations

use anyhow::Result;
use calcflow_core::Config;
use console::{style, Term};

pub fn list(config: &Config, user: &str, limit: Option<usize>) -> Result<()> {
    let term = Term::stdout();
    let calculator = super::open_calculator(config)?;
    let records = calculator.history(user, limit)?;

    if records.is_empty() {
        term.write_line(&format!("{} No history for {}", style("ℹ").blue(), user))?;
        return Ok(());
    }

    term.write_line(&format!("{}", style(format!("History for {}", user)).bold()))?;
    term.write_line("")?;

    for record in &records {
        let mode = if record.ai_mode { style("ai").magenta() } else { style("  ").dim() };
        term.write_line(&format!(
            "#{:<5} {} {} = {}",
            record.id,
            mode,
            record.expression,
            style(record.result).green()
        ))?;
        for step in &record.steps {
            term.write_line(&format!("         {} {}", style("→").dim(), style(step).dim()))?;
        }
    }

    Ok(())
}

/// Returns false when there was no such record
pub fn delete(config: &Config, user: &str, id: u64) -> Result<bool> {
    let term = Term::stdout();
    let mut calculator = super::open_calculator(config)?;

    if calculator.delete(user, id)? {
        term.write_line(&format!("{} Deleted #{}", style("✓").green(), id))?;
        Ok(true)
    } else {
        term.write_line(&format!("{} No record #{} for {}", style("✗").red(), id, user))?;
        Ok(false)
    }
}

pub fn clear(config: &Config, user: &str) -> Result<()> {
    let term = Term::stdout();
    let mut calculator = super::open_calculator(config)?;
    let removed = calculator.clear(user)?;

    term.write_line(&format!(
        "{} Cleared {} record{}",
        style("✓").green(),
        removed,
        if removed == 1 { "" } else { "s" }
    ))?;
    Ok(())
}

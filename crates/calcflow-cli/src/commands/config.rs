//! Config command - manage configuration

use anyhow::Result;
use calcflow_core::{Config, ExponentPolicy};
use console::{style, Term};

pub fn show(config: &Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line(&format!("{}", style("CalcFlow Configuration").bold()))?;
    term.write_line("")?;

    term.write_line(&format!("AI mode:          {}", style(config.ai_mode).cyan()))?;
    term.write_line(&format!(
        "Default user:     {}",
        style(&config.default_user).cyan()
    ))?;

    term.write_line("")?;
    term.write_line(&format!("{}", style("Normalizer:").dim()))?;
    term.write_line(&format!(
        "  USD → INR rate: {}",
        config.normalizer.usd_inr_rate
    ))?;
    term.write_line(&format!(
        "  Exponent:       {}",
        config.normalizer.exponent.display_name()
    ))?;

    term.write_line("")?;
    term.write_line(&format!("{}", style("Evaluator:").dim()))?;
    term.write_line(&format!("  Max depth:      {}", config.evaluator.max_depth))?;

    term.write_line("")?;
    term.write_line(&format!("{}", style("History:").dim()))?;
    term.write_line(&format!("  Recent limit:   {}", config.history.recent_limit))?;
    match config.history_path() {
        Ok(path) => term.write_line(&format!("  File:           {}", path.display()))?,
        Err(e) => term.write_line(&format!(
            "  File:           {} {}",
            style("⚠").yellow(),
            e
        ))?,
    }

    Ok(())
}

pub fn show_path(path: Option<&str>) -> Result<()> {
    let term = Term::stdout();
    let config_path = match path {
        Some(p) => std::path::PathBuf::from(p),
        None => Config::default_config_path()?,
    };
    term.write_line(&format!("{}", config_path.display()))?;
    if !config_path.exists() {
        term.write_line(&format!(
            "{} File does not exist yet; defaults are in use",
            style("ℹ").blue()
        ))?;
    }
    Ok(())
}

pub fn set_rate(config: &mut Config, path: Option<&str>, rate: f64) -> Result<()> {
    let term = Term::stdout();

    if !rate.is_finite() || rate <= 0.0 {
        term.write_line(&format!(
            "{} Rate must be a positive number, got {}",
            style("✗").red(),
            rate
        ))?;
        return Ok(());
    }

    config.normalizer.usd_inr_rate = rate;
    config.save(path)?;

    term.write_line(&format!(
        "{} USD → INR rate set to: {}",
        style("✓").green(),
        rate
    ))?;
    Ok(())
}

pub fn set_exponent(config: &mut Config, path: Option<&str>, policy: &str) -> Result<()> {
    let term = Term::stdout();

    let exponent = match policy.to_lowercase().as_str() {
        "preserve" | "keep" => ExponentPolicy::Preserve,
        "collapse" => ExponentPolicy::Collapse,
        _ => {
            term.write_line(&format!(
                "{} Unknown policy '{}'. Available: preserve, collapse",
                style("✗").red(),
                policy
            ))?;
            return Ok(());
        }
    };

    config.normalizer.exponent = exponent;
    config.save(path)?;

    term.write_line(&format!(
        "{} Exponent policy set to: {}",
        style("✓").green(),
        exponent.display_name()
    ))?;

    if exponent == ExponentPolicy::Collapse {
        term.write_line(&format!(
            "{} '**' will be read as multiplication (\"16**0.5\" = 8)",
            style("⚠").yellow()
        ))?;
    }

    Ok(())
}

pub fn set_ai(config: &mut Config, path: Option<&str>, value: &str) -> Result<()> {
    let term = Term::stdout();

    let ai_mode = match value.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => true,
        "off" | "false" | "no" | "0" => false,
        _ => {
            term.write_line(&format!(
                "{} Expected on or off, got '{}'",
                style("✗").red(),
                value
            ))?;
            return Ok(());
        }
    };

    config.ai_mode = ai_mode;
    config.save(path)?;

    term.write_line(&format!(
        "{} AI mode {} by default",
        style("✓").green(),
        if ai_mode { "on" } else { "off" }
    ))?;
    Ok(())
}

//! Repl command - interactive calculator prompt

use anyhow::Result;
use calcflow_core::Config;
use console::{style, Term};
use std::io::BufRead;

pub fn run(config: &Config, user: &str, ai_mode: bool) -> Result<()> {
    let term = Term::stdout();
    let mut calculator = super::open_calculator(config)?;
    let mut ai_mode = ai_mode;

    term.write_line(&format!("{}", style("CalcFlow").bold()))?;
    term.write_line(&format!(
        "{}",
        style("Type an expression. :ai toggles AI mode, :history shows recent results, :q quits.").dim()
    ))?;

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let prompt = if ai_mode { "ai> " } else { "> " };
        term.write_str(&format!("{}", style(prompt).cyan()))?;
        term.flush()?;

        let Some(line) = lines.next() else {
            term.write_line("")?;
            break;
        };
        let line = line?;
        let input = line.trim();

        match input {
            "" => continue,
            ":q" | ":quit" | ":exit" => break,
            ":ai" => {
                ai_mode = !ai_mode;
                term.write_line(&format!(
                    "{} AI mode {}",
                    style("ℹ").blue(),
                    if ai_mode { "on" } else { "off" }
                ))?;
            }
            ":history" => {
                for record in calculator.history(user, None)? {
                    term.write_line(&format!(
                        "  #{:<4} {} = {}",
                        record.id,
                        record.expression,
                        style(record.result).green()
                    ))?;
                }
            }
            _ => match calculator.calculate(user, input, ai_mode, true) {
                Ok(output) => super::eval::print_output(&term, &output, false)?,
                Err(e) => term.write_line(&format!("{} {}", style("✗").red(), e))?,
            },
        }
    }

    Ok(())
}

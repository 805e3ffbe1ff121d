//! Eval command - evaluate one expression

use anyhow::Result;
use calcflow_core::{CalculateOutput, CalculatorError, Config};
use console::{style, Term};

pub struct EvalOptions {
    pub ai_mode: bool,
    pub save: bool,
    pub json: bool,
    pub verbose: bool,
}

/// Returns false when the calculation failed; the failure has already been printed
pub fn run(config: &Config, user: &str, expression: &str, options: &EvalOptions) -> Result<bool> {
    let mut calculator = super::open_calculator(config)?;
    let outcome = calculator.calculate(user, expression, options.ai_mode, options.save);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&json_report(&outcome))?);
        return Ok(outcome.is_ok());
    }

    let term = Term::stdout();
    match outcome {
        Ok(output) => {
            print_output(&term, &output, options.verbose)?;
            Ok(true)
        }
        Err(e) => {
            term.write_line(&format!("{} {}", style("✗").red(), e))?;
            Ok(false)
        }
    }
}

pub(crate) fn print_output(term: &Term, output: &CalculateOutput, verbose: bool) -> Result<()> {
    let calculation = &output.calculation;

    for step in calculation.steps().iter() {
        term.write_line(&format!("  {} {}", style("→").dim(), step))?;
    }

    term.write_line(&format!(
        "{} = {}",
        style(calculation.expression()).cyan(),
        style(calculation.result).green().bold()
    ))?;

    if verbose {
        let timings = &calculation.timings;
        term.write_line(&format!(
            "{}",
            style(format!(
                "normalize: {}us, evaluate: {}us, total: {}us",
                timings.normalize_us, timings.evaluate_us, timings.total_us
            ))
            .dim()
        ))?;
        if let Some(record) = &output.record {
            term.write_line(&format!("{}", style(format!("saved as #{}", record.id)).dim()))?;
        }
    }

    Ok(())
}

/// `{"ok": true, "result": .., "steps": [..]}` or `{"ok": false, "error": ..}`
fn json_report(outcome: &Result<CalculateOutput, CalculatorError>) -> serde_json::Value {
    match outcome {
        Ok(output) => {
            let calculation = &output.calculation;
            serde_json::json!({
                "ok": true,
                "expression": calculation.expression(),
                "result": calculation.result,
                "steps": calculation.steps(),
                "id": output.record.as_ref().map(|r| r.id),
            })
        }
        Err(e) => {
            let code = match e {
                CalculatorError::Calc(calc) => calc.code(),
                CalculatorError::History(_) => "history_error",
            };
            serde_json::json!({
                "ok": false,
                "error": e.to_string(),
                "code": code,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str) -> Config {
        let path = std::env::temp_dir().join(format!(
            "calcflow-cli-eval-{}-{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let mut config = Config::default();
        config.history.file = Some(path.to_string_lossy().into_owned());
        config
    }

    fn options(json: bool) -> EvalOptions {
        EvalOptions {
            ai_mode: false,
            save: false,
            json,
            verbose: false,
        }
    }

    #[test]
    fn test_failure_is_reported_not_returned() {
        let config = temp_config("failure");
        assert!(!run(&config, "u", "5/0", &options(false)).unwrap());
        assert!(!run(&config, "u", "5/0", &options(true)).unwrap());
    }

    #[test]
    fn test_success() {
        let config = temp_config("success");
        assert!(run(&config, "u", "-5+1", &options(false)).unwrap());
    }

    #[test]
    fn test_json_report_shapes() {
        let config = temp_config("json");
        let mut calculator = super::super::open_calculator(&config).unwrap();

        let ok = json_report(&calculator.calculate("u", "2++2", false, false));
        assert_eq!(ok["ok"], true);
        assert_eq!(ok["result"], 4.0);
        assert_eq!(ok["steps"][0], "Smart fix: 2++2 -> 2+2");
        assert!(ok["id"].is_null());

        let err = json_report(&calculator.calculate("u", "5/0", false, false));
        assert_eq!(err["ok"], false);
        assert_eq!(err["code"], "non_finite_result");
    }
}

//! CalcFlow CLI - Natural-language calculator

use anyhow::Result;
use clap::{Parser, Subcommand};
use calcflow_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "calcflow")]
#[command(author = "Era Laboratories")]
#[command(version)]
#[command(about = "Calculator that understands plain English", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose output (show normalization stages and timings)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// User id for history (defaults to the configured user)
    #[arg(short, long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one expression
    Eval {
        /// Expression or question, e.g. "what is 5 plus 3"
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,

        /// Enable unit/currency and natural-language parsing
        #[arg(long)]
        ai: bool,

        /// Do not record the result in history
        #[arg(long)]
        no_save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive prompt (:ai toggles AI mode, :q quits)
    Repl {
        /// Start with AI mode on
        #[arg(long)]
        ai: bool,
    },

    /// Manage calculation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show recent calculations, newest first
    List {
        /// Number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete one record
    Delete {
        /// Record id
        id: u64,
    },

    /// Delete all records for the user
    Clear,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Set the USD → INR conversion rate
    SetRate {
        /// INR per USD
        rate: f64,
    },

    /// Set how smart fix treats `**`
    SetExponent {
        /// preserve or collapse
        policy: String,
    },

    /// Turn AI mode on or off by default
    SetAi {
        /// on or off
        value: String,
    },
}

/// The command already printed what went wrong; only the exit status is left
fn exit_on_failure(ok: bool) -> Result<()> {
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;
    let user = cli.user.unwrap_or_else(|| config.default_user.clone());

    match cli.command {
        Commands::Eval {
            expression,
            ai,
            no_save,
            json,
        } => {
            let expression = expression.join(" ");
            let options = commands::eval::EvalOptions {
                ai_mode: ai || config.ai_mode,
                save: !no_save,
                json,
                verbose: cli.verbose,
            };
            let ok = commands::eval::run(&config, &user, &expression, &options)?;
            exit_on_failure(ok)
        }

        Commands::Repl { ai } => commands::repl::run(&config, &user, ai || config.ai_mode),

        Commands::History { action } => match action {
            HistoryAction::List { limit } => commands::history::list(&config, &user, limit),
            HistoryAction::Delete { id } => {
                let ok = commands::history::delete(&config, &user, id)?;
                exit_on_failure(ok)
            }
            HistoryAction::Clear => commands::history::clear(&config, &user),
        },

        Commands::Config { action } => {
            let path = cli.config.as_deref();
            match action {
                ConfigAction::Show => commands::config::show(&config),
                ConfigAction::Path => commands::config::show_path(path),
                ConfigAction::SetRate { rate } => commands::config::set_rate(&mut config, path, rate),
                ConfigAction::SetExponent { policy } => {
                    commands::config::set_exponent(&mut config, path, &policy)
                }
                ConfigAction::SetAi { value } => commands::config::set_ai(&mut config, path, &value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_expression(args: &[&str]) -> (String, bool) {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Eval { expression, ai, .. } => (expression.join(" "), ai),
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn test_eval_accepts_leading_minus() {
        assert_eq!(eval_expression(&["calcflow", "eval", "-5+1"]), ("-5+1".to_string(), false));
    }

    #[test]
    fn test_eval_flags_before_expression() {
        assert_eq!(
            eval_expression(&["calcflow", "eval", "--ai", "what", "is", "5", "plus", "3"]),
            ("what is 5 plus 3".to_string(), true)
        );
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

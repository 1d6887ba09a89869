use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, BufRead, Write};
use tally::Evaluator;
use tally::cli::{self, CliError, EvalOptions, ReplOptions};

#[derive(ClapParser)]
#[command(name = "tally")]
#[command(about = "Tally - an interactive calculator with variables and assignment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Repl {
        /// Prompt printed before each line
        #[arg(long, default_value = ">")]
        prompt: String,

        /// Skip the welcome and goodbye lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Evaluate expressions in one shared session
    Eval {
        /// Expressions to evaluate (reads stdin lines if none are given)
        expressions: Vec<String>,

        /// Print one JSON object per expression
        #[arg(long)]
        json: bool,

        /// Only print the tokens of each expression
        #[arg(long)]
        tokens: bool,
    },
}

/// Installs a stderr subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=tally=trace`.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Repl {
        prompt: ReplOptions::default().prompt,
        quiet: false,
    });

    let result = match command {
        Commands::Repl { prompt, quiet } => run_repl(prompt, quiet).map(|()| true),
        Commands::Eval {
            expressions,
            json,
            tokens,
        } => run_eval(expressions, json, tokens),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run_repl(prompt: String, quiet: bool) -> Result<(), CliError> {
    let options = ReplOptions { prompt, quiet };
    let mut evaluator = Evaluator::new();
    cli::run_repl(&mut evaluator, io::stdin().lock(), io::stdout().lock(), &options)
}

/// Returns `Ok(false)` when any expression failed.
fn run_eval(expressions: Vec<String>, json: bool, tokens_only: bool) -> Result<bool, CliError> {
    let expressions = if expressions.is_empty() && !atty::is(atty::Stream::Stdin) {
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        expressions
    };

    let options = EvalOptions {
        expressions,
        tokens_only,
    };

    let mut evaluator = Evaluator::new();
    let reports = cli::execute_eval(&mut evaluator, &options)?;

    let mut out = io::stdout().lock();
    for report in &reports {
        if json {
            writeln!(out, "{}", serde_json::to_string(&report.to_json())?)?;
        } else {
            writeln!(out, "{}", report)?;
        }
    }

    Ok(reports.iter().all(|report| !report.is_failure()))
}

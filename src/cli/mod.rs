//! Shell around the expression engine
//!
//! Provides the interactive loop and one-shot evaluation used by the `tally`
//! binary. Both are generic enough to embed in other tools or drive from
//! tests.

mod eval;
mod repl;

pub use eval::{EvalOptions, LineReport, Outcome, execute_eval};
pub use repl::{BANNER, FAREWELL, ReplOptions, run_repl};

use std::io;

use thiserror::Error;

/// Errors that end a CLI command. Per-line evaluation failures are reported
/// in the output instead.
#[derive(Debug, Error)]
pub enum CliError {
    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    /// JSON encoding error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Pass expressions as arguments or pipe them to stdin.")]
    NoInput,
}

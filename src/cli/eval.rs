//! Evaluate expressions without a prompt

use std::fmt;

use serde_json::json;

use super::CliError;
use crate::{EvalError, Evaluator, Lexer, Token, Value, evaluator::is_blank_or_quit};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// Lines to evaluate, in order, against one shared environment
    pub expressions: Vec<String>,
    /// Only tokenize, don't evaluate
    pub tokens_only: bool,
}

/// What happened to one line
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The line evaluated successfully
    Value(Value),
    /// The line's tokens (tokenize-only mode)
    Tokens(Vec<Token>),
    /// The line failed; later lines still run
    Failed(EvalError),
}

/// Result of one input line
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    pub input: String,
    pub outcome: Outcome,
}

impl LineReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    /// One JSON object per line: `input` plus one of `value`, `tokens`, or
    /// `error` with its `kind`.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.outcome {
            Outcome::Value(value) => json!({
                "input": self.input,
                "value": value.to_json(),
            }),
            Outcome::Tokens(tokens) => json!({
                "input": self.input,
                "tokens": tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            }),
            Outcome::Failed(e) => {
                let mut report = json!({
                    "input": self.input,
                    "error": e.to_string(),
                    "kind": e.kind(),
                });
                if let EvalError::UndeclaredVariable(name) = e {
                    report["name"] = json!(name);
                }
                report
            }
        }
    }

    fn outcome_message(&self) -> String {
        match &self.outcome {
            Outcome::Value(value) => value.to_string(),
            Outcome::Tokens(tokens) => tokens
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            Outcome::Failed(e) => e.to_string(),
        }
    }
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome_message())
    }
}

fn tokenize_line(line: &str) -> Outcome {
    if is_blank_or_quit(line) {
        return Outcome::Tokens(Vec::new());
    }
    match Lexer::new(line).tokenize() {
        Ok(tokens) => Outcome::Tokens(tokens),
        Err(e) => Outcome::Failed(e.into()),
    }
}

/// Evaluate every expression in order
///
/// Failures are recorded per line and do not stop later lines, matching the
/// interactive loop.
pub fn execute_eval(
    evaluator: &mut Evaluator,
    options: &EvalOptions,
) -> Result<Vec<LineReport>, CliError> {
    if options.expressions.is_empty() {
        return Err(CliError::NoInput);
    }

    let reports = options
        .expressions
        .iter()
        .map(|input| {
            let outcome = if options.tokens_only {
                tokenize_line(input)
            } else {
                match evaluator.evaluate(input) {
                    Ok(value) => Outcome::Value(value),
                    Err(e) => Outcome::Failed(e),
                }
            };
            LineReport {
                input: input.clone(),
                outcome,
            }
        })
        .collect();

    Ok(reports)
}

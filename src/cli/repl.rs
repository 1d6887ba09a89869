//! Interactive read-evaluate-print loop

use std::io::{BufRead, Write};

use tracing::debug;

use super::CliError;
use crate::{Evaluator, QUIT_COMMAND};

/// Printed when a session starts.
pub const BANNER: &str = "Welcome to the REPL";

/// Printed when a session ends.
pub const FAREWELL: &str = "Goodbye";

/// Options for the interactive loop
#[derive(Debug, Clone)]
pub struct ReplOptions {
    /// Printed before each line is read
    pub prompt: String,
    /// Skip the banner and farewell lines
    pub quiet: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        ReplOptions {
            prompt: ">".to_string(),
            quiet: false,
        }
    }
}

/// Runs a session until end of input or the quit command.
///
/// Each line's value or failure message is written to `output`; failures
/// never end the session. Only I/O errors are returned.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use tally::Evaluator;
/// use tally::cli::{run_repl, ReplOptions};
///
/// let mut evaluator = Evaluator::new();
/// let mut output = Vec::new();
/// let options = ReplOptions { prompt: "> ".to_string(), quiet: true };
///
/// run_repl(&mut evaluator, Cursor::new("x = 4\nx * x\nquit\n"), &mut output, &options).unwrap();
/// assert_eq!(String::from_utf8(output).unwrap(), "> 4\n> 16\n> \n");
/// ```
pub fn run_repl<R: BufRead, W: Write>(
    evaluator: &mut Evaluator,
    input: R,
    mut output: W,
    options: &ReplOptions,
) -> Result<(), CliError> {
    if !options.quiet {
        writeln!(output, "{}", BANNER)?;
    }

    let mut lines = input.lines();
    loop {
        write!(output, "{}", options.prompt)?;
        output.flush()?;

        let Some(line) = lines.next().transpose()? else {
            // End the prompt line.
            writeln!(output)?;
            break;
        };
        if line.trim() == QUIT_COMMAND {
            // End the prompt line, as at end of input.
            writeln!(output)?;
            break;
        }

        match evaluator.evaluate(&line) {
            Ok(value) => writeln!(output, "{}", value)?,
            Err(e) => {
                debug!(kind = e.kind(), "line failed");
                writeln!(output, "{}", e)?;
            }
        }
    }

    if !options.quiet {
        writeln!(output, "{}", FAREWELL)?;
    }
    Ok(())
}

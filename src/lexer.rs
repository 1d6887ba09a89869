use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;
use tracing::trace;

use crate::ast::{BinOp, Token};

/// One lexeme with its surrounding whitespace. Alternatives are tried in
/// order: single-character symbols, identifiers, then numeric literals.
static LEXEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\s*(?:(?P<symbol>[-+*/%=()])|(?P<identifier>[A-Za-z_][A-Za-z0-9_]*)|(?P<number>[0-9]*\.?[0-9]+))\s*",
    )
    .expect("lexeme pattern is valid")
});

/// Errors raised while splitting a line into tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// Text that is not a number, identifier, or known symbol
    #[error("Syntax error: unexpected '{text}' at offset {offset}")]
    UnexpectedInput { text: String, offset: usize },

    /// A numeric literal that does not parse as `f64`
    #[error("Syntax error: invalid number '{0}'")]
    InvalidNumber(String),
}

/// Splits a line into [`Token`]s.
///
/// The whole line must be covered by lexemes; anything that cannot be
/// attributed to one is a hard error rather than being skipped.
///
/// # Examples
///
/// ```
/// use tally::{BinOp, Lexer, Token};
///
/// let tokens = Lexer::new("x = 2.5 * y").tokenize().unwrap();
/// assert_eq!(tokens, vec![
///     Token::Identifier("x".to_string()),
///     Token::Assignment,
///     Token::Number(2.5),
///     Token::Operator(BinOp::Multiply),
///     Token::Identifier("y".to_string()),
/// ]);
/// ```
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    fn finish(&mut self) {
        self.position = self.input.len();
    }

    /// Reports the unattributable text between the cursor and `end`.
    fn unexpected(&self, end: usize) -> LexError {
        let skipped = &self.input[self.position..end];
        let leading = skipped.len() - skipped.trim_start().len();
        LexError::UnexpectedInput {
            text: skipped.trim().to_string(),
            offset: self.position + leading,
        }
    }

    /// Returns the next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.input[self.position..].trim().is_empty() {
            self.finish();
            return Ok(None);
        }

        let Some(caps) = LEXEME.captures_at(self.input, self.position) else {
            let err = self.unexpected(self.input.len());
            self.finish();
            return Err(err);
        };

        let (start, end) = caps
            .get(0)
            .map_or((self.position, self.input.len()), |m| (m.start(), m.end()));
        if start != self.position {
            let err = self.unexpected(start);
            self.finish();
            return Err(err);
        }
        self.position = end;

        let token = classify(&caps).inspect_err(|_| self.finish())?;
        trace!(%token, "lexed");
        Ok(Some(token))
    }

    /// Consumes the lexer and collects every token of the line.
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Turns a matched lexeme into a token, trying number, identifier, operator,
/// assignment, then parenthesis.
fn classify(caps: &Captures<'_>) -> Result<Token, LexError> {
    if let Some(m) = caps.name("number") {
        let text = m.as_str();
        return text
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| LexError::InvalidNumber(text.to_string()));
    }

    if let Some(m) = caps.name("identifier") {
        return Ok(Token::Identifier(m.as_str().to_string()));
    }

    let (text, offset) = caps
        .name("symbol")
        .map_or(("", 0), |m| (m.as_str(), m.start()));
    let mut chars = text.chars();
    let token = match (chars.next(), chars.next()) {
        (Some('='), None) => Some(Token::Assignment),
        (Some('('), None) => Some(Token::LParen),
        (Some(')'), None) => Some(Token::RParen),
        (Some(c), None) => BinOp::from_symbol(c).map(Token::Operator),
        _ => None,
    };

    token.ok_or_else(|| LexError::UnexpectedInput {
        text: text.to_string(),
        offset,
    })
}

#[test]
fn test_whitespace_is_insignificant() {
    let tight = Lexer::new("(1+x)*3").tokenize().unwrap();
    let loose = Lexer::new("  ( 1 +\tx )  * 3 ").tokenize().unwrap();
    assert_eq!(tight, loose);
    assert_eq!(tight.len(), 7);
}

#[test]
fn test_stops_after_error() {
    let mut lexer = Lexer::new("1 # 2");
    assert_eq!(lexer.next_token(), Ok(Some(Token::Number(1.0))));
    assert!(lexer.next_token().is_err());
    assert_eq!(lexer.next_token(), Ok(None));
    assert_eq!(lexer.position(), 5);
}

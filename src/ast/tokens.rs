use std::fmt;

use super::operators::{BinOp, Precedence};

/// Category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Identifier,
    Operator,
    Assignment,
    LeftParen,
    RightParen,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Assignment => "assignment",
            TokenKind::LeftParen => "left_paren",
            TokenKind::RightParen => "right_paren",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Operands
    /// Integer or decimal literal, always held as `f64`
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// .5
    /// ```
    Number(f64),

    /// Variable name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// or underscores.
    ///
    /// # Examples
    /// ```text
    /// x
    /// total_2
    /// _tmp
    /// ```
    Identifier(String),

    // Symbols
    /// One of `+ - * / %`
    Operator(BinOp),

    /// `=`
    ///
    /// Binds the variable on its left to the value on its right and yields
    /// that value, so it can be chained.
    ///
    /// # Examples
    /// ```text
    /// x = 5
    /// a = b = 2 * x
    /// ```
    Assignment,

    /// `(`
    LParen,

    /// `)`
    RParen,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) => TokenKind::Number,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::Operator(_) => TokenKind::Operator,
            Token::Assignment => TokenKind::Assignment,
            Token::LParen => TokenKind::LeftParen,
            Token::RParen => TokenKind::RightParen,
        }
    }

    /// Rank of a symbol token; operands have none.
    pub fn precedence(&self) -> Option<Precedence> {
        match self {
            Token::Number(_) | Token::Identifier(_) => None,
            Token::Operator(op) => Some(op.precedence()),
            Token::Assignment => Some(Precedence::ASSIGNMENT),
            Token::LParen => Some(Precedence::LEFT_PAREN),
            Token::RParen => Some(Precedence::RIGHT_PAREN),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind().name();
        match self {
            Token::Number(n) => write!(f, "Token({}, {})", kind, n),
            Token::Identifier(name) => write!(f, "Token({}, {})", kind, name),
            Token::Operator(op) => write!(f, "Token({}, {})", kind, op),
            Token::Assignment => write!(f, "Token({}, =)", kind),
            Token::LParen => write!(f, "Token({}, ()", kind),
            Token::RParen => write!(f, "Token({}, ))", kind),
        }
    }
}

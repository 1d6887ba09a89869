//! # Tally - Token Model
//!
//! Tally evaluates one line of arithmetic at a time:
//!
//! ```text
//! > x = 5
//! 5
//! > (x + 1) * 2 % 7
//! 5
//! ```
//!
//! This module holds the pieces shared by the lexer and the evaluator:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Arithmetic operators and the precedence table
//!
//! ## Precedence
//!
//! | Symbol            | Rank |
//! |-------------------|------|
//! | *(empty stack)*   | 0    |
//! | `(`               | 0    |
//! | `=`               | 1    |
//! | `+` `-`           | 2    |
//! | `*` `/` `%`       | 3    |
//! | `)`               | 5    |
//!
//! Arithmetic operators are left associative. Assignment is right
//! associative, so `a = b = 5` binds both names to `5`.
pub mod operators;
pub mod tokens;

pub use operators::{Associativity, BinOp, Precedence};
pub use tokens::{Token, TokenKind};

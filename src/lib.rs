pub mod ast;
pub mod cli;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod value;

pub use ast::{BinOp, Precedence, Token, TokenKind};
pub use environment::Environment;
pub use evaluator::{EvalError, Evaluator, QUIT_COMMAND};
pub use lexer::{LexError, Lexer};
pub use value::Value;

use std::{collections::HashMap, fmt};

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{Associativity, BinOp, Precedence, Token},
    environment::Environment,
    lexer::{LexError, Lexer},
    value::Value,
};

/// Input line that ends an interactive session. Evaluates to [`Value::Empty`].
pub const QUIT_COMMAND: &str = "quit";

/// Errors that can occur while evaluating a line.
///
/// Every variant is fatal to the current line only; the session and its
/// environment are left exactly as they were before the line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The line could not be tokenized
    #[error(transparent)]
    Syntax(#[from] LexError),

    /// A variable was read before it was ever assigned
    #[error("Undefined variable '{0}' called")]
    UndeclaredVariable(String),

    /// `)` with no `(` left on the operator stack
    #[error("Unbalanced parentheses: ')' has no matching '('")]
    UnmatchedRightParen,

    /// `(` still open when the line ended
    #[error("Unbalanced parentheses: '(' is never closed")]
    UnclosedLeftParen,

    /// An operator with nothing on one side, e.g. `3 +` or `* 2`
    #[error("Operator '{0}' is missing an operand")]
    MissingOperand(char),

    /// Empty parentheses, e.g. `()`
    #[error("Expression produced no value")]
    EmptyExpression,

    /// An operand or `(` where an operator was expected, e.g. the `4` in `3 4`
    #[error("Unexpected '{0}': expected an operator")]
    DanglingOperand(String),

    /// The left side of `=` is not a variable name
    #[error("Cannot assign to '{0}': assignment target must be a variable")]
    InvalidAssignmentTarget(String),
}

impl EvalError {
    /// Stable snake_case tag for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::Syntax(_) => "syntax",
            EvalError::UndeclaredVariable(_) => "undeclared_variable",
            EvalError::UnmatchedRightParen | EvalError::UnclosedLeftParen => "unbalanced_parens",
            EvalError::MissingOperand(_) => "missing_operand",
            EvalError::EmptyExpression => "empty_expression",
            EvalError::DanglingOperand(_) => "dangling_operand",
            EvalError::InvalidAssignmentTarget(_) => "invalid_assignment_target",
        }
    }
}

/// Returns true for lines that evaluate to nothing: blank, whitespace-only,
/// or the quit command.
pub fn is_blank_or_quit(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line == QUIT_COMMAND
}

/// Operand stack entry. Identifiers stay unresolved until an operator
/// consumes them or they are the final result.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Number(f64),
    Identifier(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Identifier(name) => write!(f, "{}", name),
        }
    }
}

/// Operator stack entry.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Binary(BinOp),
    Assign,
    LParen,
}

impl Pending {
    fn precedence(self) -> Precedence {
        match self {
            Pending::Binary(op) => op.precedence(),
            Pending::Assign => Precedence::ASSIGNMENT,
            Pending::LParen => Precedence::LEFT_PAREN,
        }
    }

    fn associativity(self) -> Associativity {
        match self {
            Pending::Assign => Associativity::Right,
            Pending::Binary(_) | Pending::LParen => Associativity::Left,
        }
    }

    fn symbol(self) -> char {
        match self {
            Pending::Binary(op) => op.symbol(),
            Pending::Assign => '=',
            Pending::LParen => '(',
        }
    }

    /// Whether an operator of rank `top` must be reduced before `self` is
    /// pushed on top of it.
    fn yields_to(self, top: Precedence) -> bool {
        match self.associativity() {
            Associativity::Left => top >= self.precedence(),
            Associativity::Right => top > self.precedence(),
        }
    }
}

/// Two-stack state for a single line.
///
/// Tokens must alternate between operands and operators; `expect_operand`
/// tracks which one comes next. Bindings are staged here and only reach the
/// [`Environment`] once the whole line has evaluated successfully.
struct Machine<'env> {
    env: &'env Environment,
    operators: Vec<Pending>,
    operands: Vec<Operand>,
    staged: HashMap<String, f64>,
    expect_operand: bool,
}

impl<'env> Machine<'env> {
    fn new(env: &'env Environment) -> Self {
        Machine {
            env,
            operators: Vec::new(),
            operands: Vec::new(),
            staged: HashMap::new(),
            expect_operand: true,
        }
    }

    fn feed(&mut self, token: &Token) -> Result<(), EvalError> {
        match token {
            Token::Number(n) => self.push_operand(Operand::Number(*n))?,
            Token::Identifier(name) => self.push_operand(Operand::Identifier(name.clone()))?,
            Token::LParen => {
                if !self.expect_operand {
                    return Err(EvalError::DanglingOperand("(".to_string()));
                }
                self.operators.push(Pending::LParen);
            }
            Token::RParen => {
                if self.expect_operand {
                    return Err(match self.operators.last() {
                        Some(Pending::LParen) => EvalError::EmptyExpression,
                        Some(top) => EvalError::MissingOperand(top.symbol()),
                        None => EvalError::UnmatchedRightParen,
                    });
                }
                self.close_group()?;
            }
            Token::Operator(op) => self.push_operator(Pending::Binary(*op))?,
            Token::Assignment => self.push_operator(Pending::Assign)?,
        }
        Ok(())
    }

    fn push_operand(&mut self, operand: Operand) -> Result<(), EvalError> {
        if !self.expect_operand {
            return Err(EvalError::DanglingOperand(operand.to_string()));
        }
        self.operands.push(operand);
        self.expect_operand = false;
        Ok(())
    }

    fn top_precedence(&self) -> Precedence {
        self.operators
            .last()
            .map_or(Precedence::SENTINEL, |top| top.precedence())
    }

    fn push_operator(&mut self, incoming: Pending) -> Result<(), EvalError> {
        if self.expect_operand {
            return Err(EvalError::MissingOperand(incoming.symbol()));
        }
        // Anything ranked above the sentinel means the stack is non-empty.
        while incoming.yields_to(self.top_precedence()) {
            if let Some(top) = self.operators.pop() {
                self.apply(top)?;
            }
        }
        self.operators.push(incoming);
        self.expect_operand = true;
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), EvalError> {
        loop {
            match self.operators.pop() {
                Some(Pending::LParen) => return Ok(()),
                Some(op) => self.apply(op)?,
                None => return Err(EvalError::UnmatchedRightParen),
            }
        }
    }

    fn pop_pair(&mut self, op: Pending) -> Result<(Operand, Operand), EvalError> {
        let right = self.operands.pop();
        let left = self.operands.pop();
        match (left, right) {
            (Some(left), Some(right)) => Ok((left, right)),
            _ => Err(EvalError::MissingOperand(op.symbol())),
        }
    }

    fn resolve(&self, operand: &Operand) -> Result<f64, EvalError> {
        match operand {
            Operand::Number(n) => Ok(*n),
            Operand::Identifier(name) => match self.staged.get(name) {
                Some(value) => Ok(*value),
                None => self.env.get(name),
            },
        }
    }

    /// Reduces one operator against the top two operands.
    fn apply(&mut self, op: Pending) -> Result<(), EvalError> {
        match op {
            Pending::LParen => Err(EvalError::UnclosedLeftParen),
            Pending::Assign => {
                let (target, source) = self.pop_pair(op)?;
                let name = match target {
                    Operand::Identifier(name) => name,
                    other => return Err(EvalError::InvalidAssignmentTarget(other.to_string())),
                };
                let value = self.resolve(&source)?;
                trace!(%name, value, "staged binding");
                self.staged.insert(name, value);
                self.operands.push(Operand::Number(value));
                Ok(())
            }
            Pending::Binary(bin) => {
                let (left, right) = self.pop_pair(op)?;
                let result = bin.apply(self.resolve(&left)?, self.resolve(&right)?);
                trace!(%left, op = %bin, %right, result, "reduced");
                self.operands.push(Operand::Number(result));
                Ok(())
            }
        }
    }

    /// Drains the operator stack and resolves the single remaining operand.
    fn finish(mut self) -> Result<(f64, HashMap<String, f64>), EvalError> {
        while let Some(op) = self.operators.pop() {
            self.apply(op)?;
        }

        let result = self.operands.pop().ok_or(EvalError::EmptyExpression)?;
        if let Some(extra) = self.operands.pop() {
            return Err(EvalError::DanglingOperand(extra.to_string()));
        }

        let value = self.resolve(&result)?;
        Ok((value, self.staged))
    }
}

/// The expression engine.
///
/// Owns the variable [`Environment`] for the lifetime of a session and
/// evaluates one line at a time with a two-stack precedence algorithm.
#[derive(Debug, Default)]
pub struct Evaluator {
    env: Environment,
}

impl Evaluator {
    /// Creates a new evaluator with an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Evaluates one line of input.
    ///
    /// Blank lines and [`QUIT_COMMAND`] yield [`Value::Empty`] without
    /// touching the environment. Any other line is tokenized and evaluated;
    /// on failure no binding made by the line is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally::{EvalError, Evaluator, Value};
    ///
    /// let mut evaluator = Evaluator::new();
    /// assert_eq!(evaluator.evaluate("3 + 4 * 2"), Ok(Value::Number(11.0)));
    /// assert_eq!(evaluator.evaluate("x = 5"), Ok(Value::Number(5.0)));
    /// assert_eq!(evaluator.evaluate("x + 1"), Ok(Value::Number(6.0)));
    /// assert_eq!(
    ///     evaluator.evaluate("y + 1"),
    ///     Err(EvalError::UndeclaredVariable("y".to_string()))
    /// );
    /// assert_eq!(evaluator.evaluate("quit"), Ok(Value::Empty));
    /// ```
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&mut self, line: &str) -> Result<Value, EvalError> {
        if is_blank_or_quit(line) {
            return Ok(Value::Empty);
        }

        let tokens = Lexer::new(line).tokenize()?;
        self.eval_tokens(&tokens)
    }

    /// Evaluates an already tokenized line.
    pub fn eval_tokens(&mut self, tokens: &[Token]) -> Result<Value, EvalError> {
        if tokens.is_empty() {
            return Ok(Value::Empty);
        }

        let mut machine = Machine::new(&self.env);
        for token in tokens {
            machine.feed(token)?;
        }
        let (value, staged) = machine.finish()?;

        for (name, bound) in &staged {
            debug!(%name, value = bound, "bound variable");
        }
        self.env.extend(staged);

        Ok(Value::Number(value))
    }
}

use std::fmt;

/// Binding strength of a symbol on the operator stack.
///
/// Higher ranks bind tighter and are reduced first. The table is total over
/// every symbol the lexer produces, plus [`Precedence::SENTINEL`] for an empty
/// operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precedence(u8);

impl Precedence {
    /// Rank of the "no operator" position below the bottom of the stack.
    pub const SENTINEL: Precedence = Precedence(0);
    /// `(`
    pub const LEFT_PAREN: Precedence = Precedence(0);
    /// `=`
    pub const ASSIGNMENT: Precedence = Precedence(1);
    /// `+` and `-`
    pub const ADDITIVE: Precedence = Precedence(2);
    /// `*`, `/` and `%`
    pub const MULTIPLICATIVE: Precedence = Precedence(3);
    /// `)`
    pub const RIGHT_PAREN: Precedence = Precedence(5);

    pub fn rank(self) -> u8 {
        self.0
    }
}

/// How ties between equal ranks are broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`)
    Modulo,
}

impl BinOp {
    pub fn from_symbol(symbol: char) -> Option<BinOp> {
        match symbol {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Subtract),
            '*' => Some(BinOp::Multiply),
            '/' => Some(BinOp::Divide),
            '%' => Some(BinOp::Modulo),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Subtract => '-',
            BinOp::Multiply => '*',
            BinOp::Divide => '/',
            BinOp::Modulo => '%',
        }
    }

    pub fn precedence(self) -> Precedence {
        match self {
            BinOp::Add | BinOp::Subtract => Precedence::ADDITIVE,
            BinOp::Multiply | BinOp::Divide | BinOp::Modulo => Precedence::MULTIPLICATIVE,
        }
    }

    /// Applies the operator with IEEE-754 semantics.
    ///
    /// Division or remainder by zero yields infinity or NaN rather than an
    /// error, and `%` is the truncated remainder of `f64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally::BinOp;
    ///
    /// assert_eq!(BinOp::Subtract.apply(7.0, 2.0), 5.0);
    /// assert_eq!(BinOp::Modulo.apply(7.5, 2.0), 1.5);
    /// assert!(BinOp::Divide.apply(1.0, 0.0).is_infinite());
    /// ```
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinOp::Add => left + right,
            BinOp::Subtract => left - right,
            BinOp::Multiply => left * right,
            BinOp::Divide => left / right,
            BinOp::Modulo => left % right,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[test]
fn test_ranks_are_ordered() {
    assert!(Precedence::SENTINEL < Precedence::ASSIGNMENT);
    assert!(Precedence::ASSIGNMENT < BinOp::Add.precedence());
    assert!(BinOp::Subtract.precedence() < BinOp::Modulo.precedence());
    assert_eq!(Precedence::LEFT_PAREN, Precedence::SENTINEL);
    assert_eq!(Precedence::RIGHT_PAREN.rank(), 5);
}


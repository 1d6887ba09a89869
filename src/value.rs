use std::fmt;

/// The result of evaluating one line.
///
/// Blank lines and the quit command produce [`Value::Empty`]; every other
/// successful evaluation produces a number.
///
/// # Examples
///
/// ```
/// use tally::Value;
///
/// assert_eq!(Value::Number(11.0).to_string(), "11");
/// assert_eq!(Value::Number(2.5).to_string(), "2.5");
/// assert_eq!(Value::Empty.to_string(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Nothing to report
    Empty,

    /// Result of an expression
    Number(f64),
}

impl Value {
    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Empty => None,
        }
    }

    /// Converts to a JSON value.
    ///
    /// Non-finite numbers have no JSON representation and are rendered as
    /// strings (`"inf"`, `"NaN"`).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Empty => serde_json::Value::Null,
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(n.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) => write!(f, "{}", n),
        }
    }
}

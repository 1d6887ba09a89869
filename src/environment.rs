use std::collections::HashMap;

use crate::evaluator::EvalError;

/// Flat, session-lifetime mapping from variable name to its last assigned
/// value.
///
/// Names only appear after a successful assignment. Reading a name that was
/// never assigned is an error rather than a default.
///
/// # Examples
///
/// ```
/// use tally::{Environment, EvalError};
///
/// let mut env = Environment::new();
/// assert_eq!(env.get("x"), Err(EvalError::UndeclaredVariable("x".to_string())));
///
/// env.set("x", 5.0);
/// assert_eq!(env.get("x"), Ok(5.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: HashMap<String, f64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Result<f64, EvalError> {
        self.vars
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UndeclaredVariable(name.to_string()))
    }

    /// Binds `name`, overwriting any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.vars.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Extend<(String, f64)> for Environment {
    fn extend<I: IntoIterator<Item = (String, f64)>>(&mut self, bindings: I) {
        self.vars.extend(bindings);
    }
}

#[test]
fn test_set_overwrites() {
    let mut env = Environment::new();
    env.set("total", 1.0);
    env.set("total", 2.5);
    assert_eq!(env.get("total"), Ok(2.5));
    assert_eq!(env.len(), 1);
}

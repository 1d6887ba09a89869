// Arithmetic on literal-only expressions must match a direct evaluation of
// the same tree under the usual precedence and left associativity.

use proptest::prelude::*;
use tally::{BinOp, Evaluator, Value};

#[derive(Debug, Clone)]
enum Tree {
    Literal(u32),
    Binary(BinOp, Box<Tree>, Box<Tree>),
}

impl Tree {
    fn eval(&self) -> f64 {
        match self {
            Tree::Literal(n) => f64::from(*n),
            Tree::Binary(op, left, right) => op.apply(left.eval(), right.eval()),
        }
    }

    /// Renders with the fewest parentheses that still preserve the tree.
    fn render(&self) -> String {
        match self {
            Tree::Literal(n) => n.to_string(),
            Tree::Binary(op, left, right) => {
                let rank = op.precedence();
                let left = match left.as_ref() {
                    Tree::Binary(inner, ..) if inner.precedence() < rank => {
                        format!("({})", left.render())
                    }
                    _ => left.render(),
                };
                let right = match right.as_ref() {
                    Tree::Binary(inner, ..) if inner.precedence() <= rank => {
                        format!("({})", right.render())
                    }
                    _ => right.render(),
                };
                format!("{} {} {}", left, op, right)
            }
        }
    }
}

fn bin_op() -> impl Strategy<Value = BinOp> {
    prop_oneof![
        Just(BinOp::Add),
        Just(BinOp::Subtract),
        Just(BinOp::Multiply),
        Just(BinOp::Divide),
        Just(BinOp::Modulo),
    ]
}

fn tree() -> impl Strategy<Value = Tree> {
    let leaf = (0u32..1000).prop_map(Tree::Literal);
    leaf.prop_recursive(5, 32, 2, |inner| {
        (bin_op(), inner.clone(), inner)
            .prop_map(|(op, left, right)| Tree::Binary(op, Box::new(left), Box::new(right)))
    })
}

fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

proptest! {
    #[test]
    fn minimal_parentheses_match_tree(tree in tree()) {
        let line = tree.render();
        let result = Evaluator::new().evaluate(&line);
        let expected = tree.eval();
        match result {
            Ok(Value::Number(n)) => prop_assert!(same(n, expected), "{} gave {} expected {}", line, n, expected),
            other => prop_assert!(false, "{} gave {:?}", line, other),
        }
    }

    #[test]
    fn redundant_parentheses_do_not_change_result(tree in tree()) {
        let line = tree.render();
        let wrapped = format!("(({}))", line);
        let mut evaluator = Evaluator::new();
        let plain = evaluator.evaluate(&line).map(|v| v.as_number());
        let grouped = evaluator.evaluate(&wrapped).map(|v| v.as_number());
        match (plain, grouped) {
            (Ok(Some(a)), Ok(Some(b))) => prop_assert!(same(a, b)),
            other => prop_assert!(false, "{} gave {:?}", line, other),
        }
    }

    #[test]
    fn evaluation_is_idempotent(tree in tree()) {
        let line = tree.render();
        let mut evaluator = Evaluator::new();
        let first = evaluator.evaluate(&line).map(|v| v.as_number());
        let second = evaluator.evaluate(&line).map(|v| v.as_number());
        match (first, second) {
            (Ok(Some(a)), Ok(Some(b))) => prop_assert!(same(a, b)),
            other => prop_assert!(false, "{} gave {:?}", line, other),
        }
        prop_assert!(evaluator.environment().is_empty());
    }

    #[test]
    fn assigned_value_reads_back(tree in tree(), name in "[a-z_][a-z0-9_]{0,6}") {
        prop_assume!(name != "quit");
        let mut evaluator = Evaluator::new();
        let assigned = evaluator.evaluate(&format!("{} = {}", name, tree.render()));
        let read = evaluator.evaluate(&name);
        match (assigned, read) {
            (Ok(Value::Number(a)), Ok(Value::Number(b))) => prop_assert!(same(a, b) && same(a, tree.eval())),
            other => prop_assert!(false, "{} gave {:?}", name, other),
        }
    }
}

//! Structural-recursion evaluator
//!
//! Once an expression has compiled, evaluation is total: absent table
//! indexes read as defaults, and numeric edge cases (division by zero,
//! domain violations) follow IEEE-754 instead of erroring.

use serde::Serialize;

use super::ast::{BinaryOp, Expr, Table, UnaryOp};
use crate::sample::Sample;

/// Result of evaluating an expression against one [`Sample`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    /// Numeric view; booleans coerce to 1.0 / 0.0
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Number(n) => n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
        }
    }

    /// Truth view; numbers are true iff non-zero
    pub fn truthy(self) -> bool {
        match self {
            Value::Number(n) => n != 0.0,
            Value::Bool(b) => b,
        }
    }
}

impl From<Value> for serde_yaml::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => serde_yaml::Value::Number(n.into()),
            Value::Bool(b) => serde_yaml::Value::Bool(b),
        }
    }
}

pub(crate) fn eval(expr: &Expr, sample: &Sample) -> Value {
    match expr {
        Expr::Number(n) => Value::Number(*n),
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Lookup { table, index } => match table {
            Table::Axis => Value::Number(sample.axis(*index)),
            Table::Button => Value::Bool(sample.button(*index)),
            Table::Toggle => Value::Bool(sample.toggle(*index)),
        },
        Expr::Unary { op, operand } => {
            let v = eval(operand, sample);
            match op {
                UnaryOp::Neg => Value::Number(-v.as_f64()),
                UnaryOp::Not => Value::Bool(!v.truthy()),
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            // Short-circuit operators return the deciding operand, so a
            // numeric default like `axis[0] or 0.5` stays numeric.
            match op {
                BinaryOp::And => {
                    let l = eval(lhs, sample);
                    return if l.truthy() { eval(rhs, sample) } else { l };
                }
                BinaryOp::Or => {
                    let l = eval(lhs, sample);
                    return if l.truthy() { l } else { eval(rhs, sample) };
                }
                _ => {}
            }
            let l = eval(lhs, sample).as_f64();
            let r = eval(rhs, sample).as_f64();
            match op {
                BinaryOp::Add => Value::Number(l + r),
                BinaryOp::Sub => Value::Number(l - r),
                BinaryOp::Mul => Value::Number(l * r),
                BinaryOp::Div => Value::Number(l / r),
                BinaryOp::Rem => Value::Number(l % r),
                BinaryOp::Pow => Value::Number(l.powf(r)),
                BinaryOp::Lt => Value::Bool(l < r),
                BinaryOp::Le => Value::Bool(l <= r),
                BinaryOp::Gt => Value::Bool(l > r),
                BinaryOp::Ge => Value::Bool(l >= r),
                BinaryOp::Eq => Value::Bool(l == r),
                BinaryOp::Ne => Value::Bool(l != r),
                BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
            }
        }
        Expr::Call1 { func, arg, .. } => Value::Number(func(eval(arg, sample).as_f64())),
        Expr::Call2 { func, args, .. } => {
            let a = eval(&args.0, sample).as_f64();
            let b = eval(&args.1, sample).as_f64();
            Value::Number(func(a, b))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::compile;

    fn run(text: &str, sample: &Sample) -> Value {
        compile(text).unwrap().evaluate(sample)
    }

    fn number(text: &str, sample: &Sample) -> f64 {
        match run(text, sample) {
            Value::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn arithmetic() {
        let s = Sample::new();
        assert_eq!(number("1 + 2 * 3", &s), 7.0);
        assert_eq!(number("(1 + 2) * 3", &s), 9.0);
        assert_eq!(number("7 % 3", &s), 1.0);
        assert_eq!(number("2 ** 10", &s), 1024.0);
        assert_eq!(number("-2 ** 2", &s), -4.0);
    }

    #[test]
    fn division_by_zero_follows_ieee754() {
        let s = Sample::new();
        assert!(number("1 / 0", &s).is_infinite());
        assert!(number("0 / 0", &s).is_nan());
    }

    #[test]
    fn lookups_with_defaults() {
        let s = Sample::new().with_axis(0, 0.5).with_button(2, true);
        assert_eq!(run("axis[0]", &s), Value::Number(0.5));
        assert_eq!(run("axis[9]", &s), Value::Number(0.0));
        assert_eq!(run("button[2]", &s), Value::Bool(true));
        assert_eq!(run("button[9]", &s), Value::Bool(false));
        assert_eq!(run("toggle[9]", &s), Value::Bool(false));
    }

    #[test]
    fn booleans_coerce_in_arithmetic() {
        let s = Sample::new().with_button(2, true);
        assert_eq!(number("button[2] + 1", &s), 2.0);
        assert_eq!(number("true * 3", &s), 3.0);
    }

    #[test]
    fn and_or_return_the_deciding_operand() {
        let s = Sample::new().with_axis(0, 0.0).with_toggle(1, true);
        // axis[0] is 0.0, falsy, so `or` yields the right operand
        assert_eq!(run("axis[0] or 0.5", &s), Value::Number(0.5));
        assert_eq!(run("toggle[1] and 2.0", &s), Value::Number(2.0));
        assert_eq!(run("toggle[9] and 2.0", &s), Value::Bool(false));
    }

    #[test]
    fn short_circuit_skips_right_operand() {
        let s = Sample::new();
        // 1/0 on the right is never reached
        assert_eq!(run("false and 1 / 0", &s), Value::Bool(false));
        assert_eq!(run("true or 1 / 0", &s), Value::Bool(true));
    }

    #[test]
    fn not_and_comparisons() {
        let s = Sample::new().with_axis(0, 0.5);
        assert_eq!(run("not toggle[1]", &s), Value::Bool(true));
        assert_eq!(run("axis[0] > 0.4", &s), Value::Bool(true));
        assert_eq!(run("axis[0] == 0.5", &s), Value::Bool(true));
        assert_eq!(run("axis[0] != 0.5", &s), Value::Bool(false));
        // booleans compare numerically
        assert_eq!(run("true == 1", &s), Value::Bool(true));
    }

    #[test]
    fn math_functions() {
        let s = Sample::new().with_axis(0, 0.5);
        let foo = number("sin(axis[0] + 1.0)", &s);
        assert!((foo - (1.5f64).sin()).abs() < 1e-12);
        assert_eq!(number("max(axis[0], 0.9)", &s), 0.9);
        assert_eq!(number("atan2(0, 1)", &s), 0.0);
        assert_eq!(number("round(2.5)", &s), 3.0);
    }

    #[test]
    fn constants_in_context() {
        let s = Sample::new();
        assert!((number("cos(pi)", &s) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn evaluation_is_deterministic_per_sample() {
        let s = Sample::new().with_axis(3, -0.25);
        let compiled = compile("abs(axis[3]) * 4").unwrap();
        assert_eq!(compiled.evaluate(&s), compiled.evaluate(&s));
    }

    #[test]
    fn value_serializes_untagged() {
        assert_eq!(serde_yaml::to_string(&Value::Number(1.5)).unwrap(), "1.5\n");
        assert_eq!(serde_yaml::to_string(&Value::Bool(true)).unwrap(), "true\n");
    }
}

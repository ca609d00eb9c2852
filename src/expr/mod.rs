//! Expression compiler and evaluator
//!
//! Compiles a restricted, Python-flavored expression grammar into a reusable
//! [`CompiledExpr`] that is safe to run repeatedly against live input state:
//!
//! - `axis[i]`, `button[i]`, `toggle[i]` table lookups (integer literal
//!   indexes only), defaulting to `0.0` / `false` for absent indexes
//! - arithmetic (`+ - * / % **`), comparisons, `and`/`or`/`not`
//! - a fixed allow-list of pure math functions and constants
//!
//! There is deliberately no general call syntax, attribute access, or
//! control flow: everything an expression can do is decided at compile time,
//! so evaluation cannot escape into host code no matter what state it sees.

mod ast;
mod eval;
mod functions;
mod lexer;
mod parser;

use thiserror::Error;
use tracing::trace;

use crate::sample::Sample;

pub use eval::Value;

/// Compile failure. Positions are byte offsets into the expression text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("unexpected character {ch:?} at offset {position}")]
    UnexpectedChar { position: usize, ch: char },

    #[error("invalid numeric literal {text:?} at offset {position}")]
    InvalidNumber { position: usize, text: String },

    #[error("syntax error at offset {position}: {details}")]
    UnexpectedToken { position: usize, details: String },

    #[error("unexpected end of expression: {details}")]
    UnexpectedEnd { details: String },

    #[error("unknown symbol '{name}' at offset {position}")]
    UnknownSymbol { position: usize, name: String },

    #[error("unknown function '{name}' at offset {position}; only allow-listed math functions may be called")]
    UnknownFunction { position: usize, name: String },

    #[error("index for table '{table}' at offset {position} must be a non-negative integer literal")]
    NonIntegerIndex { position: usize, table: &'static str },

    #[error("function '{name}' at offset {position} takes {expected} argument(s), got {got}")]
    WrongArity {
        position: usize,
        name: String,
        expected: usize,
        got: usize,
    },
}

/// An immutable, reusable compiled expression
///
/// Holds no state of its own; `evaluate` is a pure function of the given
/// [`Sample`], so one instance may serve any number of evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpr {
    root: ast::Expr,
}

impl CompiledExpr {
    /// Evaluate against one snapshot. Total: never fails, never mutates.
    pub fn evaluate(&self, sample: &Sample) -> Value {
        eval::eval(&self.root, sample)
    }
}

/// Compile an expression. Pure and deterministic: the same text always
/// yields the same [`CompiledExpr`] or the same error.
pub fn compile(text: &str) -> Result<CompiledExpr, ExprError> {
    let tokens = lexer::tokenize(text)?;
    let root = parser::parse(tokens)?;
    trace!(text, "compiled expression");
    Ok(CompiledExpr { root })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_is_deterministic() {
        let a = compile("sin(axis[0] + 1.0)").unwrap();
        let b = compile("sin(axis[0] + 1.0)").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn compiled_expr_is_reusable_across_samples() {
        let compiled = compile("axis[0] * 2").unwrap();
        let first = Sample::new().with_axis(0, 1.0);
        let second = Sample::new().with_axis(0, -1.0);
        assert_eq!(compiled.evaluate(&first), Value::Number(2.0));
        assert_eq!(compiled.evaluate(&second), Value::Number(-2.0));
        // the earlier sample still reads the same
        assert_eq!(compiled.evaluate(&first), Value::Number(2.0));
    }

    #[test]
    fn syntax_error_surfaces_offset() {
        match compile("1 + @") {
            Err(ExprError::UnexpectedChar { position, ch: '@' }) => assert_eq!(position, 4),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

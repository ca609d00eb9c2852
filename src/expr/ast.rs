//! Closed AST node set for compiled expressions
//!
//! Safety hinges on this set being closed: there is no general call node, no
//! attribute access and no control flow. Function calls are resolved against
//! the allow-list at compile time, so the evaluator can only ever reach pure
//! math on plain floats.

/// The three indexable input tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Axis,
    Button,
    Toggle,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Axis => "axis",
            Table::Button => "button",
            Table::Toggle => "toggle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

/// One expression node. Calls carry the resolved function pointer; the name
/// is retained for diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Bool(bool),
    Lookup {
        table: Table,
        index: u32,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call1 {
        name: &'static str,
        func: fn(f64) -> f64,
        arg: Box<Expr>,
    },
    Call2 {
        name: &'static str,
        func: fn(f64, f64) -> f64,
        args: Box<(Expr, Expr)>,
    },
}

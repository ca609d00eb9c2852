//! Recursive-descent parser for the expression grammar
//!
//! Precedence, loosest first: `or`, `and`, `not`, comparisons
//! (non-associative), `+ -`, `* / %`, unary `+ -`, `**` (right-associative),
//! atoms. Identifiers resolve at parse time to a table lookup, an
//! allow-listed function call, or a named constant; anything else fails here
//! and never reaches evaluation.

use super::ast::{BinaryOp, Expr, Table, UnaryOp};
use super::functions;
use super::lexer::{Spanned, Token};
use super::ExprError;

pub fn parse(tokens: Vec<Spanned>) -> Result<Expr, ExprError> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.or_expr()?;
    if let Some(next) = parser.peek() {
        return Err(ExprError::UnexpectedToken {
            position: next.position,
            details: format!("expected an operator or end of expression, found {}", next.token.describe()),
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).cloned();
        if spanned.is_some() {
            self.pos += 1;
        }
        spanned
    }

    /// Consume the next token if it equals `token`
    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().map(|s| &s.token) == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the next token if it is the keyword `word`
    fn eat_keyword(&mut self, word: &str) -> bool {
        match self.peek() {
            Some(Spanned { token: Token::Ident(s), .. }) if s == word => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, token: Token, context: &str) -> Result<(), ExprError> {
        match self.bump() {
            Some(spanned) if spanned.token == token => Ok(()),
            Some(spanned) => Err(ExprError::UnexpectedToken {
                position: spanned.position,
                details: format!("expected {} {}, found {}", token.describe(), context, spanned.token.describe()),
            }),
            None => Err(ExprError::UnexpectedEnd {
                details: format!("expected {} {}", token.describe(), context),
            }),
        }
    }

    fn or_expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.and_expr()?;
        while self.eat_keyword("or") {
            let rhs = self.and_expr()?;
            lhs = Expr::Binary { op: BinaryOp::Or, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.not_expr()?;
        while self.eat_keyword("and") {
            let rhs = self.not_expr()?;
            lhs = Expr::Binary { op: BinaryOp::And, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Expr, ExprError> {
        if self.eat_keyword("not") {
            let operand = self.not_expr()?;
            return Ok(Expr::Unary { op: UnaryOp::Not, operand: Box::new(operand) });
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, ExprError> {
        let lhs = self.sum()?;
        let op = match self.peek().map(|s| &s.token) {
            Some(Token::Lt) => BinaryOp::Lt,
            Some(Token::Le) => BinaryOp::Le,
            Some(Token::Gt) => BinaryOp::Gt,
            Some(Token::Ge) => BinaryOp::Ge,
            Some(Token::EqEq) => BinaryOp::Eq,
            Some(Token::Ne) => BinaryOp::Ne,
            _ => return Ok(lhs),
        };
        self.pos += 1;
        let rhs = self.sum()?;
        // Non-associative: a second comparison operator is an error
        if let Some(next) = self.peek() {
            if matches!(
                next.token,
                Token::Lt | Token::Le | Token::Gt | Token::Ge | Token::EqEq | Token::Ne
            ) {
                return Err(ExprError::UnexpectedToken {
                    position: next.position,
                    details: "comparison chaining is not supported".to_string(),
                });
            }
        }
        Ok(Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) })
    }

    fn sum(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
    }

    fn term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|s| &s.token) {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) };
        }
    }

    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&Token::Minus) {
            let operand = self.unary()?;
            return Ok(Expr::Unary { op: UnaryOp::Neg, operand: Box::new(operand) });
        }
        if self.eat(&Token::Plus) {
            // Unary plus is a no-op
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.atom()?;
        if self.eat(&Token::StarStar) {
            // Right-associative; the exponent may carry its own unary sign
            let exponent = self.unary()?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, ExprError> {
        let spanned = self.bump().ok_or_else(|| ExprError::UnexpectedEnd {
            details: "expected a value".to_string(),
        })?;
        match spanned.token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::LParen => {
                let inner = self.or_expr()?;
                self.expect(Token::RParen, "to close the group")?;
                Ok(inner)
            }
            Token::Ident(name) => self.symbol(name, spanned.position),
            other => Err(ExprError::UnexpectedToken {
                position: spanned.position,
                details: format!("expected a value, found {}", other.describe()),
            }),
        }
    }

    /// Resolve an identifier: boolean literal, table lookup, allow-listed
    /// function call, or named constant.
    fn symbol(&mut self, name: String, position: usize) -> Result<Expr, ExprError> {
        match name.as_str() {
            "true" | "True" => return Ok(Expr::Bool(true)),
            "false" | "False" => return Ok(Expr::Bool(false)),
            "and" | "or" | "not" => {
                return Err(ExprError::UnexpectedToken {
                    position,
                    details: format!("expected a value, found keyword '{name}'"),
                })
            }
            _ => {}
        }

        let table = match name.as_str() {
            "axis" => Some(Table::Axis),
            "button" => Some(Table::Button),
            "toggle" => Some(Table::Toggle),
            _ => None,
        };

        if self.eat(&Token::LBracket) {
            let table = table.ok_or_else(|| ExprError::UnknownSymbol {
                position,
                name: name.clone(),
            })?;
            let index = self.index_literal(table)?;
            self.expect(Token::RBracket, "to close the index")?;
            return Ok(Expr::Lookup { table, index });
        }

        if self.eat(&Token::LParen) {
            return self.call(&name, position);
        }

        if let Some(table) = table {
            // Bare table name without an index
            return Err(ExprError::UnexpectedToken {
                position,
                details: format!("table '{}' must be indexed, e.g. {}[0]", table.name(), table.name()),
            });
        }

        match functions::CONSTANTS.get(name.as_str()) {
            Some(&value) => Ok(Expr::Number(value)),
            None => Err(ExprError::UnknownSymbol { position, name }),
        }
    }

    fn index_literal(&mut self, table: Table) -> Result<u32, ExprError> {
        let spanned = self.bump().ok_or_else(|| ExprError::UnexpectedEnd {
            details: format!("expected an index for table '{}'", table.name()),
        })?;
        let position = spanned.position;
        if let Token::Number(value) = spanned.token {
            if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
                return Ok(value as u32);
            }
        }
        Err(ExprError::NonIntegerIndex { position, table: table.name() })
    }

    fn call(&mut self, name: &str, position: usize) -> Result<Expr, ExprError> {
        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.or_expr()?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(Token::RParen, "to close the argument list")?;
                break;
            }
        }

        if let Some((&key, &func)) = functions::UNARY.get_key_value(name) {
            if args.len() != 1 {
                return Err(ExprError::WrongArity {
                    position,
                    name: name.to_string(),
                    expected: 1,
                    got: args.len(),
                });
            }
            let arg = args.pop().unwrap();
            return Ok(Expr::Call1 { name: key, func, arg: Box::new(arg) });
        }

        if let Some((&key, &func)) = functions::BINARY.get_key_value(name) {
            if args.len() != 2 {
                return Err(ExprError::WrongArity {
                    position,
                    name: name.to_string(),
                    expected: 2,
                    got: args.len(),
                });
            }
            let second = args.pop().unwrap();
            let first = args.pop().unwrap();
            return Ok(Expr::Call2 { name: key, func, args: Box::new((first, second)) });
        }

        Err(ExprError::UnknownFunction { position, name: name.to_string() })
    }
}

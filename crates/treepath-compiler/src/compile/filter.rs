//! Filter expressions.
//!
//! Precedence, loosest first:
//!
//! ```text
//! or         := and ("||" and)*
//! and        := unary ("&&" unary)*
//! unary      := "!" unary | comparison
//! comparison := primary (op primary)?
//! primary    := "(" or ")" | operand
//! ```

use treepath_core::{Predicate, Regex};

use super::Parser;
use crate::error::{CompileError, Result};
use crate::lexer::{LexemeKind, unescape_regex};

impl<'a> Parser<'a> {
    /// Filter body after `FilterBegin`, up to and including `FilterEnd`.
    pub(super) fn filter(&mut self) -> Result<Predicate> {
        self.enter_recursion()?;
        let predicate = self.or()?;
        self.expect(LexemeKind::FilterEnd)?;
        self.exit_recursion();
        Ok(predicate)
    }

    fn or(&mut self) -> Result<Predicate> {
        let mut lhs = self.and()?;
        while self.eat(LexemeKind::FilterOr) {
            let rhs = self.and()?;
            lhs = Predicate::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Predicate> {
        let mut lhs = self.unary()?;
        while self.eat(LexemeKind::FilterAnd) {
            let rhs = self.unary()?;
            lhs = Predicate::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Predicate> {
        if !self.eat(LexemeKind::FilterNot) {
            return self.comparison();
        }
        self.enter_recursion()?;
        let operand = self.unary()?;
        self.exit_recursion();
        Ok(Predicate::Not(Box::new(operand)))
    }

    fn comparison(&mut self) -> Result<Predicate> {
        let lhs = self.primary()?;
        let Some(op) = self.current_kind().compare_op() else {
            return Ok(lhs);
        };
        self.bump();
        let rhs = self.primary()?;
        if self.current_kind().compare_op().is_some() {
            return Err(self.unexpected());
        }
        Ok(Predicate::Compare(op, Box::new(lhs), Box::new(rhs)))
    }

    fn primary(&mut self) -> Result<Predicate> {
        if !self.eat(LexemeKind::FilterOpenBracket) {
            return self.operand();
        }
        self.enter_recursion()?;
        let inner = self.or()?;
        self.expect(LexemeKind::FilterCloseBracket)?;
        self.exit_recursion();
        Ok(inner)
    }

    fn operand(&mut self) -> Result<Predicate> {
        let offset = self.current_offset();
        match self.current_kind() {
            LexemeKind::FilterAt => {
                self.bump();
                Ok(Predicate::Path(self.sub_path(false)?))
            }
            LexemeKind::Root => {
                self.bump();
                Ok(Predicate::Path(self.sub_path(true)?))
            }
            LexemeKind::IntegerLiteral => {
                let raw = self.bump_value(0);
                raw.parse().map(Predicate::Int).map_err(|_| {
                    CompileError::new(format!("invalid integer literal {raw:?}"), offset)
                })
            }
            LexemeKind::FloatLiteral => {
                let raw = self.bump_value(0);
                raw.parse().map(Predicate::Float).map_err(|_| {
                    CompileError::new(format!("invalid float literal {raw:?}"), offset)
                })
            }
            LexemeKind::StringLiteral => {
                let raw = self.bump_value(0);
                let text = raw
                    .strip_prefix('\'')
                    .and_then(|s| s.strip_suffix('\''))
                    .unwrap_or(&raw);
                Ok(Predicate::String(text.to_string()))
            }
            LexemeKind::RegexLiteral => {
                let raw = self.bump_value(0);
                let body = raw
                    .strip_prefix('/')
                    .and_then(|s| s.strip_suffix('/'))
                    .unwrap_or(&raw);
                let regex = Regex::new(&unescape_regex(body)).map_err(|e| {
                    CompileError::new(
                        format!("invalid regular expression position {offset}: {e}"),
                        offset,
                    )
                })?;
                Ok(Predicate::Regex(regex))
            }
            _ => Err(self.unexpected()),
        }
    }
}

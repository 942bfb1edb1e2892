//! Recursive-descent compiler from lexemes to a [`Pipeline`].
//!
//! The lexer has already rejected malformed input, so the compiler mostly
//! builds stages. It still owns the precedence of filter connectives, the
//! rejection of chained comparisons and the nesting limit.
//!
//! - `path`: path segments, at top level and inside filters
//! - `filter`: filter expressions

mod filter;
mod path;


use treepath_core::Pipeline;

use crate::error::{CompileError, Result};
use crate::lexer::{Lexeme, LexemeKind, Lexer};

/// Nesting allowed for filters and parenthesised groups unless configured.
pub const DEFAULT_RECURSION_FUEL: u32 = 128;

/// Compiles `path` with default limits.
pub fn compile(path: &str) -> Result<Pipeline> {
    Compiler::new(path).compile()
}

/// Path compiler with configurable limits.
pub struct Compiler<'a> {
    path: &'a str,
    recursion_fuel: Option<u32>,
}

impl<'a> Compiler<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }

    /// Maximum nesting of filters, groups and negations. `None` disables the
    /// limit.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }

    pub fn compile(self) -> Result<Pipeline> {
        let mut lexemes = Vec::new();
        let mut lexer = Lexer::new(self.path);
        loop {
            let lexeme = lexer.next_lexeme();
            match lexeme.kind {
                LexemeKind::Error => {
                    return Err(CompileError::new(lexeme.value, lexeme.offset));
                }
                kind if kind.is_terminal() => {
                    lexemes.push(lexeme);
                    break;
                }
                _ => lexemes.push(lexeme),
            }
        }

        let mut parser = Parser {
            lexemes,
            pos: 0,
            source: self.path,
            depth: 0,
            recursion_fuel: self.recursion_fuel,
        };
        parser.path()
    }
}

/// Cursor over the lexeme stream.
struct Parser<'a> {
    lexemes: Vec<Lexeme<'a>>,
    pos: usize,
    source: &'a str,
    depth: u32,
    recursion_fuel: Option<u32>,
}

impl<'a> Parser<'a> {
    fn current(&self) -> Option<&Lexeme<'a>> {
        self.lexemes.get(self.pos)
    }

    fn current_kind(&self) -> LexemeKind {
        self.current().map_or(LexemeKind::Eof, |l| l.kind)
    }

    fn current_offset(&self) -> usize {
        self.current().map_or(self.source.len(), |l| l.offset)
    }

    /// Consumes the current lexeme.
    fn bump(&mut self) -> Option<Lexeme<'a>> {
        let lexeme = self.lexemes.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn eat(&mut self, kind: LexemeKind) -> bool {
        if self.current_kind() != kind {
            return false;
        }
        self.pos += 1;
        true
    }

    fn expect(&mut self, kind: LexemeKind) -> Result<()> {
        if self.eat(kind) {
            return Ok(());
        }
        Err(self.unexpected())
    }

    /// Error for a lexeme the grammar has no place for. Reads like the
    /// lexer's errors: the context runs from the previous lexeme's start.
    fn unexpected(&self) -> CompileError {
        let offset = self.current_offset();
        let last_start = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.lexemes.get(i))
            .map_or(0, |l| l.offset.min(offset));
        let following = self.source.get(last_start..offset).unwrap_or_default();
        let message = match self.current() {
            Some(lexeme) if !lexeme.value.is_empty() => format!(
                "invalid filter syntax starting at {:?} at position {offset}, following {following:?}",
                lexeme.value
            ),
            _ => format!("unexpected end of path at position {offset}, following {following:?}"),
        };
        CompileError::new(message, offset)
    }

    fn enter_recursion(&mut self) -> Result<()> {
        if let Some(limit) = self.recursion_fuel
            && self.depth >= limit
        {
            return Err(CompileError::new(
                "recursion limit exceeded",
                self.current_offset(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

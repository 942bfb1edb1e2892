//! Lexer for path expressions.
//!
//! Hand-written state machine. A sub-path inside a filter is lexed by the same
//! states as the top-level path; a stack of return states brings the lexer back
//! into the filter when the sub-path ends.
//!
//! ## Error handling
//!
//! The first error becomes an `Error` lexeme carrying the full message, after
//! which only `Eof` is produced. Messages that point into the input end with
//! `at position <p>, following "<ctx>"`, where `<p>` is a byte offset and
//! `<ctx>` is the input from the start of the last emitted lexeme up to `<p>`.

use std::borrow::Cow;
use std::fmt;
use std::num::IntErrorKind;

use treepath_core::CompareOp;

use crate::subscript::parse_array_subscript;

/// Lexeme kinds. Filter kinds only occur between `FilterBegin` and `FilterEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    Root,
    /// End of a well-formed path.
    Identity,
    DotChild,
    BracketChild,
    ArraySubscript,
    RecursiveDescent,
    FilterBegin,
    FilterEnd,
    FilterAt,
    FilterNot,
    FilterOpenBracket,
    FilterCloseBracket,
    FilterAnd,
    FilterOr,
    FilterEquality,
    FilterInequality,
    FilterLessThan,
    FilterLessOrEqual,
    FilterGreaterThan,
    FilterGreaterOrEqual,
    FilterMatchesRegex,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    RegexLiteral,
    Error,
    Eof,
}

impl LexemeKind {
    /// Comparison operator this lexeme stands for, if any.
    pub fn compare_op(self) -> Option<CompareOp> {
        Some(match self {
            Self::FilterEquality => CompareOp::Eq,
            Self::FilterInequality => CompareOp::Ne,
            Self::FilterLessThan => CompareOp::Lt,
            Self::FilterLessOrEqual => CompareOp::Le,
            Self::FilterGreaterThan => CompareOp::Gt,
            Self::FilterGreaterOrEqual => CompareOp::Ge,
            Self::FilterMatchesRegex => CompareOp::Match,
            _ => return None,
        })
    }

    fn for_compare_op(op: CompareOp) -> Self {
        match op {
            CompareOp::Eq => Self::FilterEquality,
            CompareOp::Ne => Self::FilterInequality,
            CompareOp::Lt => Self::FilterLessThan,
            CompareOp::Le => Self::FilterLessOrEqual,
            CompareOp::Gt => Self::FilterGreaterThan,
            CompareOp::Ge => Self::FilterGreaterOrEqual,
            CompareOp::Match => Self::FilterMatchesRegex,
        }
    }

    /// Ends the lexeme stream: nothing but `Eof` follows.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Identity | Self::Error | Self::Eof)
    }
}

/// A lexeme: kind, text and byte offset of its start.
///
/// `value` borrows from the input except for the synthetic root (`"$"` at
/// offset 0) and error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<'a> {
    pub kind: LexemeKind,
    pub value: Cow<'a, str>,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Path,
    SubPath,
    /// Expecting a filter term.
    FilterInitial,
    /// After a filter term: an operator, a close bracket or the filter end.
    FilterExpr,
    /// Right-hand side of a comparison.
    FilterOperand(CompareOp),
    Regex,
    Done,
}

/// Kind of the most recent filter operand, used to reject operators that
/// cannot apply to literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Path,
    String,
    Integer,
    Float,
    Regex,
}

impl Operand {
    fn is_literal(self) -> bool {
        self != Self::Path
    }
}

/// Binary operators in match order: two-character forms first.
const BINARY_OPERATORS: [&str; 9] = ["==", "!=", "<=", ">=", "=~", "&&", "||", "<", ">"];

pub struct Lexer<'a> {
    input: &'a str,
    state: State,
    /// States to resume once the current sub-path ends.
    stack: Vec<State>,
    /// Open grouping parentheses, one counter per nested filter.
    filter_depths: Vec<u32>,
    last_operand: Operand,
    /// Start of the lexeme being scanned.
    start: usize,
    pos: usize,
    /// Start of the last emitted lexeme.
    last_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::Path,
            stack: Vec::new(),
            filter_depths: Vec::new(),
            last_operand: Operand::Path,
            start: 0,
            pos: 0,
            last_start: 0,
        }
    }

    /// Produces the next lexeme. Returns `Eof` forever once the stream ended.
    pub fn next_lexeme(&mut self) -> Lexeme<'a> {
        loop {
            let lexeme = match self.state {
                State::Path => self.lex_path(),
                State::SubPath => self.lex_sub_path(),
                State::FilterInitial => self.lex_filter_initial(),
                State::FilterExpr => self.lex_filter_expr(),
                State::FilterOperand(op) => self.lex_filter_operand(op),
                State::Regex => self.lex_regex(),
                State::Done => {
                    return Lexeme {
                        kind: LexemeKind::Eof,
                        value: Cow::Borrowed(""),
                        offset: self.input.len(),
                    };
                }
            };
            if let Some(lexeme) = lexeme {
                return lexeme;
            }
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn in_filter(&self) -> bool {
        !self.stack.is_empty()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
        self.start = self.pos;
    }

    fn emit(&mut self, kind: LexemeKind) -> Lexeme<'a> {
        let lexeme = Lexeme {
            kind,
            value: Cow::Borrowed(&self.input[self.start..self.pos]),
            offset: self.start,
        };
        self.last_start = self.start;
        self.start = self.pos;
        lexeme
    }

    /// Advances over `len` bytes and emits them as one lexeme.
    fn emit_len(&mut self, kind: LexemeKind, len: usize) -> Lexeme<'a> {
        self.start = self.pos;
        self.pos += len;
        self.emit(kind)
    }

    fn error(&mut self, message: impl Into<String>) -> Lexeme<'a> {
        self.state = State::Done;
        Lexeme {
            kind: LexemeKind::Error,
            value: Cow::Owned(message.into()),
            offset: self.pos,
        }
    }

    fn error_at(&mut self, pos: usize, message: impl fmt::Display) -> Lexeme<'a> {
        let following = self.following(pos);
        self.pos = pos;
        self.error(format!(
            "{message} at position {pos}, following {following:?}"
        ))
    }

    fn following(&self, pos: usize) -> &'a str {
        &self.input[self.last_start.min(pos)..pos]
    }

    fn lex_path(&mut self) -> Option<Lexeme<'a>> {
        if self.input.is_empty() {
            self.state = State::Done;
            return Some(self.emit(LexemeKind::Identity));
        }
        self.state = State::SubPath;
        if self.input.starts_with('$') {
            return Some(self.emit_len(LexemeKind::Root, 1));
        }
        Some(Lexeme {
            kind: LexemeKind::Root,
            value: Cow::Borrowed("$"),
            offset: 0,
        })
    }

    fn lex_sub_path(&mut self) -> Option<Lexeme<'a>> {
        let rest = self.rest();
        self.start = self.pos;

        if rest.is_empty() {
            if let Some(state) = self.stack.pop() {
                self.state = state;
                return None;
            }
            self.state = State::Done;
            return Some(self.emit(LexemeKind::Identity));
        }

        if rest.starts_with("..") {
            self.pos += 2;
            if !self.scan_name() {
                return Some(self.error("child name missing after .."));
            }
            return Some(self.emit(LexemeKind::RecursiveDescent));
        }

        if rest.starts_with('.') {
            self.pos += 1;
            if !self.scan_name() {
                return Some(self.error("child name missing after ."));
            }
            return Some(self.emit(LexemeKind::DotChild));
        }

        if rest.starts_with("[?(") {
            self.stack.push(State::SubPath);
            self.filter_depths.push(0);
            self.state = State::FilterInitial;
            return Some(self.emit_len(LexemeKind::FilterBegin, 3));
        }

        if rest.starts_with("['") {
            return Some(self.lex_bracket_child());
        }

        if rest.starts_with('[') {
            return Some(self.lex_array_subscript());
        }

        if let Some(state) = self.stack.pop() {
            self.state = state;
            return None;
        }

        let c = first_char(rest);
        Some(self.error_at(
            self.pos,
            format_args!("invalid path syntax starting at {c:?}"),
        ))
    }

    /// Scans a child name up to the next terminator. Returns false if empty.
    fn scan_name(&mut self) -> bool {
        let in_filter = self.in_filter();
        let rest = self.rest();
        let len = rest
            .find(|c: char| {
                c == '.'
                    || c == '['
                    || (in_filter && (c.is_whitespace() || ")=!<>&|".contains(c)))
            })
            .unwrap_or(rest.len());
        self.pos += len;
        len > 0
    }

    fn lex_bracket_child(&mut self) -> Lexeme<'a> {
        let rest = self.rest();
        let Some(end) = rest[2..].find("']") else {
            return self.error_at(self.pos, r#"unmatched "['""#);
        };
        if end == 0 {
            return self.error("child name missing from ['']");
        }
        self.pos += end + 4;
        self.emit(LexemeKind::BracketChild)
    }

    fn lex_array_subscript(&mut self) -> Lexeme<'a> {
        let rest = self.rest();
        let Some(end) = rest.find(']') else {
            return self.error_at(self.pos, r#"unmatched "[""#);
        };
        if let Err(message) = parse_array_subscript(&rest[..=end]) {
            return self.error(message);
        }
        self.pos += end + 1;
        self.emit(LexemeKind::ArraySubscript)
    }

    fn lex_filter_initial(&mut self) -> Option<Lexeme<'a>> {
        self.skip_whitespace();
        let rest = self.rest();

        if rest.is_empty() || rest.starts_with(')') {
            return Some(self.error("missing filter term"));
        }

        if let Some(op) = binary_operator(rest) {
            return Some(self.error(format!(
                "missing first operand for binary operator {op}"
            )));
        }

        let c = first_char(rest);
        let lexeme = match c {
            "(" => {
                if let Some(depth) = self.filter_depths.last_mut() {
                    *depth += 1;
                }
                self.emit_len(LexemeKind::FilterOpenBracket, 1)
            }
            "!" => self.emit_len(LexemeKind::FilterNot, 1),
            "@" | "$" => {
                self.last_operand = Operand::Path;
                self.stack.push(State::FilterExpr);
                self.state = State::SubPath;
                let kind = if c == "@" {
                    LexemeKind::FilterAt
                } else {
                    LexemeKind::Root
                };
                self.emit_len(kind, 1)
            }
            "'" => self.lex_string(),
            _ if starts_number(rest) => self.lex_number(),
            _ => self.error_at(
                self.pos,
                format_args!("invalid filter syntax starting at {c:?}"),
            ),
        };
        Some(lexeme)
    }

    fn lex_filter_operand(&mut self, op: CompareOp) -> Option<Lexeme<'a>> {
        self.skip_whitespace();
        let rest = self.rest();

        if rest.is_empty() || rest.starts_with(')') {
            return Some(self.error("missing filter term"));
        }
        if op.is_ordering() && rest.starts_with('\'') {
            return Some(self.error_at(
                self.pos,
                format_args!("strings cannot be compared using {op}"),
            ));
        }

        self.state = State::FilterInitial;
        None
    }

    fn lex_filter_expr(&mut self) -> Option<Lexeme<'a>> {
        self.skip_whitespace();
        let rest = self.rest();

        if rest.is_empty() {
            return Some(self.error_at(self.pos, "missing end of filter"));
        }

        if rest.starts_with(')') {
            if let Some(depth) = self.filter_depths.last_mut()
                && *depth > 0
            {
                *depth -= 1;
                return Some(self.emit_len(LexemeKind::FilterCloseBracket, 1));
            }
            if rest.starts_with(")]") {
                self.filter_depths.pop();
                self.state = self.stack.pop().unwrap_or(State::SubPath);
                return Some(self.emit_len(LexemeKind::FilterEnd, 2));
            }
            return Some(self.error_at(self.pos, "missing end of filter"));
        }

        let lexeme = match binary_operator(rest) {
            Some("&&") => {
                self.state = State::FilterInitial;
                self.emit_len(LexemeKind::FilterAnd, 2)
            }
            Some("||") => {
                self.state = State::FilterInitial;
                self.emit_len(LexemeKind::FilterOr, 2)
            }
            Some(text) => {
                let op = compare_op(text);
                self.lex_comparison(op)
            }
            None => {
                let c = first_char(rest);
                self.error_at(
                    self.pos,
                    format_args!("invalid filter syntax starting at {c:?}"),
                )
            }
        };
        Some(lexeme)
    }

    fn lex_comparison(&mut self, op: CompareOp) -> Lexeme<'a> {
        if op == CompareOp::Match {
            if self.last_operand.is_literal() {
                return self.error_at(
                    self.pos,
                    r#"literal cannot be matched using =~ starting at "=""#,
                );
            }
            self.state = State::Regex;
            return self.emit_len(LexemeKind::FilterMatchesRegex, 2);
        }

        if op.is_ordering() && self.last_operand == Operand::String {
            return self.error_at(
                self.pos,
                format_args!("strings cannot be compared using {op}"),
            );
        }

        self.state = State::FilterOperand(op);
        self.emit_len(LexemeKind::for_compare_op(op), op.as_str().len())
    }

    fn lex_string(&mut self) -> Lexeme<'a> {
        let rest = self.rest();
        let Some(end) = rest[1..].find('\'') else {
            return self.error_at(self.pos, r#"unmatched string delimiter "'""#);
        };
        self.last_operand = Operand::String;
        self.state = State::FilterExpr;
        self.emit_len(LexemeKind::StringLiteral, end + 2)
    }

    fn lex_number(&mut self) -> Lexeme<'a> {
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut len = usize::from(bytes.first() == Some(&b'-'));
        while bytes.get(len).is_some_and(u8::is_ascii_digit) {
            len += 1;
        }
        let is_float = bytes.get(len) == Some(&b'.');
        if is_float {
            len += 1;
            while bytes.get(len).is_some_and(u8::is_ascii_digit) {
                len += 1;
            }
        }
        let raw = &rest[..len];

        if is_float {
            if raw.parse::<f64>().is_err() {
                return self.error(format!("invalid float literal {raw:?}: invalid syntax"));
            }
            self.last_operand = Operand::Float;
            self.state = State::FilterExpr;
            return self.emit_len(LexemeKind::FloatLiteral, len);
        }

        if let Err(e) = raw.parse::<i64>() {
            let reason = match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => "value out of range",
                _ => "invalid syntax",
            };
            return self.error(format!("invalid integer literal {raw:?}: {reason}"));
        }
        self.last_operand = Operand::Integer;
        self.state = State::FilterExpr;
        self.emit_len(LexemeKind::IntegerLiteral, len)
    }

    fn lex_regex(&mut self) -> Option<Lexeme<'a>> {
        self.skip_whitespace();
        let rest = self.rest();

        if !rest.starts_with('/') {
            return Some(self.error_at(self.pos, "regular expression does not start with /"));
        }

        let bytes = rest.as_bytes();
        let mut i = 1;
        let end = loop {
            match bytes.get(i) {
                None => {
                    return Some(self.error_at(
                        self.pos,
                        r#"unmatched regular expression delimiter "/""#,
                    ));
                }
                Some(b'\\') => i += 2,
                Some(b'/') => break i,
                Some(_) => i += 1,
            }
        };

        let pattern = unescape_regex(&rest[1..end]);
        if let Err(e) = regex_syntax::Parser::new().parse(&pattern) {
            let following = self.following(self.pos);
            let message = format!(
                "invalid regular expression position {}, following {following:?}: {}",
                self.pos,
                regex_error_message(&e),
            );
            return Some(self.error(message));
        }

        self.last_operand = Operand::Regex;
        self.state = State::FilterExpr;
        Some(self.emit_len(LexemeKind::RegexLiteral, end + 1))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Lexeme<'a>;

    /// Yields lexemes up to, not including, `Eof`.
    fn next(&mut self) -> Option<Self::Item> {
        let lexeme = self.next_lexeme();
        (lexeme.kind != LexemeKind::Eof).then_some(lexeme)
    }
}

/// Lexes the whole input.
pub fn lex(input: &str) -> Vec<Lexeme<'_>> {
    Lexer::new(input).collect()
}

/// Pattern text of a regex literal body: `\/` becomes `/`, other escapes are
/// passed to the regex engine untouched.
pub(crate) fn unescape_regex(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('/') => out.push('/'),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn regex_error_message(e: &regex_syntax::Error) -> String {
    match e {
        regex_syntax::Error::Parse(e) => e.kind().to_string(),
        regex_syntax::Error::Translate(e) => e.kind().to_string(),
        _ => e.to_string(),
    }
}

fn first_char(s: &str) -> &str {
    let len = s.chars().next().map_or(0, char::len_utf8);
    &s[..len]
}

fn binary_operator(s: &str) -> Option<&'static str> {
    BINARY_OPERATORS.into_iter().find(|op| s.starts_with(op))
}

fn compare_op(text: &str) -> CompareOp {
    match text {
        "==" => CompareOp::Eq,
        "!=" => CompareOp::Ne,
        "<" => CompareOp::Lt,
        "<=" => CompareOp::Le,
        ">" => CompareOp::Gt,
        ">=" => CompareOp::Ge,
        _ => CompareOp::Match,
    }
}

fn starts_number(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b'-') => true,
        Some(b'.') => bytes.get(1).is_some_and(u8::is_ascii_digit),
        Some(c) => c.is_ascii_digit(),
        None => false,
    }
}

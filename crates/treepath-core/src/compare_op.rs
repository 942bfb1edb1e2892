//! Comparison operators of the filter language.
//!
//! Shared by the compiler, which produces them from lexemes, and the
//! evaluator, which applies them to resolved operands.

/// Binary comparison between two filter operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `==` - equals
    Eq,
    /// `!=` - not equals
    Ne,
    /// `<` - less than
    Lt,
    /// `<=` - less than or equal
    Le,
    /// `>` - greater than
    Gt,
    /// `>=` - greater than or equal
    Ge,
    /// `=~` - regex match
    Match,
}

impl CompareOp {
    /// Operator as written in a path.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Match => "=~",
        }
    }

    /// Check if this operator orders its operands (`<`, `<=`, `>`, `>=`).
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Compiled form of a path: an immutable chain of matcher stages.
//!
//! A [`Pipeline`] is built once by the compiler and applied any number of
//! times, from any number of threads. Each [`Stage`] maps an ordered candidate
//! set to a new ordered candidate set. Filter stages carry a [`Predicate`] tree
//! whose path operands are themselves pipelines.

use std::fmt::{self, Write as _};

use crate::compare_op::CompareOp;
use crate::regex::Regex;

/// Ordered list of matcher stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// True if the pipeline starts at the document root rather than at the
    /// node it is applied to. Only meaningful for filter sub-paths.
    pub fn is_rooted(&self) -> bool {
        matches!(self.stages.first(), Some(Stage::Root))
    }

    /// One line per stage, for debugging and the CLI `dump` command.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (i, stage) in self.stages.iter().enumerate() {
            let _ = write!(out, "{i} {}", stage.name());
            match stage {
                Stage::DotChild(name)
                | Stage::BracketChild(name)
                | Stage::RecursiveDescent(name) => {
                    let _ = write!(out, " {name:?}");
                }
                Stage::Index(_) | Stage::Slice(_) | Stage::Union(_) => {
                    let _ = write!(out, " {stage}");
                }
                Stage::Filter(predicate) => {
                    let _ = write!(out, " {predicate}");
                }
                Stage::Root
                | Stage::Identity
                | Stage::Wildcard
                | Stage::DescendantWildcard => {}
            }
            out.push('\n');
        }
        out
    }
}

/// Renders the pipeline back to canonical path syntax.
impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stage in &self.stages {
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

/// One step of a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Replace the candidates with the document root.
    Root,
    /// `.name`
    DotChild(String),
    /// `['name']`
    BracketChild(String),
    /// `.*` or `[*]`: all mapping values and sequence elements.
    Wildcard,
    /// `..name`
    RecursiveDescent(String),
    /// `..*`: every descendant.
    DescendantWildcard,
    /// `[n]`, negative counts from the end.
    Index(i64),
    /// `[start:end:step]`
    Slice(Slice),
    /// `[a,b:c,...]`
    Union(Vec<Subscript>),
    /// `[?(...)]`
    Filter(Predicate),
    /// End of path: candidates pass through unchanged.
    Identity,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::DotChild(_) => "DotChild",
            Self::BracketChild(_) => "BracketChild",
            Self::Wildcard => "Wildcard",
            Self::RecursiveDescent(_) => "RecursiveDescent",
            Self::DescendantWildcard => "DescendantWildcard",
            Self::Index(_) => "Index",
            Self::Slice(_) => "Slice",
            Self::Union(_) => "Union",
            Self::Filter(_) => "Filter",
            Self::Identity => "Identity",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("$"),
            Self::DotChild(name) => write!(f, ".{name}"),
            Self::BracketChild(name) => write!(f, "['{name}']"),
            Self::Wildcard => f.write_str(".*"),
            Self::RecursiveDescent(name) => write!(f, "..{name}"),
            Self::DescendantWildcard => f.write_str("..*"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Slice(slice) => write!(f, "[{slice}]"),
            Self::Union(subscripts) => {
                f.write_char('[')?;
                for (i, subscript) in subscripts.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{subscript}")?;
                }
                f.write_char(']')
            }
            Self::Filter(predicate) => write!(f, "[?({predicate})]"),
            Self::Identity => Ok(()),
        }
    }
}

/// Python-style slice bounds. `None` means "default for the step direction".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Slice {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{start}")?;
        }
        f.write_char(':')?;
        if let Some(end) = self.end {
            write!(f, "{end}")?;
        }
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}

/// Member of an index union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscript {
    Index(i64),
    Slice(Slice),
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Slice(slice) => write!(f, "{slice}"),
        }
    }
}

/// Boolean filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Sub-path from `@` or, if rooted, from `$`. On its own it tests existence.
    Path(Pipeline),
    Int(i64),
    Float(f64),
    String(String),
    Regex(Regex),
    Not(Box<Predicate>),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Compare(CompareOp, Box<Predicate>, Box<Predicate>),
}

impl Predicate {
    /// Binding strength when printed: `||` < `&&` < comparison < the rest.
    fn precedence(&self) -> u8 {
        match self {
            Self::Or(..) => 1,
            Self::And(..) => 2,
            Self::Compare(..) => 3,
            _ => 4,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(pipeline) => {
                if !pipeline.is_rooted() {
                    f.write_char('@')?;
                }
                write!(f, "{pipeline}")
            }
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Regex(regex) => write!(f, "{regex}"),
            Self::Not(inner) => {
                f.write_char('!')?;
                inner.fmt_operand(f, 4)
            }
            Self::And(lhs, rhs) => {
                lhs.fmt_operand(f, 2)?;
                f.write_str(" && ")?;
                rhs.fmt_operand(f, 3)
            }
            Self::Or(lhs, rhs) => {
                lhs.fmt_operand(f, 1)?;
                f.write_str(" || ")?;
                rhs.fmt_operand(f, 2)
            }
            Self::Compare(op, lhs, rhs) => {
                lhs.fmt_operand(f, 4)?;
                write!(f, " {op} ")?;
                rhs.fmt_operand(f, 4)
            }
        }
    }
}

//! treepath: JSONPath-style queries with filter expressions.
//!
//! A path is compiled once into a [`Pipeline`] and can then be applied to any
//! number of trees implementing [`Node`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use treepath::Path;
//!
//! let doc = json!({"items": [{"n": 1}, {"n": 5}, {"n": 9}]});
//! let path = Path::new("$.items[?(@.n > 3)].n").unwrap();
//!
//! assert_eq!(path.find(&doc), vec![&json!(5), &json!(9)]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::fmt;
use std::str::FromStr;

pub use treepath_compiler::{
    CompileError, Compiler, DEFAULT_RECURSION_FUEL, Lexeme, LexemeKind, Lexer, compile, lex,
};
pub use treepath_core::{
    CompareOp, Node, NodeId, NodeKind, Pipeline, Predicate, Regex, Scalar, Slice, Stage,
    Subscript,
};
pub use treepath_vm::{Evaluator, NoopTracer, PrintTracer, Tracer, Verbosity, apply};

/// Result type for path compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

/// A compiled path together with the text it was compiled from.
#[derive(Debug, Clone)]
pub struct Path {
    source: String,
    pipeline: Pipeline,
}

impl Path {
    /// Compiles `path` with the default nesting limit.
    pub fn new(path: &str) -> Result<Self> {
        Self::with_recursion_fuel(path, Some(DEFAULT_RECURSION_FUEL))
    }

    /// Compiles `path`, allowing at most `fuel` nested filters and groups.
    /// `None` removes the limit.
    pub fn with_recursion_fuel(path: &str, fuel: Option<u32>) -> Result<Self> {
        let pipeline = Compiler::new(path).with_recursion_fuel(fuel).compile()?;
        Ok(Self {
            source: path.to_string(),
            pipeline,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Nodes of the tree at `root` selected by this path, in document order
    /// for filter-free paths.
    pub fn find<'t, N: Node<'t>>(&self, root: N) -> Vec<N> {
        Evaluator::new(&self.pipeline).apply(root)
    }

    /// Like [`find`](Self::find), reporting evaluation to `tracer`.
    pub fn find_traced<'t, N: Node<'t>, T: Tracer>(&self, root: N, tracer: &mut T) -> Vec<N> {
        Evaluator::new(&self.pipeline).apply_with(root, tracer)
    }
}

impl FromStr for Path {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod lib_tests;

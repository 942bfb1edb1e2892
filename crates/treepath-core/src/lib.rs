#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for treepath.
//!
//! Two layers:
//! - **Tree layer**: the [`Node`] capability the evaluator walks, with an
//!   adapter for `serde_json::Value`
//! - **Pipeline layer**: the immutable stage chain a compiled path becomes

mod compare_op;
mod json;
mod node;
mod pipeline;
mod regex;


pub use compare_op::CompareOp;
pub use node::{Node, NodeId, NodeKind, Scalar};
pub use pipeline::{Pipeline, Predicate, Slice, Stage, Subscript};
pub use regex::{Regex, RegexBuildError};

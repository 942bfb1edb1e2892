#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Evaluator for compiled treepath pipelines.
//!
//! Applies a [`Pipeline`](treepath_core::Pipeline) to any tree implementing
//! [`Node`](treepath_core::Node), producing matches in document order.

pub mod engine;

pub use engine::{Evaluator, NoopTracer, PrintTracer, Tracer, Verbosity, apply};

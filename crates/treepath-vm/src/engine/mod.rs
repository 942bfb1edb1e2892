//! Stage-by-stage evaluation of a pipeline against a tree.
//!
//! Candidates flow through the stages as an ordered `Vec` of node handles.
//! Filter predicates re-enter the same loop for their sub-paths. Evaluation
//! never fails: anything that does not apply selects nothing.

mod eval;
mod filter;
mod slice;
mod trace;


pub use eval::{Evaluator, apply};
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};

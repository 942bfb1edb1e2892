//! Tracing infrastructure for debugging evaluation.
//!
//! The evaluator is generic over [`Tracer`]. With [`NoopTracer`] every hook is
//! an empty `#[inline(always)]` function and disappears from the compiled
//! code, so untraced evaluation pays nothing. [`PrintTracer`] records one line
//! per event, indented by filter sub-path depth.

use treepath_core::{Predicate, Stage};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Top-level stages only.
    #[default]
    Default,
    /// Also filter sub-paths and per-candidate predicate outcomes.
    Verbose,
}

/// Evaluation instrumentation.
///
/// - `trace_stage` - before a stage runs, with the number of input candidates
/// - `trace_stage_result` - after a stage ran, with the number selected
/// - `trace_predicate` - after a filter predicate was tested on one candidate
/// - `trace_enter_sub_path` / `trace_exit_sub_path` - around the evaluation of
///   a path operand inside a filter
pub trait Tracer {
    fn trace_stage(&mut self, stage: &Stage, candidates: usize);

    fn trace_stage_result(&mut self, stage: &Stage, selected: usize);

    fn trace_predicate(&mut self, predicate: &Predicate, holds: bool);

    fn trace_enter_sub_path(&mut self);

    fn trace_exit_sub_path(&mut self);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_stage(&mut self, _stage: &Stage, _candidates: usize) {}

    #[inline(always)]
    fn trace_stage_result(&mut self, _stage: &Stage, _selected: usize) {}

    #[inline(always)]
    fn trace_predicate(&mut self, _predicate: &Predicate, _holds: bool) {}

    #[inline(always)]
    fn trace_enter_sub_path(&mut self) {}

    #[inline(always)]
    fn trace_exit_sub_path(&mut self) {}
}

/// Tracer that collects human-readable lines.
#[derive(Debug, Default)]
pub struct PrintTracer {
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Nesting of filter sub-paths currently being evaluated.
    depth: usize,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            depth: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Print all trace lines to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{line}");
        }
    }

    fn enabled(&self) -> bool {
        self.depth == 0 || self.verbosity == Verbosity::Verbose
    }

    fn push(&mut self, content: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{content}"));
    }
}

impl Tracer for PrintTracer {
    fn trace_stage(&mut self, stage: &Stage, candidates: usize) {
        if !self.enabled() {
            return;
        }
        let text = stage.to_string();
        if text.is_empty() {
            self.push(format!("{} <- {candidates}", stage.name()));
        } else {
            self.push(format!("{} {text} <- {candidates}", stage.name()));
        }
    }

    fn trace_stage_result(&mut self, _stage: &Stage, selected: usize) {
        if !self.enabled() {
            return;
        }
        self.push(format!("  -> {selected}"));
    }

    fn trace_predicate(&mut self, predicate: &Predicate, holds: bool) {
        if self.verbosity != Verbosity::Verbose {
            return;
        }
        let mark = if holds { "keep" } else { "drop" };
        self.push(format!("  {mark} {predicate}"));
    }

    fn trace_enter_sub_path(&mut self) {
        self.depth += 1;
    }

    fn trace_exit_sub_path(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

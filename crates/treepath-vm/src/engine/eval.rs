//! Stage evaluation.

use std::collections::HashSet;

use treepath_core::{Node, NodeId, Pipeline, Stage, Subscript};

use super::filter::holds;
use super::slice::{index, slice};
use super::trace::{NoopTracer, Tracer};

/// Applies `pipeline` to the tree rooted at `root`.
pub fn apply<'t, N: Node<'t>>(pipeline: &Pipeline, root: N) -> Vec<N> {
    Evaluator::new(pipeline).apply(root)
}

/// Runs one compiled pipeline against any number of trees.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'p> {
    pipeline: &'p Pipeline,
}

impl<'p> Evaluator<'p> {
    pub fn new(pipeline: &'p Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn apply<'t, N: Node<'t>>(&self, root: N) -> Vec<N> {
        self.apply_with(root, &mut NoopTracer)
    }

    /// Like [`apply`](Self::apply), reporting every stage to `tracer`.
    pub fn apply_with<'t, N: Node<'t>, T: Tracer>(&self, root: N, tracer: &mut T) -> Vec<N> {
        run(self.pipeline, root, vec![root], tracer)
    }
}

/// Feeds `candidates` through every stage of `pipeline`.
pub(super) fn run<'t, N: Node<'t>, T: Tracer>(
    pipeline: &Pipeline,
    root: N,
    mut candidates: Vec<N>,
    tracer: &mut T,
) -> Vec<N> {
    for stage in pipeline.stages() {
        tracer.trace_stage(stage, candidates.len());
        candidates = step(stage, root, candidates, tracer);
        tracer.trace_stage_result(stage, candidates.len());
    }
    candidates
}

fn step<'t, N: Node<'t>, T: Tracer>(
    stage: &Stage,
    root: N,
    candidates: Vec<N>,
    tracer: &mut T,
) -> Vec<N> {
    match stage {
        Stage::Root => vec![root],
        Stage::Identity => candidates,
        Stage::DotChild(name) | Stage::BracketChild(name) => candidates
            .into_iter()
            .filter_map(|node| node.get(name))
            .collect(),
        Stage::Wildcard => candidates
            .into_iter()
            .flat_map(|node| node.children())
            .collect(),
        Stage::Index(i) => candidates
            .into_iter()
            .filter_map(|node| index(node, *i))
            .collect(),
        Stage::Slice(s) => candidates
            .into_iter()
            .flat_map(|node| slice(node, s))
            .collect(),
        Stage::Union(subscripts) => {
            let mut out = Vec::new();
            for node in candidates {
                for subscript in subscripts {
                    match subscript {
                        Subscript::Index(i) => out.extend(index(node, *i)),
                        Subscript::Slice(s) => out.extend(slice(node, s)),
                    }
                }
            }
            out
        }
        Stage::RecursiveDescent(name) => {
            let mut visited = HashSet::new();
            let mut out = Vec::new();
            for node in candidates {
                descend(node, &mut visited, |visited_node| {
                    out.extend(visited_node.get(name));
                });
            }
            out
        }
        Stage::DescendantWildcard => {
            let mut visited = HashSet::new();
            let mut out = Vec::new();
            for node in candidates {
                let start = node.id();
                descend(node, &mut visited, |visited_node| {
                    if visited_node.id() != start {
                        out.push(visited_node);
                    }
                });
            }
            out
        }
        Stage::Filter(predicate) => {
            let mut out = Vec::new();
            for node in candidates {
                for child in node.children() {
                    let keep = holds(predicate, child, root, tracer);
                    tracer.trace_predicate(predicate, keep);
                    if keep {
                        out.push(child);
                    }
                }
            }
            out
        }
    }
}

/// Depth-first pre-order walk of `start` and its descendants. Nodes already in
/// `visited` are skipped together with their subtrees.
fn descend<'t, N: Node<'t>>(start: N, visited: &mut HashSet<NodeId>, mut visit: impl FnMut(N)) {
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        if !visited.insert(node.id()) {
            continue;
        }
        visit(node);
        let children: Vec<N> = node.children().collect();
        stack.extend(children.into_iter().rev());
    }
}

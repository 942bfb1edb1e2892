//! Filter predicate evaluation.

use std::borrow::Cow;
use std::cmp::Ordering;

use treepath_core::{CompareOp, Node, Predicate, Regex, Scalar};

use super::eval::run;
use super::trace::Tracer;

/// Comparison operand after resolution.
#[derive(Debug, Clone, Copy)]
enum Operand<'a> {
    Scalar(Scalar<'a>),
    Regex(&'a Regex),
}

/// Whether `predicate` holds with `current` bound to `@` and `root` to `$`.
pub(super) fn holds<'t, N: Node<'t>, T: Tracer>(
    predicate: &Predicate,
    current: N,
    root: N,
    tracer: &mut T,
) -> bool {
    match predicate {
        Predicate::Path(pipeline) => {
            tracer.trace_enter_sub_path();
            let found = run(pipeline, root, vec![current], tracer);
            tracer.trace_exit_sub_path();
            !found.is_empty()
        }
        Predicate::Int(_) | Predicate::Float(_) | Predicate::String(_) | Predicate::Regex(_) => {
            true
        }
        Predicate::Not(inner) => !holds(inner, current, root, tracer),
        Predicate::And(lhs, rhs) => {
            holds(lhs, current, root, tracer) && holds(rhs, current, root, tracer)
        }
        Predicate::Or(lhs, rhs) => {
            holds(lhs, current, root, tracer) || holds(rhs, current, root, tracer)
        }
        Predicate::Compare(op, lhs, rhs) => {
            let Some(lhs) = resolve(lhs, current, root, tracer) else {
                return false;
            };
            let Some(rhs) = resolve(rhs, current, root, tracer) else {
                return false;
            };
            compare(*op, lhs, rhs)
        }
    }
}

/// Resolves a comparison side. `None` unless it denotes exactly one scalar.
fn resolve<'a, 't: 'a, N: Node<'t>, T: Tracer>(
    predicate: &'a Predicate,
    current: N,
    root: N,
    tracer: &mut T,
) -> Option<Operand<'a>> {
    let scalar = match predicate {
        Predicate::Path(pipeline) => {
            tracer.trace_enter_sub_path();
            let found = run(pipeline, root, vec![current], tracer);
            tracer.trace_exit_sub_path();
            match found[..] {
                [node] => node.scalar()?,
                _ => return None,
            }
        }
        Predicate::Int(n) => Scalar::Int(*n),
        Predicate::Float(x) => Scalar::Float(*x),
        Predicate::String(s) => Scalar::String(s),
        Predicate::Regex(regex) => return Some(Operand::Regex(regex)),
        Predicate::Not(_) | Predicate::And(..) | Predicate::Or(..) | Predicate::Compare(..) => {
            Scalar::Bool(holds(predicate, current, root, tracer))
        }
    };
    Some(Operand::Scalar(scalar))
}

fn compare(op: CompareOp, lhs: Operand<'_>, rhs: Operand<'_>) -> bool {
    match (lhs, rhs) {
        (Operand::Scalar(scalar), Operand::Regex(regex)) if op == CompareOp::Match => {
            match_text(scalar).is_some_and(|text| regex.is_match(&text))
        }
        (Operand::Scalar(a), Operand::Scalar(b)) if op != CompareOp::Match => {
            compare_scalars(op, a, b)
        }
        _ => false,
    }
}

/// Text a regex is matched against. Numbers and booleans match their
/// rendered form; null never matches.
fn match_text(scalar: Scalar<'_>) -> Option<Cow<'_, str>> {
    Some(match scalar {
        Scalar::String(s) => Cow::Borrowed(s),
        Scalar::Int(n) => Cow::Owned(n.to_string()),
        Scalar::Float(x) => Cow::Owned(x.to_string()),
        Scalar::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
        Scalar::Null => return None,
    })
}

fn compare_scalars(op: CompareOp, lhs: Scalar<'_>, rhs: Scalar<'_>) -> bool {
    let ordering = match (lhs, rhs) {
        (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(&b)),
        (a, b) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => {
                // Non-numbers only support equality.
                return match op {
                    CompareOp::Eq => lhs == rhs,
                    CompareOp::Ne => lhs != rhs,
                    _ => false,
                };
            }
        },
    };

    match op {
        CompareOp::Eq => ordering == Some(Ordering::Equal),
        CompareOp::Ne => ordering != Some(Ordering::Equal),
        CompareOp::Lt => ordering == Some(Ordering::Less),
        CompareOp::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        CompareOp::Gt => ordering == Some(Ordering::Greater),
        CompareOp::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        CompareOp::Match => false,
    }
}

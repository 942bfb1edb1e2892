//! Sequence indexing with negative indices and Python-style slices.

use treepath_core::{Node, NodeKind, Slice};

/// Element at `index` of a sequence; negative indices count from the end.
pub(super) fn index<'t, N: Node<'t>>(node: N, index: i64) -> Option<N> {
    if node.kind() != NodeKind::Sequence {
        return None;
    }
    let len = node.sequence_len() as i64;
    let resolved = if index < 0 { len + index } else { index };
    if !(0..len).contains(&resolved) {
        return None;
    }
    node.element(resolved as usize)
}

/// Elements of a sequence selected by `slice`, in slice order.
pub(super) fn slice<'t, N: Node<'t>>(node: N, slice: &Slice) -> Vec<N> {
    if node.kind() != NodeKind::Sequence {
        return Vec::new();
    }
    slice_indices(node.sequence_len(), slice)
        .into_iter()
        .filter_map(|i| node.element(i))
        .collect()
}

/// Indices a slice selects from a sequence of `len` elements.
///
/// Bounds are clamped, never rejected. A zero step selects nothing, and a
/// step past the last representable index stops the walk.
pub(super) fn slice_indices(len: usize, slice: &Slice) -> Vec<usize> {
    let len = len as i64;
    let step = slice.step.unwrap_or(1);

    let (lower, upper) = match step {
        0 => return Vec::new(),
        s if s > 0 => (0, len),
        _ => (-1, len - 1),
    };
    let clamp = |bound: Option<i64>, default: i64| match bound {
        None => default,
        Some(b) if b < 0 => (b + len).max(lower),
        Some(b) => b.min(upper),
    };

    let mut indices = Vec::new();
    if step > 0 {
        let end = clamp(slice.end, upper);
        let mut i = clamp(slice.start, lower);
        while i < end {
            indices.push(i as usize);
            let Some(next) = i.checked_add(step) else {
                break;
            };
            i = next;
        }
    } else {
        let end = clamp(slice.end, lower);
        let mut i = clamp(slice.start, upper);
        while i > end {
            indices.push(i as usize);
            let Some(next) = i.checked_add(step) else {
                break;
            };
            i = next;
        }
    }
    indices
}

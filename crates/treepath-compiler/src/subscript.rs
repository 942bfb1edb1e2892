//! Array subscript parsing, shared by the lexer (validation) and the compiler.

use treepath_core::{Slice, Stage, Subscript};

/// Parses a bracketed subscript such as `[*]`, `[-1]`, `[1:5:2]` or `[0,2:4]`.
///
/// `raw` includes the brackets; error messages quote it verbatim.
pub(crate) fn parse_array_subscript(raw: &str) -> Result<Stage, String> {
    let inner = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);

    if inner.trim() == "*" {
        return Ok(Stage::Wildcard);
    }

    let mut subscripts = inner
        .split(',')
        .map(|component| parse_component(component, raw))
        .collect::<Result<Vec<_>, _>>()?;

    if subscripts.len() > 1 {
        return Ok(Stage::Union(subscripts));
    }
    Ok(match subscripts.pop() {
        Some(Subscript::Index(index)) => Stage::Index(index),
        Some(Subscript::Slice(slice)) => Stage::Slice(slice),
        None => Stage::Union(Vec::new()),
    })
}

fn parse_component(component: &str, raw: &str) -> Result<Subscript, String> {
    let parts: Vec<&str> = component.split(':').map(str::trim).collect();
    if parts.len() > 3 {
        return Err(format!("invalid array index, too many colons: {raw}"));
    }

    let non_integer = || format!("invalid array index containing non-integer value: {raw}");
    let bound = |part: &str| -> Result<Option<i64>, String> {
        if part.is_empty() {
            return Ok(None);
        }
        part.parse().map(Some).map_err(|_| non_integer())
    };

    if let [index] = parts[..] {
        return match bound(index)? {
            Some(index) => Ok(Subscript::Index(index)),
            None => Err(non_integer()),
        };
    }

    let slice = Slice {
        start: bound(parts[0])?,
        end: bound(parts[1])?,
        step: match parts.get(2) {
            Some(step) => bound(step)?,
            None => None,
        },
    };
    if slice.step == Some(0) {
        return Err(format!("invalid array index, step cannot be zero: {raw}"));
    }
    Ok(Subscript::Slice(slice))
}

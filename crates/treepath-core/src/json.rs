//! [`Node`] adapter for `serde_json::Value`.
//!
//! Requires the `preserve_order` feature of serde_json so mapping entries
//! iterate in document order.

use serde_json::Value;

use crate::node::{Node, NodeId, NodeKind, Scalar};

impl<'t> Node<'t> for &'t Value {
    fn kind(self) -> NodeKind {
        match self {
            Value::Array(_) => NodeKind::Sequence,
            Value::Object(_) => NodeKind::Mapping,
            _ => NodeKind::Scalar,
        }
    }

    #[inline]
    fn id(self) -> NodeId {
        NodeId::from_ptr(self)
    }

    fn scalar(self) -> Option<Scalar<'t>> {
        match self {
            Value::Null => Some(Scalar::Null),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Scalar::Int(i)),
                // u64 above i64::MAX and real numbers
                None => n.as_f64().map(Scalar::Float),
            },
            Value::String(s) => Some(Scalar::String(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn get(self, key: &str) -> Option<Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn element(self, index: usize) -> Option<Self> {
        self.as_array().and_then(|items| items.get(index))
    }

    fn sequence_len(self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }

    fn elements(self) -> impl Iterator<Item = Self> {
        self.as_array().into_iter().flatten()
    }

    fn entries(self) -> impl Iterator<Item = (&'t str, Self)> {
        self.as_object()
            .into_iter()
            .flatten()
            .map(|(key, value)| (key.as_str(), value))
    }
}

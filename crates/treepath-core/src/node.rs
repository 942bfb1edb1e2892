//! The tree capability the evaluator is written against.
//!
//! The evaluator never owns or mutates a tree. It only needs to ask a node
//! what it is, walk its children in order, and read scalar values. Any
//! document type can be queried by implementing [`Node`] for a reference to
//! its node type.

/// Shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

/// A kind-tagged scalar value, borrowed from a tree or from a compiled literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(&'a str),
}

impl Scalar<'_> {
    /// Numeric view of the value. Integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// Identity of a node within one tree, used to avoid visiting a node twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Identity derived from the address of the node.
    #[inline]
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Self(ptr as usize)
    }
}

/// Read-only view of a document node.
///
/// Implementations are cheap handles (typically `&'t T`), so every method takes
/// `self` by value. Iteration order must be stable: sequence elements in index
/// order, mapping entries in document order.
pub trait Node<'t>: Copy {
    fn kind(self) -> NodeKind;

    /// Stable identity of this node for the lifetime of the tree.
    fn id(self) -> NodeId;

    /// Scalar value, or `None` for sequences and mappings.
    fn scalar(self) -> Option<Scalar<'t>>;

    /// Value stored under `key`. `None` for non-mappings.
    fn get(self, key: &str) -> Option<Self>;

    /// Element at `index`. `None` for non-sequences.
    fn element(self, index: usize) -> Option<Self>;

    /// Number of elements of a sequence, 0 for anything else.
    fn sequence_len(self) -> usize;

    /// Sequence elements in index order. Empty for non-sequences.
    fn elements(self) -> impl Iterator<Item = Self>;

    /// Mapping entries in document order. Empty for non-mappings.
    fn entries(self) -> impl Iterator<Item = (&'t str, Self)>;

    /// Direct children: sequence elements or mapping values.
    fn children(self) -> impl Iterator<Item = Self> {
        let elements = self.elements();
        let values = self.entries().map(|(_, value)| value);
        elements.chain(values)
    }
}

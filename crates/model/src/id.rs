//! Index newtypes.

use std::fmt;

/// Index of a node within a [`Model`](crate::Model).
///
/// Node ids are dense and handed out in creation order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(usize);

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<NodeId> for usize {
    fn from(value: NodeId) -> Self {
        value.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a sequential element (flip-flop or latch).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SeqId(usize);

impl From<usize> for SeqId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<SeqId> for usize {
    fn from(value: SeqId) -> Self {
        value.0
    }
}

impl fmt::Display for SeqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SEQ#{}", self.0)
    }
}

/// Index into the function table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FuncId(usize);

impl From<usize> for FuncId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<FuncId> for usize {
    fn from(value: FuncId) -> Self {
        value.0
    }
}

impl fmt::Display for FuncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FUNC#{}", self.0)
    }
}

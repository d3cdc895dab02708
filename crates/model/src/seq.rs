//! Sequential elements.

use std::fmt;

use crate::id::{NodeId, SeqId};
use crate::model::Model;
use crate::node::Node;

/// Kind of sequential element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqKind {
    /// Edge-triggered D flip-flop.
    Dff,
    /// Level-sensitive latch.
    Latch,
}

impl SeqKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SeqKind::Dff => "DFF",
            SeqKind::Latch => "LATCH",
        }
    }
}

/// Per-element storage.
#[derive(Debug, Clone)]
pub(crate) struct SeqImpl {
    pub(crate) name: String,
    pub(crate) kind: SeqKind,
    pub(crate) data_src: Option<NodeId>,
    /// Clock for flip-flops, enable for latches.
    pub(crate) control: Option<NodeId>,
    pub(crate) clear: Option<NodeId>,
    pub(crate) preset: Option<NodeId>,
    pub(crate) data_output: NodeId,
    pub(crate) rsval: char,
}

impl SeqImpl {
    /// Every node this element reads.
    pub(crate) fn pins(&self) -> impl Iterator<Item = NodeId> + '_ {
        [self.data_src, self.control, self.clear, self.preset]
            .into_iter()
            .flatten()
    }
}

/// Borrowed view of one sequential element.
#[derive(Clone, Copy)]
pub struct Seq<'a> {
    model: &'a Model,
    id: SeqId,
}

impl<'a> Seq<'a> {
    pub(crate) fn new(model: &'a Model, id: SeqId) -> Self {
        Self { model, id }
    }

    fn inner(&self) -> &'a SeqImpl {
        self.model.seq_impl(self.id)
    }

    fn node(&self, id: Option<NodeId>) -> Option<Node<'a>> {
        id.map(|id| Node::new(self.model, id))
    }

    /// The element id.
    pub fn id(&self) -> SeqId {
        self.id
    }

    /// The element name; empty when anonymous.
    pub fn name(&self) -> &'a str {
        &self.inner().name
    }

    /// Flip-flop or latch.
    pub fn kind(&self) -> SeqKind {
        self.inner().kind
    }

    /// True for flip-flops.
    pub fn is_dff(&self) -> bool {
        self.kind() == SeqKind::Dff
    }

    /// True for latches.
    pub fn is_latch(&self) -> bool {
        self.kind() == SeqKind::Latch
    }

    /// The data input.
    pub fn data_src(&self) -> Option<Node<'a>> {
        self.node(self.inner().data_src)
    }

    /// Clock pin of a flip-flop.
    pub fn clock(&self) -> Option<Node<'a>> {
        if self.is_dff() {
            self.node(self.inner().control)
        } else {
            None
        }
    }

    /// Enable pin of a latch.
    pub fn enable(&self) -> Option<Node<'a>> {
        if self.is_latch() {
            self.node(self.inner().control)
        } else {
            None
        }
    }

    /// Asynchronous clear pin.
    pub fn clear(&self) -> Option<Node<'a>> {
        self.node(self.inner().clear)
    }

    /// Asynchronous preset pin.
    pub fn preset(&self) -> Option<Node<'a>> {
        self.node(self.inner().preset)
    }

    /// The node carrying the element's output.
    pub fn data_output(&self) -> Node<'a> {
        Node::new(self.model, self.inner().data_output)
    }

    /// Reset value: `'0'`, `'1'`, `'X'`, or `' '` when unspecified.
    pub fn rsval(&self) -> char {
        self.inner().rsval
    }
}

impl fmt::Debug for Seq<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seq")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("rsval", &self.rsval())
            .finish()
    }
}

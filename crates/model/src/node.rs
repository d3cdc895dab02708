//! Nodes of the network.

use std::fmt;

use crate::error::ModelError;
use crate::func::Func;
use crate::id::{FuncId, NodeId, SeqId};
use crate::model::Model;
use crate::seq::Seq;

/// What drives a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Allocated but not yet given a driver. Never present after
    /// [`Model::wrap_up`] succeeds.
    Undefined,
    /// Primary input number `input_id`.
    Input {
        /// Position in the input list.
        input_id: usize,
    },
    /// Data output of a sequential element.
    SeqOutput {
        /// The element driving this node.
        seq: SeqId,
    },
    /// Two-input AND with optional inversion on each fanin.
    Aig {
        /// The two fanins.
        fanins: [NodeId; 2],
        /// Inversion of each fanin.
        inv: [bool; 2],
    },
    /// Logic node computing an entry of the function table.
    Logic {
        /// The function.
        func: FuncId,
        /// One fanin per function input.
        fanins: Vec<NodeId>,
    },
}

/// Per-node storage.
#[derive(Debug, Clone)]
pub(crate) struct NodeImpl {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
}

impl NodeImpl {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            kind: NodeKind::Undefined,
        }
    }

    pub(crate) fn is_defined(&self) -> bool {
        !matches!(self.kind, NodeKind::Undefined)
    }

    pub(crate) fn fanins(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Aig { fanins, .. } => fanins.as_slice(),
            NodeKind::Logic { fanins, .. } => fanins.as_slice(),
            _ => &[],
        }
    }

    pub(crate) fn is_logic(&self) -> bool {
        matches!(self.kind, NodeKind::Aig { .. } | NodeKind::Logic { .. })
    }
}

/// Borrowed view of one node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    model: &'a Model,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(model: &'a Model, id: NodeId) -> Self {
        Self { model, id }
    }

    fn inner(&self) -> &'a NodeImpl {
        self.model.node_impl(self.id)
    }

    /// The owning model.
    pub fn model(&self) -> &'a Model {
        self.model
    }

    /// The node id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node name; empty when the node is anonymous.
    pub fn name(&self) -> &'a str {
        &self.inner().name
    }

    /// What drives the node.
    pub fn kind(&self) -> &'a NodeKind {
        &self.inner().kind
    }

    /// True for primary inputs.
    pub fn is_input(&self) -> bool {
        matches!(self.kind(), NodeKind::Input { .. })
    }

    /// True for sequential-element outputs.
    pub fn is_seq_output(&self) -> bool {
        matches!(self.kind(), NodeKind::SeqOutput { .. })
    }

    /// True for AIG and function nodes.
    pub fn is_logic(&self) -> bool {
        self.inner().is_logic()
    }

    /// True for AIG nodes.
    pub fn is_aig(&self) -> bool {
        matches!(self.kind(), NodeKind::Aig { .. })
    }

    /// Position in the model's input list, for inputs.
    pub fn input_id(&self) -> Option<usize> {
        match self.kind() {
            NodeKind::Input { input_id } => Some(*input_id),
            _ => None,
        }
    }

    /// The sequential element driving this node, for sequential outputs.
    pub fn seq(&self) -> Option<Seq<'a>> {
        match self.kind() {
            NodeKind::SeqOutput { seq } => Some(Seq::new(self.model, *seq)),
            _ => None,
        }
    }

    /// Number of fanins; zero for non-logic nodes.
    pub fn fanin_num(&self) -> usize {
        self.inner().fanins().len()
    }

    /// Fanin ids in function-input order.
    pub fn fanin_list(&self) -> &'a [NodeId] {
        self.inner().fanins()
    }

    /// The fanin at `pos`.
    pub fn fanin(&self, pos: usize) -> Result<Node<'a>, ModelError> {
        let fanins = self.fanin_list();
        let id = fanins.get(pos).ok_or(ModelError::OutOfRange {
            what: "fanin",
            index: pos,
            len: fanins.len(),
        })?;
        Ok(Node::new(self.model, *id))
    }

    /// Inversion flag of AIG fanin `pos` (0 or 1).
    pub fn fanin_inv(&self, pos: usize) -> Option<bool> {
        match self.kind() {
            NodeKind::Aig { inv, .. } => inv.get(pos).copied(),
            _ => None,
        }
    }

    /// Function id, for function nodes.
    pub fn func_id(&self) -> Option<FuncId> {
        match self.kind() {
            NodeKind::Logic { func, .. } => Some(*func),
            _ => None,
        }
    }

    /// Function, for function nodes.
    pub fn func(&self) -> Option<&'a Func> {
        self.func_id().and_then(|id| self.model.func_by_id(id))
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("kind", self.kind())
            .finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name().is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}({})", self.id, self.name())
        }
    }
}

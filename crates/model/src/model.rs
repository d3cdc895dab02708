//! The network container.

use std::fmt;
use std::io;

use fixedbitset::FixedBitSet;

use crate::error::ModelError;
use crate::func::{Func, FuncMgr, PrimType, SopCover, TvFunc};
use crate::id::{FuncId, NodeId, SeqId};
use crate::library::CellLibrary;
use crate::node::{Node, NodeImpl, NodeKind};
use crate::seq::{Seq, SeqImpl, SeqKind};

/// A Boolean network.
///
/// A model owns its nodes, its sequential elements and a deduplicated table
/// of logic functions. Nodes are addressed by [`NodeId`]; accessors hand out
/// borrowed [`Node`] and [`Seq`] views.
///
/// Models built through the loaders are already wrapped up. Models built by
/// hand must call [`Model::wrap_up`] before the logic list is meaningful.
#[derive(Debug, Clone, Default)]
pub struct Model {
    library: CellLibrary,
    name: String,
    comment: String,
    nodes: Vec<NodeImpl>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    output_names: Vec<String>,
    logics: Vec<NodeId>,
    seqs: Vec<SeqImpl>,
    funcs: FuncMgr,
}

fn out_of_range(what: &'static str, index: usize, len: usize) -> ModelError {
    ModelError::OutOfRange { what, index, len }
}

impl Model {
    /// Creates an empty model with no library.
    pub fn new() -> Self {
        Self::default()
    }

    // ---- read access ----

    /// The cell library.
    pub fn library(&self) -> &CellLibrary {
        &self.library
    }

    /// Model name, from `.model` or equivalent.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-form comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Total number of nodes.
    pub fn node_num(&self) -> usize {
        self.nodes.len()
    }

    /// Number of primary inputs.
    pub fn input_num(&self) -> usize {
        self.inputs.len()
    }

    /// Number of primary outputs.
    pub fn output_num(&self) -> usize {
        self.outputs.len()
    }

    /// Number of logic nodes in the logic list.
    pub fn logic_num(&self) -> usize {
        self.logics.len()
    }

    /// Number of sequential elements, flip-flops and latches together.
    pub fn seq_num(&self) -> usize {
        self.seqs.len()
    }

    /// Number of distinct functions.
    pub fn func_num(&self) -> usize {
        self.funcs.len()
    }

    /// Node with the given id.
    pub fn node(&self, id: NodeId) -> Result<Node<'_>, ModelError> {
        let index = usize::from(id);
        if index < self.nodes.len() {
            Ok(Node::new(self, id))
        } else {
            Err(out_of_range("node", index, self.nodes.len()))
        }
    }

    /// Primary input `index`.
    pub fn input(&self, index: usize) -> Result<Node<'_>, ModelError> {
        self.inputs
            .get(index)
            .map(|&id| Node::new(self, id))
            .ok_or_else(|| out_of_range("input", index, self.inputs.len()))
    }

    /// Source node of primary output `index`.
    pub fn output(&self, index: usize) -> Result<Node<'_>, ModelError> {
        self.outputs
            .get(index)
            .map(|&id| Node::new(self, id))
            .ok_or_else(|| out_of_range("output", index, self.outputs.len()))
    }

    /// Logic node `index`, in topological order.
    pub fn logic(&self, index: usize) -> Result<Node<'_>, ModelError> {
        self.logics
            .get(index)
            .map(|&id| Node::new(self, id))
            .ok_or_else(|| out_of_range("logic", index, self.logics.len()))
    }

    /// Sequential element `index`.
    pub fn seq(&self, index: usize) -> Result<Seq<'_>, ModelError> {
        if index < self.seqs.len() {
            Ok(Seq::new(self, SeqId::from(index)))
        } else {
            Err(out_of_range("seq", index, self.seqs.len()))
        }
    }

    /// Function `index`.
    pub fn func(&self, index: usize) -> Result<&Func, ModelError> {
        self.funcs
            .get(FuncId::from(index))
            .ok_or_else(|| out_of_range("func", index, self.funcs.len()))
    }

    /// Name of primary input `index`.
    pub fn input_name(&self, index: usize) -> Result<&str, ModelError> {
        Ok(self.input(index)?.name())
    }

    /// Name of primary output `index`.
    pub fn output_name(&self, index: usize) -> Result<&str, ModelError> {
        self.output_names
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| out_of_range("output", index, self.outputs.len()))
    }

    /// Input node ids.
    pub fn input_list(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Output source node ids.
    pub fn output_list(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Logic node ids in topological order.
    pub fn logic_list(&self) -> &[NodeId] {
        &self.logics
    }

    /// Input names, in input order.
    pub fn input_name_list(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().map(|&id| self.node_impl(id).name.as_str())
    }

    /// Output names, in output order.
    pub fn output_name_list(&self) -> impl Iterator<Item = &str> {
        self.output_names.iter().map(String::as_str)
    }

    /// All sequential elements.
    pub fn seq_list(&self) -> impl Iterator<Item = Seq<'_>> {
        (0..self.seqs.len()).map(|i| Seq::new(self, SeqId::from(i)))
    }

    /// All functions, in id order.
    pub fn func_list(&self) -> impl Iterator<Item = &Func> {
        self.funcs.iter()
    }

    /// Writes the model dump.
    pub fn print(&self, w: &mut impl io::Write) -> io::Result<()> {
        write!(w, "{self}")
    }

    pub(crate) fn node_impl(&self, id: NodeId) -> &NodeImpl {
        &self.nodes[usize::from(id)]
    }

    pub(crate) fn seq_impl(&self, id: SeqId) -> &SeqImpl {
        &self.seqs[usize::from(id)]
    }

    pub(crate) fn func_by_id(&self, id: FuncId) -> Option<&Func> {
        self.funcs.get(id)
    }

    // ---- building ----

    /// Sets the model name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Sets the model comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    /// Renames a node.
    pub fn set_node_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), ModelError> {
        self.node_mut(id)?.name = name.into();
        Ok(())
    }

    /// Renames primary output `index`.
    pub fn set_output_name(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), ModelError> {
        let len = self.output_names.len();
        let slot = self
            .output_names
            .get_mut(index)
            .ok_or_else(|| out_of_range("output", index, len))?;
        *slot = name.into();
        Ok(())
    }

    /// Registers a function, returning the id of an equal one if present.
    ///
    /// A primitive whose input count its gate type does not allow is
    /// rejected with [`ModelError::FaninMismatch`].
    pub fn reg_func(&mut self, func: Func) -> Result<FuncId, ModelError> {
        if let Func::Primitive { input_num, prim } = &func {
            if let Some(expected) = prim.arity_violation(*input_num) {
                return Err(ModelError::FaninMismatch {
                    expected,
                    got: *input_num,
                });
            }
        }
        Ok(self.funcs.reg(func))
    }

    /// Registers a primitive function.
    pub fn reg_primitive(
        &mut self,
        input_num: usize,
        prim: PrimType,
    ) -> Result<FuncId, ModelError> {
        self.reg_func(Func::Primitive { input_num, prim })
    }

    /// Registers a cover function.
    pub fn reg_cover(&mut self, cover: SopCover, output_inv: bool) -> FuncId {
        self.funcs.reg(Func::Cover { cover, output_inv })
    }

    /// Registers a truth-table function.
    pub fn reg_tvfunc(&mut self, tv: TvFunc) -> FuncId {
        self.funcs.reg(Func::TruthTable(tv))
    }

    /// Allocates a node with no driver yet.
    ///
    /// Readers use this for nets that are referenced before they are defined.
    pub fn new_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeImpl::new(name.into()));
        id
    }

    /// Creates a primary input.
    pub fn new_input(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.new_node(name);
        self.define_input(id);
        id
    }

    /// Turns an undefined node into a primary input.
    pub fn set_input(&mut self, id: NodeId) -> Result<(), ModelError> {
        self.check_undefined(id)?;
        self.define_input(id);
        Ok(())
    }

    fn define_input(&mut self, id: NodeId) {
        let input_id = self.inputs.len();
        self.inputs.push(id);
        self.nodes[usize::from(id)].kind = NodeKind::Input { input_id };
    }

    /// Adds a primary output driven by `src`, returning its position.
    pub fn new_output(&mut self, src: NodeId, name: impl Into<String>) -> Result<usize, ModelError> {
        self.check_id(src)?;
        let index = self.outputs.len();
        self.outputs.push(src);
        self.output_names.push(name.into());
        Ok(index)
    }

    /// Creates a node computing function `func` of `fanins`.
    pub fn new_logic(
        &mut self,
        fanins: &[NodeId],
        func: FuncId,
        name: impl Into<String>,
    ) -> Result<NodeId, ModelError> {
        self.check_fanins(self.func_input_num(func)?, fanins)?;
        let id = self.new_node(name);
        self.set_logic(id, fanins, func)?;
        Ok(id)
    }

    /// Creates a primitive gate node.
    pub fn new_primitive(
        &mut self,
        fanins: &[NodeId],
        prim: PrimType,
        name: impl Into<String>,
    ) -> Result<NodeId, ModelError> {
        self.check_prim_fanins(prim, fanins)?;
        let id = self.new_node(name);
        self.set_primitive(id, fanins, prim)?;
        Ok(id)
    }

    /// Creates an AND node with optionally inverted fanins.
    pub fn new_aig(
        &mut self,
        src0: NodeId,
        inv0: bool,
        src1: NodeId,
        inv1: bool,
        name: impl Into<String>,
    ) -> Result<NodeId, ModelError> {
        self.check_fanins(2, &[src0, src1])?;
        let id = self.new_node(name);
        self.set_aig(id, src0, inv0, src1, inv1)?;
        Ok(id)
    }

    /// Creates a cover node.
    pub fn new_cover(
        &mut self,
        fanins: &[NodeId],
        cover: SopCover,
        output_inv: bool,
        name: impl Into<String>,
    ) -> Result<NodeId, ModelError> {
        self.check_fanins(cover.input_num(), fanins)?;
        let id = self.new_node(name);
        self.set_cover(id, fanins, cover, output_inv)?;
        Ok(id)
    }

    /// Creates a truth-table node.
    pub fn new_tvfunc(
        &mut self,
        fanins: &[NodeId],
        tv: TvFunc,
        name: impl Into<String>,
    ) -> Result<NodeId, ModelError> {
        self.check_fanins(tv.input_num(), fanins)?;
        let id = self.new_node(name);
        self.set_tvfunc(id, fanins, tv)?;
        Ok(id)
    }

    /// Defines an undefined node as function `func` of `fanins`.
    pub fn set_logic(
        &mut self,
        id: NodeId,
        fanins: &[NodeId],
        func: FuncId,
    ) -> Result<(), ModelError> {
        self.check_undefined(id)?;
        self.check_fanins(self.func_input_num(func)?, fanins)?;
        self.nodes[usize::from(id)].kind = NodeKind::Logic {
            func,
            fanins: fanins.to_vec(),
        };
        Ok(())
    }

    /// Defines an undefined node as a primitive gate.
    pub fn set_primitive(
        &mut self,
        id: NodeId,
        fanins: &[NodeId],
        prim: PrimType,
    ) -> Result<(), ModelError> {
        self.check_undefined(id)?;
        self.check_prim_fanins(prim, fanins)?;
        let func = self.reg_primitive(fanins.len(), prim)?;
        self.set_logic(id, fanins, func)
    }

    /// Defines an undefined node as an AND with optionally inverted fanins.
    pub fn set_aig(
        &mut self,
        id: NodeId,
        src0: NodeId,
        inv0: bool,
        src1: NodeId,
        inv1: bool,
    ) -> Result<(), ModelError> {
        self.check_undefined(id)?;
        self.check_fanins(2, &[src0, src1])?;
        self.nodes[usize::from(id)].kind = NodeKind::Aig {
            fanins: [src0, src1],
            inv: [inv0, inv1],
        };
        Ok(())
    }

    /// Defines an undefined node as a cover.
    pub fn set_cover(
        &mut self,
        id: NodeId,
        fanins: &[NodeId],
        cover: SopCover,
        output_inv: bool,
    ) -> Result<(), ModelError> {
        self.check_undefined(id)?;
        self.check_fanins(cover.input_num(), fanins)?;
        let func = self.reg_cover(cover, output_inv);
        self.set_logic(id, fanins, func)
    }

    /// Defines an undefined node as a truth table.
    pub fn set_tvfunc(
        &mut self,
        id: NodeId,
        fanins: &[NodeId],
        tv: TvFunc,
    ) -> Result<(), ModelError> {
        self.check_undefined(id)?;
        self.check_fanins(tv.input_num(), fanins)?;
        let func = self.reg_tvfunc(tv);
        self.set_logic(id, fanins, func)
    }

    /// Creates a D flip-flop and its output node.
    pub fn new_dff(&mut self, rsval: char, name: impl Into<String>) -> SeqId {
        let name = name.into();
        let output = self.new_node(name.clone());
        self.push_seq(SeqKind::Dff, output, rsval, name)
    }

    /// Creates a latch and its output node.
    pub fn new_latch(&mut self, rsval: char, name: impl Into<String>) -> SeqId {
        let name = name.into();
        let output = self.new_node(name.clone());
        self.push_seq(SeqKind::Latch, output, rsval, name)
    }

    /// Creates a D flip-flop driving an existing undefined node.
    pub fn add_dff(&mut self, output: NodeId, rsval: char) -> Result<SeqId, ModelError> {
        self.check_undefined(output)?;
        let name = self.nodes[usize::from(output)].name.clone();
        Ok(self.push_seq(SeqKind::Dff, output, rsval, name))
    }

    /// Creates a latch driving an existing undefined node.
    pub fn add_latch(&mut self, output: NodeId, rsval: char) -> Result<SeqId, ModelError> {
        self.check_undefined(output)?;
        let name = self.nodes[usize::from(output)].name.clone();
        Ok(self.push_seq(SeqKind::Latch, output, rsval, name))
    }

    fn push_seq(&mut self, kind: SeqKind, output: NodeId, rsval: char, name: String) -> SeqId {
        let seq = SeqId::from(self.seqs.len());
        self.seqs.push(SeqImpl {
            name,
            kind,
            data_src: None,
            control: None,
            clear: None,
            preset: None,
            data_output: output,
            rsval,
        });
        self.nodes[usize::from(output)].kind = NodeKind::SeqOutput { seq };
        seq
    }

    /// Renames a sequential element.
    pub fn set_seq_name(&mut self, seq: SeqId, name: impl Into<String>) -> Result<(), ModelError> {
        self.seq_mut(seq)?.name = name.into();
        Ok(())
    }

    /// Connects the data input of a sequential element.
    pub fn set_data_src(&mut self, seq: SeqId, src: NodeId) -> Result<(), ModelError> {
        self.check_id(src)?;
        self.seq_mut(seq)?.data_src = Some(src);
        Ok(())
    }

    /// Connects the clock of a flip-flop.
    pub fn set_clock(&mut self, seq: SeqId, src: NodeId) -> Result<(), ModelError> {
        self.set_control(seq, src, SeqKind::Dff)
    }

    /// Connects the enable of a latch.
    pub fn set_enable(&mut self, seq: SeqId, src: NodeId) -> Result<(), ModelError> {
        self.set_control(seq, src, SeqKind::Latch)
    }

    fn set_control(&mut self, seq: SeqId, src: NodeId, kind: SeqKind) -> Result<(), ModelError> {
        self.check_id(src)?;
        let s = self.seq_mut(seq)?;
        if s.kind != kind {
            return Err(ModelError::WrongSeqKind {
                seq,
                expected: kind.as_str(),
            });
        }
        s.control = Some(src);
        Ok(())
    }

    /// Connects the asynchronous clear.
    pub fn set_clear(&mut self, seq: SeqId, src: NodeId) -> Result<(), ModelError> {
        self.check_id(src)?;
        self.seq_mut(seq)?.clear = Some(src);
        Ok(())
    }

    /// Connects the asynchronous preset.
    pub fn set_preset(&mut self, seq: SeqId, src: NodeId) -> Result<(), ModelError> {
        self.check_id(src)?;
        self.seq_mut(seq)?.preset = Some(src);
        Ok(())
    }

    fn check_id(&self, id: NodeId) -> Result<(), ModelError> {
        let index = usize::from(id);
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(out_of_range("node", index, self.nodes.len()))
        }
    }

    fn check_undefined(&self, id: NodeId) -> Result<(), ModelError> {
        self.check_id(id)?;
        let node = self.node_impl(id);
        if node.is_defined() {
            return Err(ModelError::AlreadyDefined {
                node: id,
                name: node.name.clone(),
            });
        }
        Ok(())
    }

    fn check_fanins(&self, expected: usize, fanins: &[NodeId]) -> Result<(), ModelError> {
        if expected != fanins.len() {
            return Err(ModelError::FaninMismatch {
                expected,
                got: fanins.len(),
            });
        }
        fanins.iter().try_for_each(|&f| self.check_id(f))
    }

    fn check_prim_fanins(&self, prim: PrimType, fanins: &[NodeId]) -> Result<(), ModelError> {
        let expected = prim.arity_violation(fanins.len()).unwrap_or(fanins.len());
        self.check_fanins(expected, fanins)
    }

    fn func_input_num(&self, func: FuncId) -> Result<usize, ModelError> {
        self.funcs
            .get(func)
            .map(Func::input_num)
            .ok_or_else(|| out_of_range("func", usize::from(func), self.funcs.len()))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeImpl, ModelError> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(usize::from(id))
            .ok_or_else(|| out_of_range("node", usize::from(id), len))
    }

    fn seq_mut(&mut self, id: SeqId) -> Result<&mut SeqImpl, ModelError> {
        let len = self.seqs.len();
        self.seqs
            .get_mut(usize::from(id))
            .ok_or_else(|| out_of_range("seq", usize::from(id), len))
    }

    // ---- finishing ----

    /// Validates the network and computes the logic list.
    ///
    /// Fails if a node was never defined, a sequential element has no data
    /// source, or the combinational part has a cycle. On success the logic
    /// list holds every logic node reachable from an output or a sequential
    /// element pin, fanins before fanouts.
    pub fn wrap_up(&mut self) -> Result<(), ModelError> {
        for (i, node) in self.nodes.iter().enumerate() {
            if !node.is_defined() {
                return Err(ModelError::Undefined {
                    node: NodeId::from(i),
                    name: node.name.clone(),
                });
            }
        }
        for (i, seq) in self.seqs.iter().enumerate() {
            if seq.data_src.is_none() {
                return Err(ModelError::NoDataSource {
                    seq: SeqId::from(i),
                });
            }
        }

        let n = self.nodes.len();
        let mut visited = FixedBitSet::with_capacity(n);
        let mut on_stack = FixedBitSet::with_capacity(n);
        let mut order = Vec::new();

        let roots: Vec<NodeId> = self
            .outputs
            .iter()
            .copied()
            .chain(self.seqs.iter().flat_map(SeqImpl::pins))
            .collect();
        for root in roots {
            self.topo_visit(root, &mut visited, &mut on_stack, &mut order, true)?;
        }

        // Unreachable logic is not listed but must still be loop-free.
        for i in 0..n {
            self.topo_visit(NodeId::from(i), &mut visited, &mut on_stack, &mut order, false)?;
        }

        self.logics = order;
        Ok(())
    }

    /// Iterative post-order DFS over fanins.
    fn topo_visit(
        &self,
        root: NodeId,
        visited: &mut FixedBitSet,
        on_stack: &mut FixedBitSet,
        order: &mut Vec<NodeId>,
        collect: bool,
    ) -> Result<(), ModelError> {
        let r = usize::from(root);
        if visited.contains(r) {
            return Ok(());
        }
        if !self.nodes[r].is_logic() {
            visited.insert(r);
            return Ok(());
        }

        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        on_stack.insert(r);
        while let Some((id, pos)) = stack.last_mut() {
            let id = *id;
            let fanins = self.node_impl(id).fanins();
            if *pos < fanins.len() {
                let child = fanins[*pos];
                *pos += 1;
                let c = usize::from(child);
                if on_stack.contains(c) {
                    return Err(ModelError::CombinationalLoop {
                        node: child,
                        name: self.nodes[c].name.clone(),
                    });
                }
                if visited.contains(c) {
                    continue;
                }
                if self.nodes[c].is_logic() {
                    on_stack.insert(c);
                    stack.push((child, 0));
                } else {
                    visited.insert(c);
                }
            } else {
                stack.pop();
                let i = usize::from(id);
                on_stack.set(i, false);
                visited.insert(i);
                if collect {
                    order.push(id);
                }
            }
        }
        Ok(())
    }
}

fn write_pin(f: &mut fmt::Formatter<'_>, label: &str, node: Option<Node<'_>>) -> fmt::Result {
    match node {
        Some(node) => write!(f, " {label}={node}"),
        None => Ok(()),
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        if !self.comment.is_empty() {
            writeln!(f, "Comment: {}", self.comment)?;
        }

        writeln!(f, "Inputs:")?;
        for (i, &id) in self.inputs.iter().enumerate() {
            writeln!(f, "  I#{i}: {}", Node::new(self, id))?;
        }

        writeln!(f, "Outputs:")?;
        for (i, (&src, name)) in self.outputs.iter().zip(&self.output_names).enumerate() {
            writeln!(f, "  O#{i}: {name} = {}", Node::new(self, src))?;
        }

        if !self.seqs.is_empty() {
            writeln!(f, "Seqs:")?;
            for seq in self.seq_list() {
                write!(
                    f,
                    "  {}: {} {}",
                    seq.id(),
                    seq.kind().as_str(),
                    seq.data_output()
                )?;
                write_pin(f, "D", seq.data_src())?;
                write_pin(f, "CLK", seq.clock())?;
                write_pin(f, "EN", seq.enable())?;
                write_pin(f, "CLR", seq.clear())?;
                write_pin(f, "PRE", seq.preset())?;
                writeln!(f, " rsval='{}'", seq.rsval())?;
            }
        }

        writeln!(f, "Logic:")?;
        for &id in &self.logics {
            let node = Node::new(self, id);
            write!(f, "  {node} = ")?;
            match node.kind() {
                NodeKind::Aig { fanins, inv } => {
                    let lit = |k: usize| {
                        format!("{}{}", if inv[k] { "~" } else { "" }, Node::new(self, fanins[k]))
                    };
                    write!(f, "AND({}, {})", lit(0), lit(1))?;
                }
                NodeKind::Logic { func, fanins } => {
                    write!(f, "{func}(")?;
                    for (k, &fi) in fanins.iter().enumerate() {
                        if k > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", Node::new(self, fi))?;
                    }
                    f.write_str(")")?;
                }
                _ => {}
            }
            writeln!(f)?;
        }

        writeln!(f, "Funcs:")?;
        for (i, func) in self.funcs.iter().enumerate() {
            writeln!(f, "  {}: {func}", FuncId::from(i))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_adder() -> Model {
        let mut m = Model::new();
        m.set_name("ha");
        let a = m.new_input("a");
        let b = m.new_input("b");
        let s = m.new_primitive(&[a, b], PrimType::Xor, "s").unwrap();
        let c = m.new_aig(a, false, b, false, "c").unwrap();
        m.new_output(s, "s").unwrap();
        m.new_output(c, "c").unwrap();
        m.wrap_up().unwrap();
        m
    }

    #[test]
    fn test_empty_model() {
        let m = Model::new();
        assert!(!m.library().is_valid());
        assert_eq!(m.name(), "");
        assert_eq!(m.node_num(), 0);
        assert!(matches!(
            m.input(0),
            Err(ModelError::OutOfRange {
                what: "input",
                index: 0,
                len: 0
            })
        ));
    }

    #[test]
    fn test_build_and_wrap_up() {
        let m = half_adder();
        assert_eq!(m.input_num(), 2);
        assert_eq!(m.output_num(), 2);
        assert_eq!(m.logic_num(), 2);
        assert_eq!(m.func_num(), 1);
        assert_eq!(m.output_name(1).unwrap(), "c");
        assert_eq!(m.input_name_list().collect::<Vec<_>>(), ["a", "b"]);

        let s = m.output(0).unwrap();
        assert!(s.is_logic());
        assert_eq!(s.func().unwrap().input_num(), 2);
        assert_eq!(s.fanin(1).unwrap().name(), "b");
        assert!(s.fanin(2).is_err());
    }

    #[test]
    fn test_double_definition() {
        let mut m = Model::new();
        let a = m.new_input("a");
        let err = m.set_input(a).unwrap_err();
        assert!(matches!(err, ModelError::AlreadyDefined { .. }));
    }

    #[test]
    fn test_fanin_mismatch() {
        let mut m = Model::new();
        let a = m.new_input("a");
        let cover = SopCover::from_strs(2, &["11"]).unwrap();
        let err = m.new_cover(&[a], cover, false, "x").unwrap_err();
        assert_eq!(err, ModelError::FaninMismatch { expected: 2, got: 1 });

        let err = m.new_primitive(&[a, a], PrimType::Not, "y").unwrap_err();
        assert_eq!(err, ModelError::FaninMismatch { expected: 1, got: 2 });
    }

    #[test]
    fn test_reg_primitive_arity() {
        let mut m = Model::new();
        let err = m.reg_primitive(0, PrimType::Buff).unwrap_err();
        assert_eq!(err, ModelError::FaninMismatch { expected: 1, got: 0 });
        let err = m.reg_primitive(2, PrimType::C1).unwrap_err();
        assert_eq!(err, ModelError::FaninMismatch { expected: 0, got: 2 });
        let err = m
            .reg_func(Func::Primitive {
                input_num: 0,
                prim: PrimType::Xor,
            })
            .unwrap_err();
        assert_eq!(err, ModelError::FaninMismatch { expected: 1, got: 0 });
        assert_eq!(m.func_num(), 0);

        // a valid registration still builds and evaluates
        let a = m.new_input("a");
        let f = m.reg_primitive(1, PrimType::Not).unwrap();
        let y = m.new_logic(&[a], f, "y").unwrap();
        m.new_output(y, "y").unwrap();
        m.wrap_up().unwrap();
        assert_eq!(m.eval(&[false], &[]).unwrap().outputs, vec![true]);
    }

    #[test]
    fn test_wrong_seq_kind() {
        let mut m = Model::new();
        let clk = m.new_input("clk");
        let l = m.new_latch('0', "l");
        assert!(matches!(
            m.set_clock(l, clk),
            Err(ModelError::WrongSeqKind { expected: "DFF", .. })
        ));
        m.set_enable(l, clk).unwrap();
        assert_eq!(m.seq(0).unwrap().enable().unwrap().id(), clk);
        assert!(m.seq(0).unwrap().clock().is_none());
    }

    #[test]
    fn test_wrap_up_undefined() {
        let mut m = Model::new();
        let x = m.new_node("x");
        m.new_output(x, "x").unwrap();
        assert!(matches!(m.wrap_up(), Err(ModelError::Undefined { .. })));
    }

    #[test]
    fn test_wrap_up_no_data_src() {
        let mut m = Model::new();
        let q = m.new_dff('0', "q");
        let out = m.seq(0).unwrap().data_output().id();
        m.new_output(out, "q").unwrap();
        assert_eq!(m.wrap_up(), Err(ModelError::NoDataSource { seq: q }));
    }

    #[test]
    fn test_wrap_up_loop() {
        let mut m = Model::new();
        let a = m.new_input("a");
        let x = m.new_node("x");
        let y = m.new_primitive(&[a, x], PrimType::And, "y").unwrap();
        m.set_primitive(x, &[y], PrimType::Not).unwrap();
        m.new_output(y, "y").unwrap();
        assert!(matches!(
            m.wrap_up(),
            Err(ModelError::CombinationalLoop { .. })
        ));
    }

    #[test]
    fn test_loop_through_dff_is_fine() {
        let mut m = Model::new();
        let seq = m.new_dff('0', "q");
        let q = m.seq(0).unwrap().data_output().id();
        let nq = m.new_primitive(&[q], PrimType::Not, "nq").unwrap();
        m.set_data_src(seq, nq).unwrap();
        m.new_output(q, "q").unwrap();
        m.wrap_up().unwrap();
        assert_eq!(m.logic_list(), &[nq]);
    }

    #[test]
    fn test_unreachable_logic_not_listed() {
        let mut m = Model::new();
        let a = m.new_input("a");
        let used = m.new_primitive(&[a], PrimType::Not, "used").unwrap();
        let _dangling = m.new_primitive(&[a], PrimType::Buff, "dangling").unwrap();
        m.new_output(used, "o").unwrap();
        m.wrap_up().unwrap();
        assert_eq!(m.logic_list(), &[used]);
    }

    #[test]
    fn test_topological_order() {
        let mut m = Model::new();
        let a = m.new_input("a");
        // define the consumer before its fanin
        let mid = m.new_node("mid");
        let top = m.new_primitive(&[mid, a], PrimType::Or, "top").unwrap();
        m.set_primitive(mid, &[a], PrimType::Not).unwrap();
        m.new_output(top, "top").unwrap();
        m.wrap_up().unwrap();
        assert_eq!(m.logic_list(), &[mid, top]);
    }

    #[test]
    fn test_print() {
        let m = half_adder();
        let mut buf = Vec::new();
        m.print(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Name: ha\n"));
        assert!(text.contains("O#1: c = #3(c)"));
        assert!(text.contains("#3(c) = AND(#0(a), #1(b))"));
        assert!(text.contains("FUNC#0: Primitive(XOR, 2)"));
    }
}

//! Single-cycle evaluation.

use bitvec::prelude::*;

use crate::error::ModelError;
use crate::model::Model;
use crate::node::NodeKind;

/// Values produced by one evaluation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalResult {
    /// One value per primary output.
    pub outputs: Vec<bool>,
    /// Value at each sequential element's data input, in seq order.
    pub next_state: Vec<bool>,
}

impl Model {
    /// Evaluates the combinational part of a wrapped-up model.
    ///
    /// `inputs` gives one value per primary input and `state` one value per
    /// sequential element. Clock, enable, clear and preset pins are not
    /// interpreted; the next state of every element is the value at its data
    /// input.
    pub fn eval(&self, inputs: &[bool], state: &[bool]) -> Result<EvalResult, ModelError> {
        if inputs.len() != self.input_num() {
            return Err(ModelError::InputLength {
                what: "input",
                expected: self.input_num(),
                got: inputs.len(),
            });
        }
        if state.len() != self.seq_num() {
            return Err(ModelError::InputLength {
                what: "state",
                expected: self.seq_num(),
                got: state.len(),
            });
        }

        let mut values: BitVec = bitvec![0; self.node_num()];
        for (&id, &v) in self.input_list().iter().zip(inputs) {
            values.set(usize::from(id), v);
        }
        for (seq, &v) in self.seq_list().zip(state) {
            values.set(usize::from(seq.data_output().id()), v);
        }

        let mut fanin_vals = Vec::new();
        for &id in self.logic_list() {
            let node = self.node(id)?;
            let v = match node.kind() {
                NodeKind::Aig { fanins, inv } => {
                    let a = values[usize::from(fanins[0])] ^ inv[0];
                    let b = values[usize::from(fanins[1])] ^ inv[1];
                    a & b
                }
                NodeKind::Logic { fanins, .. } => {
                    fanin_vals.clear();
                    fanin_vals.extend(fanins.iter().map(|&f| values[usize::from(f)]));
                    // logic nodes always carry a registered function
                    node.func().is_some_and(|func| func.eval(&fanin_vals))
                }
                _ => continue,
            };
            values.set(usize::from(id), v);
        }

        let outputs = self
            .output_list()
            .iter()
            .map(|&id| values[usize::from(id)])
            .collect();
        let next_state = self
            .seq_list()
            .map(|seq| seq.data_src().is_some_and(|src| values[usize::from(src.id())]))
            .collect();
        Ok(EvalResult {
            outputs,
            next_state,
        })
    }
}

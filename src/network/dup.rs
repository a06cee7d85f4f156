//! Duplication of a network into a new, independent one
//!
//! During a copy, the scratch slot of each source node holds the edge it maps to in the target.
//! Every variant validates its arguments first, so that a rejected call leaves both networks untouched.
//!
//! ```
//! # use aigkit::Network;
//! let mut aig = Network::new();
//! let a = aig.add_input();
//! let b = aig.add_input();
//! let x = aig.and(a, !b);
//! aig.add_output(x);
//!
//! // Replace the second input by the constant false
//! let cof = aig.cofactor(1, false).unwrap();
//! assert_eq!(cof.nb_inputs(), 1);
//! assert_eq!(cof.nb_ands(), 0);
//! assert_eq!(cof.output(0), cof.input(0));
//! ```

use itertools::Itertools;

use crate::error::{Error, Result};
use crate::network::edge::{Edge, NodeId};
use crate::network::node::{NodeType, Scratch};
use crate::Network;

/// How the inputs of the source are mapped when duplicating a network
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMapping {
    /// Each input is copied, in the same order
    Identity,
    /// Input j of the copy is input `perm[j]` of the source
    Permutation(Vec<usize>),
    /// Inputs with a value are replaced by a constant and not created in the copy
    Constants(Vec<Option<bool>>),
}

/// Function used to compare the outputs of the two networks of a miter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiterOp {
    /// True when the outputs differ
    Xor,
    /// True when the first output holds and the second does not
    Implication,
    /// True when either output holds
    Or,
    /// True when both outputs hold
    And,
}

impl MiterOp {
    fn apply(&self, aig: &mut Network, a: Edge, b: Edge) -> Edge {
        match self {
            MiterOp::Xor => aig.xor(a, b),
            MiterOp::Implication => aig.and(a, !b),
            MiterOp::Or => aig.or(a, b),
            MiterOp::And => aig.and(a, b),
        }
    }
}

impl Network {
    /// Empty network with the same settings
    fn empty_copy(&self, with_hierarchy: bool) -> Network {
        let mut ret = Network::with_capacity(self.nb_nodes());
        ret.xor_nodes = self.xor_nodes;
        if with_hierarchy {
            ret.hierarchy = self.hierarchy.clone();
        }
        ret
    }

    /// Map the constant and the inputs before a copy, and start a traversal to track copied nodes
    fn start_copy(&mut self, inputs: &[Edge]) {
        debug_assert_eq!(inputs.len(), self.nb_inputs());
        self.clean_scratch();
        self.increment_trav_id();
        self.set_scratch(NodeId::CONST, Scratch::Copy(Edge::one()));
        self.set_trav_id_current(NodeId::CONST);
        for (i, e) in inputs.iter().enumerate() {
            let id = self.cis[i];
            self.set_scratch(id, Scratch::Copy(*e));
            self.set_trav_id_current(id);
        }
    }

    /// Copy of an edge in the target network, optionally through the class representative
    fn copy_of(&self, e: Edge, use_reprs: bool) -> Edge {
        let e = if use_reprs {
            self.class_repr(e.node()) ^ e.is_inverted()
        } else {
            e
        };
        match self.arena.get(e.node()).scratch {
            Scratch::Copy(c) => c ^ e.is_inverted(),
            _ => panic!("Node {} has not been copied", e.node()),
        }
    }

    /// Build the copy of a node whose fanins are already copied
    fn copy_node(&mut self, dst: &mut Network, id: NodeId, use_reprs: bool) -> Edge {
        let node = self.arena.get(id);
        let kind = node.kind;
        let f: Vec<Edge> = node
            .fanins()
            .iter()
            .map(|f| self.copy_of(*f, use_reprs))
            .collect();
        let ret = match kind {
            NodeType::And => dst.and(f[0], f[1]),
            NodeType::Xor => dst.xor(f[0], f[1]),
            NodeType::Buf => f[0],
            _ => panic!("{kind} node {id} cannot be copied as logic"),
        };
        self.set_scratch(id, Scratch::Copy(ret));
        ret
    }

    /// Copy the cone of a node that is not copied yet, with an explicit stack
    fn rebuild_cone(&mut self, dst: &mut Network, root: NodeId, use_reprs: bool) {
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                self.copy_node(dst, id, use_reprs);
                continue;
            }
            if self.is_trav_id_current(id) {
                continue;
            }
            self.set_trav_id_current(id);
            let node = self.arena.get(id);
            assert!(node.kind.is_logic(), "{} node {id} has no copy", node.kind);
            stack.push((id, true));
            let children: Vec<NodeId> = node
                .fanins()
                .iter()
                .rev()
                .map(|f| {
                    if use_reprs {
                        self.class_repr(f.node()).node()
                    } else {
                        f.node()
                    }
                })
                .collect();
            for c in children {
                if !self.is_trav_id_current(c) {
                    stack.push((c, false));
                }
            }
        }
    }

    /// Copy the cones of the given outputs; returns the copies of their drivers
    fn rebuild_outputs(
        &mut self,
        dst: &mut Network,
        outputs: &[usize],
        use_reprs: bool,
    ) -> Vec<Edge> {
        let mut ret = Vec::with_capacity(outputs.len());
        for &o in outputs {
            let driver = self.output(o);
            let root = if use_reprs {
                self.class_repr(driver.node()).node()
            } else {
                driver.node()
            };
            self.rebuild_cone(dst, root, use_reprs);
            ret.push(self.copy_of(driver, use_reprs));
        }
        ret
    }

    /// Copy every logic node in identity order, including dangling ones
    fn copy_ordered(&mut self, dst: &mut Network, use_reprs: bool) {
        for id in self.logic_nodes() {
            self.copy_node(dst, id, use_reprs);
        }
    }

    /// Reproduce the equivalence classes of the source between the copies, when both ends were copied
    fn copy_choices(&mut self, dst: &mut Network) {
        if !self.has_choices() {
            return;
        }
        dst.start_choices();
        for id in self.logic_nodes() {
            let Some(r) = self.repr(id) else { continue };
            let (Scratch::Copy(c), Scratch::Copy(cr)) =
                (self.arena.get(id).scratch, self.arena.get(r.node()).scratch)
            else {
                continue;
            };
            dst.merge(c, cr ^ r.is_inverted());
        }
    }

    fn check_output_list(&self, outputs: &[usize]) -> Result<()> {
        for &o in outputs {
            if o >= self.nb_outputs() {
                return Err(Error::OutputOutOfRange {
                    index: o,
                    nb_outputs: self.nb_outputs(),
                });
            }
        }
        Ok(())
    }

    /// Copy of the network, keeping every node and the equivalence classes
    ///
    /// Logic is copied in identity order, so dangling nodes are kept and there is no cleanup.
    /// Buffers are not copied: their users are connected to the buffer's fanin.
    pub fn dup(&mut self) -> Network {
        let mut ret = self.empty_copy(true);
        ret.add_inputs(self.nb_inputs());
        let inputs: Vec<Edge> = (0..self.nb_inputs()).map(|i| ret.input(i)).collect();
        self.start_copy(&inputs);
        self.copy_ordered(&mut ret, false);
        for i in 0..self.nb_outputs() {
            let e = self.copy_of(self.output(i), false);
            ret.add_output(e);
        }
        self.copy_choices(&mut ret);
        log::debug!("Duplicated network: {} nodes", ret.nb_nodes());
        ret
    }

    /// Copy of the logic reachable from the outputs
    ///
    /// If the network has equivalence classes, the members reachable through them are copied as well,
    /// and the classes are carried to the copy.
    pub fn dup_dfs(&mut self) -> Network {
        let mut ret = self.empty_copy(true);
        ret.add_inputs(self.nb_inputs());
        let inputs: Vec<Edge> = (0..self.nb_inputs()).map(|i| ret.input(i)).collect();
        if self.has_choices() {
            let order = self.dfs_choices();
            self.start_copy(&inputs);
            for id in order {
                self.copy_node(&mut ret, id, false);
            }
            for i in 0..self.nb_outputs() {
                let e = self.copy_of(self.output(i), false);
                ret.add_output(e);
            }
            self.copy_choices(&mut ret);
        } else {
            self.start_copy(&inputs);
            let all: Vec<usize> = (0..self.nb_outputs()).collect();
            for e in self.rebuild_outputs(&mut ret, &all, false) {
                ret.add_output(e);
            }
        }
        log::debug!("Duplicated reachable logic: {} nodes", ret.nb_nodes());
        ret
    }

    /// Copy without the inputs that are not used by any node or output
    ///
    /// Returns the new network and, for each of its inputs, the index of the corresponding input here.
    pub fn dup_trim(&mut self) -> (Network, Vec<usize>) {
        let mut ret = self.empty_copy(false);
        let mut kept = Vec::new();
        let mut inputs = Vec::with_capacity(self.nb_inputs());
        for (i, &id) in self.cis.iter().enumerate() {
            if self.arena.get(id).refs > 0 {
                kept.push(i);
                inputs.push(ret.add_input());
            } else {
                inputs.push(Edge::zero());
            }
        }
        self.start_copy(&inputs);
        self.copy_ordered(&mut ret, false);
        for i in 0..self.nb_outputs() {
            let e = self.copy_of(self.output(i), false);
            ret.add_output(e);
        }
        ret.cleanup();
        log::debug!(
            "Trimmed network: {} of {} inputs kept",
            ret.nb_inputs(),
            self.nb_inputs()
        );
        (ret, kept)
    }

    /// Copy of the network with the logic created level by level
    ///
    /// Identities in the copy follow the levels of the nodes here. Dangling nodes and equivalence
    /// classes are kept.
    pub fn dup_levelized(&mut self) -> Network {
        let levels = self.levels_by_depth();
        let mut ret = self.empty_copy(true);
        ret.add_inputs(self.nb_inputs());
        let inputs: Vec<Edge> = (0..self.nb_inputs()).map(|i| ret.input(i)).collect();
        self.start_copy(&inputs);
        for id in levels.into_iter().flatten() {
            self.copy_node(&mut ret, id, false);
        }
        for i in 0..self.nb_outputs() {
            let e = self.copy_of(self.output(i), false);
            ret.add_output(e);
        }
        self.copy_choices(&mut ret);
        ret
    }

    /// Stack several networks over the same inputs
    ///
    /// The outputs of the result are the outputs of each network in turn.
    pub fn dup_array(networks: &mut [Network]) -> Result<Network> {
        let Some(first) = networks.first() else {
            return Ok(Network::new());
        };
        let n = first.nb_inputs();
        if let Some(other) = networks.iter().find(|a| a.nb_inputs() != n) {
            return Err(Error::InputCountMismatch(n, other.nb_inputs()));
        }
        let mut ret = first.empty_copy(false);
        ret.xor_nodes = networks.iter().all(|a| a.xor_nodes);
        ret.add_inputs(n);
        let inputs: Vec<Edge> = (0..n).map(|i| ret.input(i)).collect();
        for a in networks.iter_mut() {
            for e in a.append_into(&mut ret, &inputs)? {
                ret.add_output(e);
            }
        }
        log::debug!(
            "Stacked {} networks: {} outputs and {} nodes",
            networks.len(),
            ret.nb_outputs(),
            ret.nb_nodes()
        );
        Ok(ret)
    }

    /// Copy of the logic reachable from the outputs, with the inputs remapped
    pub fn dup_with(&mut self, mapping: &InputMapping) -> Result<Network> {
        let n = self.nb_inputs();
        match mapping {
            InputMapping::Identity => (),
            InputMapping::Permutation(perm) => {
                if perm.len() != n {
                    return Err(Error::InputCountMismatch(perm.len(), n));
                }
                let sorted: Vec<usize> = perm.iter().copied().sorted().collect();
                if sorted.iter().enumerate().any(|(i, &p)| i != p) {
                    return Err(Error::InvalidPermutation(format!("{:?}", perm)));
                }
            }
            InputMapping::Constants(values) => {
                if values.len() != n {
                    return Err(Error::InputCountMismatch(values.len(), n));
                }
            }
        }

        let mut ret = self.empty_copy(false);
        let inputs: Vec<Edge> = match mapping {
            InputMapping::Identity => (0..n).map(|_| ret.add_input()).collect(),
            InputMapping::Permutation(perm) => {
                ret.add_inputs(n);
                let mut inputs = vec![Edge::zero(); n];
                for (j, &p) in perm.iter().enumerate() {
                    inputs[p] = ret.input(j);
                }
                inputs
            }
            InputMapping::Constants(values) => values
                .iter()
                .map(|v| match v {
                    Some(b) => Edge::from(*b),
                    None => ret.add_input(),
                })
                .collect(),
        };
        self.start_copy(&inputs);
        let all: Vec<usize> = (0..self.nb_outputs()).collect();
        for e in self.rebuild_outputs(&mut ret, &all, false) {
            ret.add_output(e);
        }
        ret.cleanup();
        Ok(ret)
    }

    /// Copy with one input replaced by a constant; the input is removed from the copy
    pub fn cofactor(&mut self, input: usize, value: bool) -> Result<Network> {
        if input >= self.nb_inputs() {
            return Err(Error::InputOutOfRange {
                index: input,
                nb_inputs: self.nb_inputs(),
            });
        }
        let mut values = vec![None; self.nb_inputs()];
        values[input] = Some(value);
        self.dup_with(&InputMapping::Constants(values))
    }

    /// Copy with the inputs reordered: input j of the copy is input `perm[j]` of this network
    pub fn permute_inputs(&mut self, perm: &[usize]) -> Result<Network> {
        self.dup_with(&InputMapping::Permutation(perm.to_vec()))
    }

    /// Copy of the cones of some outputs, in the order given; all inputs are kept
    pub fn dup_outputs(&mut self, outputs: &[usize]) -> Result<Network> {
        self.check_output_list(outputs)?;
        let mut ret = self.empty_copy(false);
        ret.add_inputs(self.nb_inputs());
        let inputs: Vec<Edge> = (0..self.nb_inputs()).map(|i| ret.input(i)).collect();
        self.start_copy(&inputs);
        for e in self.rebuild_outputs(&mut ret, outputs, false) {
            ret.add_output(e);
        }
        Ok(ret)
    }

    /// Copy of the cones of some outputs, keeping only the inputs they depend on
    ///
    /// Returns the new network and, for each of its inputs, the index of the corresponding input here.
    pub fn extract_partition(&mut self, outputs: &[usize]) -> Result<(Network, Vec<usize>)> {
        self.check_output_list(outputs)?;
        let roots: Vec<NodeId> = outputs.iter().map(|&o| self.output(o).node()).collect();
        let support: Vec<usize> = self.support_of(&roots).into_iter().sorted().collect();
        let mut ret = self.empty_copy(false);
        let mut inputs = vec![Edge::zero(); self.nb_inputs()];
        for &i in &support {
            inputs[i] = ret.add_input();
        }
        self.start_copy(&inputs);
        for e in self.rebuild_outputs(&mut ret, outputs, false) {
            ret.add_output(e);
        }
        log::debug!(
            "Extracted {} outputs with {} inputs and {} nodes",
            ret.nb_outputs(),
            ret.nb_inputs(),
            ret.nb_nodes()
        );
        Ok((ret, support))
    }

    /// Copy with a single output, the Or of all outputs
    pub fn or_outputs(&mut self) -> Network {
        let mut ret = self.empty_copy(false);
        ret.add_inputs(self.nb_inputs());
        let inputs: Vec<Edge> = (0..self.nb_inputs()).map(|i| ret.input(i)).collect();
        self.start_copy(&inputs);
        let all: Vec<usize> = (0..self.nb_outputs()).collect();
        let outs = self.rebuild_outputs(&mut ret, &all, false);
        let o = ret.or_n(&outs);
        ret.add_output(o);
        ret.cleanup();
        ret
    }

    /// Build the logic of this network inside another one, with the inputs connected to the given edges
    ///
    /// No output is created; the edges computing the outputs are returned.
    pub fn append_into(&mut self, dst: &mut Network, inputs: &[Edge]) -> Result<Vec<Edge>> {
        if inputs.len() != self.nb_inputs() {
            return Err(Error::InputCountMismatch(inputs.len(), self.nb_inputs()));
        }
        if let Some(e) = inputs.iter().find(|e| !dst.is_valid(**e)) {
            return Err(Error::InvalidEdge(e.to_string()));
        }
        self.start_copy(inputs);
        let all: Vec<usize> = (0..self.nb_outputs()).collect();
        Ok(self.rebuild_outputs(dst, &all, false))
    }

    /// Combine two networks with the same interface, comparing their outputs pairwise
    ///
    /// Both networks share the inputs of the result, which has one output per pair of outputs.
    pub fn miter(a: &mut Network, b: &mut Network, op: MiterOp) -> Result<Network> {
        if a.nb_inputs() != b.nb_inputs() {
            return Err(Error::InputCountMismatch(a.nb_inputs(), b.nb_inputs()));
        }
        if a.nb_outputs() != b.nb_outputs() {
            return Err(Error::OutputCountMismatch(a.nb_outputs(), b.nb_outputs()));
        }
        let mut ret = a.empty_copy(false);
        ret.xor_nodes = a.xor_nodes && b.xor_nodes;
        ret.add_inputs(a.nb_inputs());
        let inputs: Vec<Edge> = (0..a.nb_inputs()).map(|i| ret.input(i)).collect();
        let outs_a = a.append_into(&mut ret, &inputs)?;
        let outs_b = b.append_into(&mut ret, &inputs)?;
        for (x, y) in outs_a.into_iter().zip(outs_b) {
            let o = op.apply(&mut ret, x, y);
            ret.add_output(o);
        }
        ret.cleanup();
        log::debug!(
            "Created {:?} miter with {} outputs and {} nodes",
            op,
            ret.nb_outputs(),
            ret.nb_nodes()
        );
        Ok(ret)
    }

    /// Copy without equivalence classes, each node being replaced by its class representative
    ///
    /// Logic is copied in identity order, then dangling nodes are removed.
    pub fn dup_repr(&mut self) -> Network {
        let mut ret = self.empty_copy(true);
        ret.add_inputs(self.nb_inputs());
        let inputs: Vec<Edge> = (0..self.nb_inputs()).map(|i| ret.input(i)).collect();
        self.start_copy(&inputs);
        self.copy_ordered(&mut ret, true);
        for i in 0..self.nb_outputs() {
            let e = self.copy_of(self.output(i), true);
            ret.add_output(e);
        }
        ret.cleanup();
        log::debug!("Duplicated network through representatives: {} nodes", ret.nb_nodes());
        ret
    }

    /// Copy without equivalence classes, rebuilding the output cones through the class representatives
    pub fn dup_repr_dfs(&mut self) -> Network {
        let mut ret = self.empty_copy(true);
        ret.add_inputs(self.nb_inputs());
        let inputs: Vec<Edge> = (0..self.nb_inputs()).map(|i| ret.input(i)).collect();
        self.start_copy(&inputs);
        let all: Vec<usize> = (0..self.nb_outputs()).collect();
        for e in self.rebuild_outputs(&mut ret, &all, true) {
            ret.add_output(e);
        }
        ret.cleanup();
        ret
    }
}

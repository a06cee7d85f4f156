//! Logic levels
//!
//! The level of an input or of the constant is 0, the level of an And node or of a buffer is one
//! more than its deepest fanin, and outputs take the level of their fanin. Xor nodes count as two levels.
//!
//! With a [`Hierarchy`] attached, inputs driven by a box take their level from the outputs
//! feeding the box, plus the delay of the box.

use std::fmt;

use crate::network::edge::NodeId;
use crate::network::node::{NodeType, Scratch};
use crate::Network;

/// Description of opaque boxes connecting network outputs back to network inputs
///
/// This is the only view of the hierarchy used by the network.
pub trait Hierarchy: fmt::Debug + Send + Sync {
    /// Box driving a combinational input, if any
    fn input_box(&self, input: usize) -> Option<usize>;

    /// Combinational outputs feeding the inputs of a box
    fn box_inputs(&self, bx: usize) -> Vec<usize>;

    /// Number of levels added between the inputs and the outputs of a box
    fn box_delay(&self, _bx: usize) -> u32 {
        0
    }
}

/// A box, whose inputs are network outputs and whose outputs are network inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxDesc {
    /// Combinational outputs feeding the box
    pub inputs: Vec<usize>,
    /// Combinational inputs driven by the box
    pub outputs: Vec<usize>,
    /// Levels added through the box
    pub delay: u32,
}

/// Straightforward hierarchy made of a list of boxes
#[derive(Debug, Clone, Default)]
pub struct BoxHierarchy {
    boxes: Vec<BoxDesc>,
}

impl BoxHierarchy {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a box; returns its index
    pub fn add_box(&mut self, inputs: Vec<usize>, outputs: Vec<usize>, delay: u32) -> usize {
        self.boxes.push(BoxDesc {
            inputs,
            outputs,
            delay,
        });
        self.boxes.len() - 1
    }

    /// Number of boxes
    pub fn nb_boxes(&self) -> usize {
        self.boxes.len()
    }
}

impl Hierarchy for BoxHierarchy {
    fn input_box(&self, input: usize) -> Option<usize> {
        self.boxes.iter().position(|b| b.outputs.contains(&input))
    }

    fn box_inputs(&self, bx: usize) -> Vec<usize> {
        self.boxes[bx].inputs.clone()
    }

    fn box_delay(&self, bx: usize) -> u32 {
        self.boxes[bx].delay
    }
}

impl Network {
    /// Nodes whose level must be known before the level of this node
    fn level_deps(&self, id: NodeId) -> Vec<NodeId> {
        let node = self.arena.get(id);
        match node.kind {
            NodeType::Ci => match &self.hierarchy {
                Some(h) => match h.input_box(node.cio_id as usize) {
                    Some(bx) => h.box_inputs(bx).iter().map(|&o| self.cos[o]).collect(),
                    None => Vec::new(),
                },
                None => Vec::new(),
            },
            _ => node.fanins().iter().map(|f| f.node()).collect(),
        }
    }

    /// Level of a node from the levels of its dependencies
    fn level_of(&self, id: NodeId) -> u32 {
        let node = self.arena.get(id);
        let max_fanin = node
            .fanins()
            .iter()
            .map(|f| self.arena.get(f.node()).level)
            .max()
            .unwrap_or(0);
        match node.kind {
            NodeType::None | NodeType::Const => 0,
            NodeType::Ci => match &self.hierarchy {
                Some(h) => match h.input_box(node.cio_id as usize) {
                    Some(bx) => {
                        let deepest = self
                            .level_deps(id)
                            .iter()
                            .map(|d| self.arena.get(*d).level)
                            .max()
                            .unwrap_or(0);
                        deepest + h.box_delay(bx)
                    }
                    None => 0,
                },
                None => 0,
            },
            NodeType::And | NodeType::Buf => 1 + max_fanin,
            NodeType::Xor => 2 + max_fanin,
            NodeType::Co => max_fanin,
        }
    }

    /// Recompute the level of every node; returns the maximum level of the outputs
    ///
    /// Panics if the boxes of the hierarchy create a combinational loop.
    pub fn levelize(&mut self) -> u32 {
        // Nodes being processed carry the previous stamp
        self.increment_trav_id();
        self.increment_trav_id();
        let roots: Vec<NodeId> = self.node_ids().collect();
        for root in roots {
            let mut stack = vec![(root, false)];
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    let level = self.level_of(id);
                    self.arena.get_mut(id).level = level;
                    self.set_trav_id_current(id);
                    continue;
                }
                if self.is_trav_id_current(id) {
                    continue;
                }
                assert!(
                    !self.is_trav_id_previous(id),
                    "Combinational loop through hierarchy boxes at node {id}"
                );
                self.set_trav_id_previous(id);
                stack.push((id, true));
                for d in self.level_deps(id) {
                    stack.push((d, false));
                }
            }
        }
        let ret = self.level_num();
        log::debug!("Levelized network: {} levels", ret);
        ret
    }

    /// Maximum level of the outputs
    pub fn level_num(&self) -> u32 {
        self.cos
            .iter()
            .map(|o| self.arena.get(*o).level)
            .max()
            .unwrap_or(0)
    }

    /// Logic nodes grouped by level, after levelization
    pub fn levels_by_depth(&mut self) -> Vec<Vec<NodeId>> {
        self.levelize();
        let mut ret: Vec<Vec<NodeId>> = Vec::new();
        for id in self.logic_nodes() {
            let l = self.arena.get(id).level as usize;
            if ret.len() <= l {
                ret.resize(l + 1, Vec::new());
            }
            ret[l].push(id);
        }
        ret
    }

    /// Distance of each logic node to the outputs, indexed by node identity
    ///
    /// A node driving only outputs has reverse level 1. Other entries are 0.
    pub fn reverse_levels(&mut self) -> Vec<u32> {
        let order = self.dfs_reverse();
        self.clean_scratch();
        for id in order {
            let mut lvl = 0;
            for &f in self.fanouts(id) {
                let node = self.arena.get(f);
                let l = match node.kind {
                    NodeType::Xor => node.scratch.value() + 1,
                    _ => node.scratch.value(),
                };
                lvl = lvl.max(l);
            }
            self.set_scratch(id, Scratch::Value(lvl + 1));
        }
        self.arena.iter().map(|n| n.scratch.value()).collect()
    }

    /// Latest level at which each logic node may be computed without increasing the depth
    ///
    /// Nodes on a critical path have a required level equal to their level.
    pub fn required_levels(&mut self) -> Vec<u32> {
        let max_level = self.levelize();
        let reverse = self.reverse_levels();
        let mut ret = vec![0u32; self.nb_ids()];
        for id in self.logic_nodes() {
            ret[id.index()] = (max_level + 1).saturating_sub(reverse[id.index()]);
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::BoxHierarchy;
    use crate::network::generators::testcases;
    use crate::network::Scratch;
    use crate::Network;

    #[test]
    fn test_levels() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let t1 = aig.and(a, b);
        let t2 = aig.and(t1, !c);
        aig.add_output(t2);
        assert_eq!(aig.nb_ands(), 2);
        assert_eq!(aig.levelize(), 2);
        assert_eq!(aig.node(t1.node()).level(), 1);
        assert_eq!(aig.node(t2.node()).level(), 2);
        assert_eq!(aig.node(aig.outputs()[0]).level(), 2);
        assert_eq!(aig.cleanup(), 0);
    }

    #[test]
    fn test_buffer_levels() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let t = aig.and(a, b);
        let buf = aig.add_buffer(!t);
        aig.add_output(buf);
        assert_eq!(aig.node(buf.node()).level(), 2);
        assert_eq!(aig.levelize(), 2);
        assert_eq!(aig.node(buf.node()).level(), 2);
    }

    #[test]
    fn test_incremental_levels() {
        // Levels maintained on creation agree with a full levelization
        let mut aig = testcases::random(8, 4, 300, 2);
        let before: Vec<u32> = aig.node_ids().map(|id| aig.node(id).level()).collect();
        aig.levelize();
        let after: Vec<u32> = aig.node_ids().map(|id| aig.node(id).level()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_levels_by_depth() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(b, c);
        let z = aig.and(x, y);
        aig.add_output(z);
        let levels = aig.levels_by_depth();
        assert_eq!(levels.len(), 3);
        assert!(levels[0].is_empty());
        assert_eq!(levels[1], vec![x.node(), y.node()]);
        assert_eq!(levels[2], vec![z.node()]);
    }

    #[test]
    fn test_required_levels() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let t1 = aig.and(a, b);
        let t2 = aig.and(t1, !c);
        let t3 = aig.and(b, c);
        aig.add_output(t2);
        aig.add_output(t3);
        let reverse = aig.reverse_levels();
        assert_eq!(reverse[t2.node().index()], 1);
        assert_eq!(reverse[t1.node().index()], 2);
        assert_eq!(reverse[t3.node().index()], 1);
        // The values are left in the scratch slots
        assert_eq!(aig.node(t1.node()).scratch(), Scratch::Value(2));
        let required = aig.required_levels();
        assert_eq!(required[t1.node().index()], 1);
        assert_eq!(required[t2.node().index()], 2);
        // Off the critical path, t3 has one level of slack
        assert_eq!(required[t3.node().index()], 2);
        assert_eq!(aig.node(t3.node()).level(), 1);
    }

    #[test]
    fn test_hierarchy() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        // Input 2 is driven by a box fed by output 0
        let boxed = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, !a);
        aig.add_output(y);
        let z = aig.and(boxed, b);
        aig.add_output(z);

        assert_eq!(aig.levelize(), 2);
        let mut h = BoxHierarchy::new();
        h.add_box(vec![0], vec![2], 3);
        assert_eq!(h.nb_boxes(), 1);
        aig.set_hierarchy(Arc::new(h));
        assert_eq!(aig.levelize(), 6);
        assert_eq!(aig.node(boxed.node()).level(), 5);
        assert_eq!(aig.node(z.node()).level(), 6);

        aig.clear_hierarchy();
        assert_eq!(aig.levelize(), 2);
    }

    #[test]
    #[should_panic]
    fn test_hierarchy_loop() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        aig.add_output(x);
        // The box feeds input 0 from output 0, which depends on input 0
        let mut h = BoxHierarchy::new();
        h.add_box(vec![0], vec![0], 1);
        aig.set_hierarchy(Arc::new(h));
        aig.levelize();
    }
}

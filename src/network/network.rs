use core::fmt;
use std::sync::Arc;

use crate::network::arena::Arena;
use crate::network::choice::ChoiceTable;
use crate::network::edge::{Edge, NodeId};
use crate::network::fanout::FanoutIndex;
use crate::network::level::Hierarchy;
use crate::network::node::{Node, NodeType, Scratch};
use crate::network::strash::StrashTable;

/// Representation of a logic network as a structurally hashed And-Inverter-Graph
///
/// Nodes are only created through the canonicalizing constructors such as [`Network::and`]:
/// trivial cases are simplified, fanins are ordered and isomorphic nodes are shared.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) arena: Arena,
    pub(crate) strash: StrashTable,
    pub(crate) cis: Vec<NodeId>,
    pub(crate) cos: Vec<NodeId>,
    pub(crate) nb_ands: usize,
    pub(crate) nb_xors: usize,
    pub(crate) nb_bufs: usize,
    pub(crate) trav_id: u32,
    pub(crate) xor_nodes: bool,
    pub(crate) fanout: Option<FanoutIndex>,
    pub(crate) choices: Option<ChoiceTable>,
    pub(crate) hierarchy: Option<Arc<dyn Hierarchy>>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Create a new network
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new network, with space reserved for this number of nodes
    pub fn with_capacity(nb_nodes: usize) -> Self {
        let mut arena = Arena::with_capacity(nb_nodes + 1);
        let c = arena.alloc(NodeType::Const);
        debug_assert!(c.is_const());
        arena.get_mut(c).phase = true;
        Network {
            arena,
            strash: StrashTable::with_capacity(nb_nodes),
            cis: Vec::new(),
            cos: Vec::new(),
            nb_ands: 0,
            nb_xors: 0,
            nb_bufs: 0,
            trav_id: 1,
            xor_nodes: false,
            fanout: None,
            choices: None,
            hierarchy: None,
        }
    }

    /// Return the number of combinational inputs
    pub fn nb_inputs(&self) -> usize {
        self.cis.len()
    }

    /// Return the number of combinational outputs
    pub fn nb_outputs(&self) -> usize {
        self.cos.len()
    }

    /// Return the number of And nodes
    pub fn nb_ands(&self) -> usize {
        self.nb_ands
    }

    /// Return the number of Xor nodes
    pub fn nb_xors(&self) -> usize {
        self.nb_xors
    }

    /// Return the number of buffer nodes
    pub fn nb_buffers(&self) -> usize {
        self.nb_bufs
    }

    /// Return the number of two-input logic nodes (And and Xor)
    pub fn nb_nodes(&self) -> usize {
        self.nb_ands + self.nb_xors
    }

    /// Return the number of live objects, including the constant, inputs and outputs
    pub fn nb_objects(&self) -> usize {
        self.arena.len() - self.arena.nb_deleted()
    }

    /// Return the number of identities issued so far; all identities are below this bound
    pub fn nb_ids(&self) -> usize {
        self.arena.len()
    }

    /// Get the input at index i
    pub fn input(&self, i: usize) -> Edge {
        assert!(i < self.nb_inputs());
        Edge::from(self.cis[i])
    }

    /// Get the edge driving the output at index i
    pub fn output(&self, i: usize) -> Edge {
        assert!(i < self.nb_outputs());
        self.arena.get(self.cos[i]).fanins[0]
    }

    /// Get the combinational input nodes, in interface order
    pub fn inputs(&self) -> &[NodeId] {
        &self.cis
    }

    /// Get the combinational output nodes, in interface order
    pub fn outputs(&self) -> &[NodeId] {
        &self.cos
    }

    /// Get the node with this identity
    pub fn node(&self, id: NodeId) -> &Node {
        self.arena.get(id)
    }

    /// Identities of all live nodes, in increasing order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena.iter().filter(|n| !n.is_dead()).map(|n| n.id)
    }

    /// Identities of all And, Xor and buffer nodes, in increasing order
    ///
    /// Fanins of these nodes always have a smaller identity, so this is a topological order.
    pub fn logic_nodes(&self) -> Vec<NodeId> {
        self.arena
            .iter()
            .filter(|n| n.kind.is_logic())
            .map(|n| n.id)
            .collect()
    }

    /// Add a new combinational input
    pub fn add_input(&mut self) -> Edge {
        let id = self.arena.alloc(NodeType::Ci);
        self.arena.get_mut(id).cio_id = self.cis.len() as u32;
        self.cis.push(id);
        Edge::from(id)
    }

    /// Add multiple combinational inputs
    pub fn add_inputs(&mut self, nb: usize) {
        for _ in 0..nb {
            self.add_input();
        }
    }

    /// Add a new combinational output driven by an existing edge
    pub fn add_output(&mut self, driver: Edge) {
        assert!(self.is_valid(driver), "Invalid signal {driver}");
        let id = self.arena.alloc(NodeType::Co);
        self.arena.get_mut(id).cio_id = self.cos.len() as u32;
        self.cos.push(id);
        self.connect(id, [driver, Edge::one()]);
    }

    /// Change the edge driving an existing output
    ///
    /// The previous driver loses a reference, and may be removed by [`Network::cleanup`].
    pub fn set_output(&mut self, i: usize, driver: Edge) {
        assert!(i < self.nb_outputs());
        assert!(self.is_valid(driver), "Invalid signal {driver}");
        let co = self.cos[i];
        let old = self.arena.get(co).fanins[0];
        self.arena.get_mut(old.node()).refs -= 1;
        let drv = self.arena.get_mut(driver.node());
        drv.refs += 1;
        let (level, phase) = (drv.level, drv.phase ^ driver.is_inverted());
        let node = self.arena.get_mut(co);
        node.fanins[0] = driver;
        node.level = level;
        node.phase = phase;
        self.invalidate_fanout();
    }

    /// Replace a node by another edge in all the logic and outputs that use it
    ///
    /// The transitive fanout of `old` is rebuilt with the canonicalizing constructors, so the network
    /// stays structurally hashed and topologically ordered. Outputs are re-pointed to the new logic.
    /// The previous nodes, `old` included, are left dangling for [`Network::cleanup`].
    ///
    /// Panics if `new` depends on `old`.
    pub fn replace(&mut self, old: NodeId, new: Edge) {
        assert!(self.is_valid(Edge::from(old)), "Invalid node {old}");
        assert!(self.is_valid(new), "Invalid signal {new}");
        assert!(!old.is_const(), "The constant node cannot be replaced");
        if new == Edge::from(old) {
            return;
        }
        assert!(
            !self.check_tfi(new.node(), old),
            "Replacing {old} by {new} would create a loop"
        );

        // Transitive fanout of the node, in topological order
        self.start_fanout();
        self.increment_trav_id();
        let mut tfo = Vec::new();
        let mut stack = vec![old];
        while let Some(id) = stack.pop() {
            let fanouts = self.fanouts(id).to_vec();
            for f in fanouts {
                if !self.is_trav_id_current(f) {
                    self.set_trav_id_current(f);
                    tfo.push(f);
                    stack.push(f);
                }
            }
        }
        tfo.sort();

        self.clean_scratch();
        self.set_scratch(old, Scratch::Copy(new));
        let nb_rebuilt = tfo.len();
        for id in tfo {
            let node = self.arena.get(id);
            let (kind, cio_id) = (node.kind, node.cio_id as usize);
            let f: Vec<Edge> = node.fanins().iter().map(|e| self.replacement(*e)).collect();
            let e = match kind {
                NodeType::And => self.and(f[0], f[1]),
                NodeType::Xor => self.xor(f[0], f[1]),
                NodeType::Buf => f[0],
                NodeType::Co => {
                    self.set_output(cio_id, f[0]);
                    continue;
                }
                _ => panic!("{kind} node {id} cannot be in a fanout"),
            };
            self.set_scratch(id, Scratch::Copy(e));
        }
        self.invalidate_fanout();
        log::debug!("Replaced node {} by {}: {} fanouts rebuilt", old, new, nb_rebuilt);
    }

    /// Edge after replacement, following the scratch slots set by [`Network::replace`]
    fn replacement(&self, e: Edge) -> Edge {
        match self.arena.get(e.node()).scratch {
            Scratch::Copy(c) => c ^ e.is_inverted(),
            _ => e,
        }
    }

    /// Allow the creation of Xor nodes; otherwise Xor functions are built from And nodes
    pub fn set_xor_nodes(&mut self, enable: bool) {
        self.xor_nodes = enable;
    }

    /// Returns whether Xor nodes may be created
    pub fn has_xor_nodes(&self) -> bool {
        self.xor_nodes
    }

    /// Attach a hierarchy, used to levelize through boxes
    pub fn set_hierarchy(&mut self, hierarchy: Arc<dyn Hierarchy>) {
        self.hierarchy = Some(hierarchy);
    }

    /// Detach the hierarchy
    pub fn clear_hierarchy(&mut self) {
        self.hierarchy = None;
    }

    /// Attached hierarchy, if any
    pub fn hierarchy(&self) -> Option<&Arc<dyn Hierarchy>> {
        self.hierarchy.as_ref()
    }

    /// Create an And2 node
    pub fn and(&mut self, a: Edge, b: Edge) -> Edge {
        let a = self.resolve_buffers(a);
        let b = self.resolve_buffers(b);
        debug_assert!(self.is_valid(a), "Invalid signal {a}");
        debug_assert!(self.is_valid(b), "Invalid signal {b}");
        if a == b {
            return a;
        }
        if a == !b {
            return Edge::zero();
        }
        if a.is_constant() {
            return if a.is_inverted() { Edge::zero() } else { b };
        }
        if b.is_constant() {
            return if b.is_inverted() { Edge::zero() } else { a };
        }
        let (f0, f1) = if a < b { (a, b) } else { (b, a) };
        if let Some(id) = self.strash.lookup(&self.arena, NodeType::And, f0, f1) {
            return Edge::from(id);
        }
        Edge::from(self.create_node(NodeType::And, f0, f1))
    }

    /// Find an existing And2 node without creating one
    pub fn lookup_and(&self, a: Edge, b: Edge) -> Option<Edge> {
        let a = self.resolve_buffers(a);
        let b = self.resolve_buffers(b);
        if a == b {
            return Some(a);
        }
        if a == !b {
            return Some(Edge::zero());
        }
        if a.is_constant() {
            return Some(if a.is_inverted() { Edge::zero() } else { b });
        }
        if b.is_constant() {
            return Some(if b.is_inverted() { Edge::zero() } else { a });
        }
        let (f0, f1) = if a < b { (a, b) } else { (b, a) };
        self.strash
            .lookup(&self.arena, NodeType::And, f0, f1)
            .map(Edge::from)
    }

    /// Create an Or2 function
    pub fn or(&mut self, a: Edge, b: Edge) -> Edge {
        !self.and(!a, !b)
    }

    /// Create a Xor2 function, as a Xor node if enabled or as three And nodes
    pub fn xor(&mut self, a: Edge, b: Edge) -> Edge {
        if !self.xor_nodes {
            let x = self.and(a, !b);
            let y = self.and(!a, b);
            return self.or(x, y);
        }
        let a = self.resolve_buffers(a);
        let b = self.resolve_buffers(b);
        if a == b {
            return Edge::zero();
        }
        if a == !b {
            return Edge::one();
        }
        if a.is_constant() {
            return b ^ !a.is_inverted();
        }
        if b.is_constant() {
            return a ^ !b.is_inverted();
        }
        let inv = a.is_inverted() ^ b.is_inverted();
        let (a, b) = (a.regular(), b.regular());
        let (f0, f1) = if a < b { (a, b) } else { (b, a) };
        if let Some(id) = self.strash.lookup(&self.arena, NodeType::Xor, f0, f1) {
            return Edge::new(id, inv);
        }
        Edge::new(self.create_node(NodeType::Xor, f0, f1), inv)
    }

    /// Create a Xnor2 function
    pub fn xnor(&mut self, a: Edge, b: Edge) -> Edge {
        !self.xor(a, b)
    }

    /// Create a Mux function: t if s is true, e otherwise
    pub fn mux(&mut self, s: Edge, t: Edge, e: Edge) -> Edge {
        let x = self.and(s, t);
        let y = self.and(!s, e);
        self.or(x, y)
    }

    /// Create a Maj3 function
    pub fn maj(&mut self, a: Edge, b: Edge, c: Edge) -> Edge {
        let ab = self.and(a, b);
        let ac = self.and(a, c);
        let bc = self.and(b, c);
        let x = self.or(ab, ac);
        self.or(x, bc)
    }

    /// Create an n-ary And as a tree
    pub fn and_n(&mut self, sigs: &[Edge]) -> Edge {
        if sigs.is_empty() {
            Edge::one()
        } else if sigs.len() == 1 {
            sigs[0]
        } else {
            let mut next_sigs = Vec::new();
            for i in (0..sigs.len()).step_by(2) {
                if i + 1 < sigs.len() {
                    next_sigs.push(self.and(sigs[i], sigs[i + 1]));
                } else {
                    next_sigs.push(sigs[i]);
                }
            }
            self.and_n(&next_sigs)
        }
    }

    /// Create an n-ary Or as a tree
    pub fn or_n(&mut self, sigs: &[Edge]) -> Edge {
        let ands: Vec<Edge> = sigs.iter().map(|s| !s).collect();
        !self.and_n(&ands)
    }

    /// Create an n-ary Xor as a tree
    pub fn xor_n(&mut self, sigs: &[Edge]) -> Edge {
        if sigs.is_empty() {
            Edge::zero()
        } else if sigs.len() == 1 {
            sigs[0]
        } else {
            let mut next_sigs = Vec::new();
            for i in (0..sigs.len()).step_by(2) {
                if i + 1 < sigs.len() {
                    next_sigs.push(self.xor(sigs[i], sigs[i + 1]));
                } else {
                    next_sigs.push(sigs[i]);
                }
            }
            self.xor_n(&next_sigs)
        }
    }

    /// Create a buffer node; it is not hashed, and constructors see through it
    pub fn add_buffer(&mut self, driver: Edge) -> Edge {
        assert!(self.is_valid(driver), "Invalid signal {driver}");
        Edge::from(self.create_node(NodeType::Buf, driver, Edge::one()))
    }

    /// Follow buffers until a node that is not a buffer
    pub fn resolve_buffers(&self, e: Edge) -> Edge {
        let mut e = e;
        loop {
            let node = self.arena.get(e.node());
            if node.kind != NodeType::Buf {
                return e;
            }
            e = node.fanins[0] ^ e.is_inverted();
        }
    }

    /// Returns whether an edge can be used as a fanin in this network
    pub fn is_valid(&self, e: Edge) -> bool {
        e.node().index() < self.arena.len()
            && !matches!(self.arena.get(e.node()).kind, NodeType::None | NodeType::Co)
    }

    /// Clear the scratch slot of every node
    pub fn clean_scratch(&mut self) {
        for n in self.arena.iter_mut() {
            n.scratch = Scratch::Empty;
        }
    }

    /// Set the scratch slot of a node
    pub fn set_scratch(&mut self, id: NodeId, value: Scratch) {
        self.arena.get_mut(id).scratch = value;
    }

    /// Clear both transient marks of every node
    pub fn clean_marks(&mut self) {
        for n in self.arena.iter_mut() {
            n.mark_a = false;
            n.mark_b = false;
        }
    }

    /// Allocate a logic node, connect it and insert it in the hash table
    pub(crate) fn create_node(&mut self, kind: NodeType, f0: Edge, f1: Edge) -> NodeId {
        let id = self.arena.alloc(kind);
        self.connect(id, [f0, f1]);
        match kind {
            NodeType::And => self.nb_ands += 1,
            NodeType::Xor => self.nb_xors += 1,
            NodeType::Buf => self.nb_bufs += 1,
            _ => panic!("{kind} nodes are not created as logic"),
        }
        id
    }

    /// Set the fanins of a fresh node and update everything derived from them
    fn connect(&mut self, id: NodeId, fanins: [Edge; 2]) {
        let kind = self.arena.get(id).kind;
        let nb = kind.nb_fanins();
        let mut level = 0;
        let mut phases = [false; 2];
        for (i, f) in fanins[..nb].iter().enumerate() {
            let n = self.arena.get_mut(f.node());
            n.refs += 1;
            level = level.max(n.level);
            phases[i] = n.phase ^ f.is_inverted();
        }
        let node = self.arena.get_mut(id);
        node.fanins = fanins;
        node.level = match kind {
            NodeType::And | NodeType::Buf => 1 + level,
            NodeType::Xor => 2 + level,
            _ => level,
        };
        node.phase = match kind {
            NodeType::And => phases[0] & phases[1],
            NodeType::Xor => phases[0] ^ phases[1],
            _ => phases[0],
        };
        if kind.is_hashed() {
            self.strash.insert(&mut self.arena, id);
        }
        if let Some(fanout) = &mut self.fanout {
            fanout.add(id, &fanins[..nb]);
        }
    }

    /// Remove an unreferenced logic node and release its fanins
    pub(crate) fn delete_node(&mut self, id: NodeId) {
        let node = self.arena.get(id);
        let (kind, fanins) = (node.kind, node.fanins);
        assert!(kind.is_logic(), "{kind} node {id} cannot be removed");
        assert_eq!(node.refs, 0, "Node {id} is still referenced");
        if kind.is_hashed() {
            self.strash.remove(&mut self.arena, id);
        }
        for f in &fanins[..kind.nb_fanins()] {
            let n = self.arena.get_mut(f.node());
            assert!(n.refs > 0, "Invalid reference count for node {}", n.id);
            n.refs -= 1;
        }
        match kind {
            NodeType::And => self.nb_ands -= 1,
            NodeType::Xor => self.nb_xors -= 1,
            _ => self.nb_bufs -= 1,
        }
        self.arena.recycle(id);
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        let mut refs = vec![0u32; self.arena.len()];
        let mut counts = [0usize; 3];
        for node in self.arena.iter() {
            let id = node.id;
            match node.kind {
                NodeType::None => continue,
                NodeType::Const => assert!(id.is_const(), "Constant node {id} is not the first"),
                NodeType::Ci => {
                    assert_eq!(self.cis[node.cio_id as usize], id, "Invalid input {id}")
                }
                NodeType::Co => {
                    assert_eq!(self.cos[node.cio_id as usize], id, "Invalid output {id}")
                }
                NodeType::Buf => counts[2] += 1,
                NodeType::And | NodeType::Xor => {
                    let [f0, f1] = node.fanins;
                    assert!(f0.node() < f1.node(), "Fanins of {id} are not in canonical order");
                    assert!(!f0.is_constant(), "Node {id} has a constant fanin");
                    assert_eq!(
                        self.strash.lookup(&self.arena, node.kind, f0, f1),
                        Some(id),
                        "Node {id} is not in the structural hash table"
                    );
                    if node.kind == NodeType::Xor {
                        assert!(
                            !f0.is_inverted() && !f1.is_inverted(),
                            "Xor node {id} has complemented fanins"
                        );
                        counts[1] += 1;
                    } else {
                        counts[0] += 1;
                    }
                }
            }
            for f in node.fanins() {
                assert!(self.is_valid(*f), "Invalid signal {f} in node {id}");
                if node.kind.is_logic() {
                    assert!(f.node() < id, "Node {id} is not in topological order");
                }
                refs[f.node().index()] += 1;
            }
        }
        for node in self.arena.iter() {
            if !node.is_dead() {
                assert_eq!(
                    node.refs,
                    refs[node.id.index()],
                    "Invalid reference count for node {}",
                    node.id
                );
            }
        }
        assert_eq!(counts, [self.nb_ands, self.nb_xors, self.nb_bufs]);
        assert_eq!(self.strash.nb_entries(), self.nb_ands + self.nb_xors);
        for (i, &id) in self.cis.iter().enumerate() {
            let n = self.arena.get(id);
            assert!(n.kind == NodeType::Ci && n.cio_id as usize == i, "Invalid input {i}");
        }
        for (i, &id) in self.cos.iter().enumerate() {
            let n = self.arena.get(id);
            assert!(n.kind == NodeType::Co && n.cio_id as usize == i, "Invalid output {i}");
        }
        if self.has_choices() {
            self.check_choices();
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} inputs, {} outputs:",
            self.nb_inputs(),
            self.nb_outputs()
        )?;
        for node in self.arena.iter() {
            if node.kind.is_logic() {
                writeln!(f, "\t{}", node)?;
            }
        }
        for i in 0..self.nb_outputs() {
            writeln!(f, "\to{} = {}", i, self.output(i))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::truth_tables;
    use crate::{Edge, Network, NodeType};

    #[test]
    fn test_basic() {
        let mut aig = Network::default();
        let i0 = aig.add_input();
        let i1 = aig.add_input();
        let x = aig.and(i0, !i1);
        aig.add_output(x);

        // Basic properties
        assert_eq!(aig.nb_inputs(), 2);
        assert_eq!(aig.nb_outputs(), 1);
        assert_eq!(aig.nb_nodes(), 1);
        assert_eq!(aig.nb_objects(), 5);

        // Access
        assert_eq!(aig.input(0), i0);
        assert_eq!(aig.input(1), i1);
        assert_eq!(aig.output(0), x);
        assert_eq!(aig.node(x.node()).kind(), NodeType::And);
        assert_eq!(aig.node(x.node()).fanins(), &[i0, !i1]);
        assert_eq!(aig.node(aig.outputs()[0]).cio_id(), 0);
        aig.check();
    }

    #[test]
    fn test_trivial() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        for s in [a, !a, x, !x] {
            assert_eq!(aig.and(s, s), s);
            assert_eq!(aig.and(s, !s), Edge::zero());
            assert_eq!(aig.and(!s, s), Edge::zero());
            assert_eq!(aig.and(s, Edge::zero()), Edge::zero());
            assert_eq!(aig.and(Edge::zero(), s), Edge::zero());
            assert_eq!(aig.and(s, Edge::one()), s);
            assert_eq!(aig.and(Edge::one(), s), s);
        }
        assert_eq!(aig.nb_nodes(), 1);
        aig.check();
    }

    #[test]
    fn test_hash_consing() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        assert_eq!(aig.node(a.node()).refs(), 0);
        let x = aig.and(a, !b);
        assert_eq!(aig.node(a.node()).refs(), 1);
        assert_eq!(aig.node(b.node()).refs(), 1);
        let y = aig.and(a, !b);
        let z = aig.and(!b, a);
        assert_eq!(x, y);
        assert_eq!(x, z);
        assert_eq!(aig.node(a.node()).refs(), 1);
        assert_eq!(aig.node(b.node()).refs(), 1);
        assert_eq!(aig.lookup_and(!b, a), Some(x));
        assert_eq!(aig.lookup_and(b, a), None);

        // Different polarities are different nodes
        let w = aig.and(!a, !b);
        assert_ne!(w.node(), x.node());
        assert_eq!(aig.node(a.node()).refs(), 2);
        assert_eq!(aig.nb_nodes(), 2);
        aig.check();
    }

    #[test]
    fn test_canonical_order() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(!b, a);
        let n = aig.node(x.node());
        assert_eq!(n.fanin0(), a);
        assert_eq!(n.fanin1(), !b);
    }

    #[test]
    fn test_phase() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(!a, !b);
        let y = aig.and(a, !b);
        assert!(aig.node(x.node()).phase());
        assert!(!aig.node(y.node()).phase());
        assert!(aig.node(Edge::one().node()).phase());
    }

    #[test]
    fn test_xor_nodes() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.xor(a, b);
        assert_eq!(aig.nb_ands(), 3);
        assert_eq!(aig.nb_xors(), 0);
        assert_eq!(aig.xor(a, b), x);

        aig.set_xor_nodes(true);
        let y = aig.xor(!a, b);
        assert_eq!(aig.nb_xors(), 1);
        assert!(y.is_inverted());
        assert_eq!(aig.xor(a, !b), y);
        assert_eq!(aig.xor(b, a), !y);
        assert_eq!(aig.xor(a, a), Edge::zero());
        assert_eq!(aig.xor(a, !a), Edge::one());
        assert_eq!(aig.xor(a, Edge::zero()), a);
        assert_eq!(aig.xor(Edge::one(), a), !a);
        assert_eq!(aig.node(y.node()).level(), 2);
        aig.check();
    }

    #[test]
    fn test_nary() {
        let mut aig = Network::default();
        let i: Vec<Edge> = (0..5).map(|_| aig.add_input()).collect();

        assert_eq!(aig.and_n(&[]), Edge::one());
        assert_eq!(aig.and_n(&[i[0]]), i[0]);
        for k in 2..=5 {
            aig.and_n(&i[..k]);
        }

        assert_eq!(aig.or_n(&[]), Edge::zero());
        assert_eq!(aig.or_n(&[i[0]]), i[0]);
        for k in 2..=5 {
            aig.or_n(&i[..k]);
        }

        assert_eq!(aig.xor_n(&[]), Edge::zero());
        assert_eq!(aig.xor_n(&[i[0]]), i[0]);
        for k in 2..=5 {
            aig.xor_n(&i[..k]);
        }
        aig.check();
    }

    #[test]
    fn test_buffers() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let buf = aig.add_buffer(!a);
        assert_eq!(aig.nb_buffers(), 1);
        assert_eq!(aig.resolve_buffers(!buf), a);
        let x = aig.and(buf, b);
        let y = aig.and(!a, b);
        assert_eq!(x, y);
        assert_eq!(aig.and(buf, a), Edge::zero());
        aig.add_output(buf);
        aig.check();
    }

    #[test]
    fn test_set_output() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        aig.add_output(x);
        assert_eq!(aig.node(x.node()).refs(), 1);
        aig.set_output(0, !a);
        assert_eq!(aig.output(0), !a);
        assert_eq!(aig.node(x.node()).refs(), 0);
        assert_eq!(aig.node(a.node()).refs(), 2);
        aig.check();
    }

    #[test]
    fn test_replace() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, c);
        let z = aig.and(y, !x);
        aig.add_output(y);
        aig.add_output(!z);
        let tt = truth_tables(&aig);

        // Same function as x, built without it
        let o = aig.or(b, c);
        let p = aig.and(a, o);
        let q = aig.and(p, b);
        assert_eq!(aig.nb_ands(), 6);
        aig.replace(x.node(), q);
        aig.check();
        assert!(!aig.has_fanout());
        assert_eq!(truth_tables(&aig), tt);
        assert_ne!(aig.output(0), y);
        assert_eq!(aig.node(aig.output(0).node()).fanins(), &[c, q]);

        // The previous logic is left for cleanup
        assert!(!aig.node(x.node()).is_dead());
        assert_eq!(aig.cleanup(), 3);
        assert!(aig.node(x.node()).is_dead());
        assert_eq!(aig.nb_ands(), 5);
        aig.check();
        assert_eq!(truth_tables(&aig), tt);
    }

    #[test]
    fn test_replace_constant() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, c);
        let w = aig.and(!x, c);
        aig.add_output(y);
        aig.add_output(w);
        aig.add_output(x);
        aig.replace(x.node(), Edge::zero());
        aig.check();
        assert_eq!(aig.output(0), Edge::zero());
        assert_eq!(aig.output(1), c);
        assert_eq!(aig.output(2), Edge::zero());
        assert_eq!(aig.cleanup(), 3);
        assert_eq!(aig.nb_ands(), 0);
        aig.check();
    }

    #[test]
    fn test_replace_input() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.xor(b, c);
        let y = aig.and(a, x);
        aig.add_output(y);
        aig.replace(b.node(), !a);
        aig.check();
        aig.cleanup();
        assert_eq!(aig.node(b.node()).refs(), 0);

        let mut expected = Network::default();
        let a = expected.add_input();
        expected.add_input();
        let c = expected.add_input();
        let x = expected.xor(!a, c);
        let y = expected.and(a, x);
        expected.add_output(y);
        assert_eq!(truth_tables(&aig), truth_tables(&expected));
    }

    #[test]
    #[should_panic]
    fn test_replace_loop() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, !a);
        aig.add_output(y);
        aig.replace(x.node(), y);
    }

    #[test]
    fn test_contradiction() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let x = aig.and(a, !a);
        aig.add_output(x);
        assert_eq!(x, Edge::zero());
        assert_eq!(aig.nb_ands(), 0);
        assert_eq!(aig.dfs(true).len(), 0);
        assert_eq!(aig.dfs_preorder(true).len(), 0);
        aig.check();
    }

    #[test]
    fn test_display() {
        let mut aig = Network::default();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, !b);
        aig.add_output(!x);
        let s = format!("{aig}");
        assert!(s.contains("n3 = And(n1, !n2)"));
        assert!(s.contains("o0 = !n3"));
    }
}

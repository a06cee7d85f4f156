//! Depth-first traversals over the network
//!
//! A traversal is started with [`Network::increment_trav_id`]; a node is visited when its stamp
//! equals the current traversal identifier. This avoids clearing visited flags between traversals.
//! All traversals use an explicit work stack, so arbitrarily deep networks are supported.
//!
//! ```
//! # use aigkit::Network;
//! let mut aig = Network::new();
//! let a = aig.add_input();
//! let b = aig.add_input();
//! let x = aig.and(a, b);
//! let y = aig.and(x, !a);
//! aig.add_output(y);
//!
//! // Fanins come before the nodes that use them
//! assert_eq!(aig.dfs(true), vec![x.node(), y.node()]);
//! // The root comes first
//! assert_eq!(aig.dfs_preorder(true), vec![y.node(), x.node()]);
//! ```

use crate::network::edge::NodeId;
use crate::network::node::NodeType;
use crate::Network;

impl Network {
    /// Start a new traversal
    pub fn increment_trav_id(&mut self) {
        if self.trav_id >= u32::MAX - 1 {
            for n in self.arena.iter_mut() {
                n.trav_id = 0;
            }
            self.trav_id = 1;
        }
        self.trav_id += 1;
    }

    /// Returns whether the node has been visited in the current traversal
    pub fn is_trav_id_current(&self, id: NodeId) -> bool {
        self.arena.get(id).trav_id == self.trav_id
    }

    /// Mark the node as visited in the current traversal
    pub fn set_trav_id_current(&mut self, id: NodeId) {
        self.arena.get_mut(id).trav_id = self.trav_id;
    }

    /// Returns whether the node has been visited in the previous traversal
    pub fn is_trav_id_previous(&self, id: NodeId) -> bool {
        self.arena.get(id).trav_id == self.trav_id - 1
    }

    /// Mark the node as visited in the previous traversal
    pub fn set_trav_id_previous(&mut self, id: NodeId) {
        self.arena.get_mut(id).trav_id = self.trav_id - 1;
    }

    /// Postorder from a root toward the inputs, skipping nodes already visited
    ///
    /// A bounded traversal stops at nodes with mark B set; reaching anything but a logic node
    /// is then an error.
    fn postorder_from(&mut self, root: NodeId, order: &mut Vec<NodeId>, bounded: bool) {
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            if self.is_trav_id_current(id) {
                continue;
            }
            if bounded && self.arena.get(id).mark_b {
                continue;
            }
            self.set_trav_id_current(id);
            stack.push((id, true));
            let node = self.arena.get(id);
            assert!(!node.is_dead(), "Reached deleted node {id}");
            if bounded {
                assert!(
                    node.kind.is_logic(),
                    "{} node {id} is not covered by the cut leaves",
                    node.kind
                );
            }
            for f in node.fanins().iter().rev() {
                if !self.is_trav_id_current(f.node()) {
                    stack.push((f.node(), false));
                }
            }
        }
    }

    /// Preorder from a root toward the inputs, skipping nodes already visited
    fn preorder_from(&mut self, root: NodeId, order: &mut Vec<NodeId>) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.is_trav_id_current(id) {
                continue;
            }
            self.set_trav_id_current(id);
            order.push(id);
            let node = self.arena.get(id);
            for f in node.fanins().iter().rev() {
                if !self.is_trav_id_current(f.node()) {
                    stack.push(f.node());
                }
            }
        }
    }

    /// Mark the constant and the inputs as visited
    fn mark_const_and_inputs(&mut self) {
        self.set_trav_id_current(NodeId::CONST);
        for i in 0..self.cis.len() {
            self.set_trav_id_current(self.cis[i]);
        }
    }

    /// Collect all nodes reachable from the roots, in postorder toward the inputs
    ///
    /// Inputs and the constant are included when reached.
    pub fn dfs_nodes(&mut self, roots: &[NodeId]) -> Vec<NodeId> {
        self.increment_trav_id();
        let mut order = Vec::new();
        for &r in roots {
            self.postorder_from(r, &mut order, false);
        }
        order
    }

    /// Collect the logic reachable from the outputs, in postorder toward the inputs
    ///
    /// Inputs and the constant are never included. Outputs are added at the end unless `nodes_only` is set.
    pub fn dfs(&mut self, nodes_only: bool) -> Vec<NodeId> {
        self.increment_trav_id();
        self.mark_const_and_inputs();
        let mut order = Vec::new();
        for i in 0..self.cos.len() {
            let driver = self.output(i).node();
            self.postorder_from(driver, &mut order, false);
        }
        if !nodes_only {
            order.extend(self.cos.iter().copied());
        }
        order
    }

    /// Collect all nodes reachable from the roots, in preorder toward the inputs
    pub fn dfs_preorder_nodes(&mut self, roots: &[NodeId]) -> Vec<NodeId> {
        self.increment_trav_id();
        let mut order = Vec::new();
        for &r in roots {
            self.preorder_from(r, &mut order);
        }
        order
    }

    /// Collect the logic reachable from the outputs, each node before its fanins
    ///
    /// Unless `nodes_only` is set, each output is recorded before its cone.
    pub fn dfs_preorder(&mut self, nodes_only: bool) -> Vec<NodeId> {
        self.increment_trav_id();
        self.mark_const_and_inputs();
        let mut order = Vec::new();
        for i in 0..self.cos.len() {
            if !nodes_only {
                order.push(self.cos[i]);
            }
            let driver = self.output(i).node();
            self.preorder_from(driver, &mut order);
        }
        order
    }

    /// Collect all logic nodes in postorder toward the outputs: each node comes after all its fanouts
    ///
    /// Builds the fanout index if needed. Outputs are not included.
    pub fn dfs_reverse(&mut self) -> Vec<NodeId> {
        self.start_fanout();
        self.increment_trav_id();
        for i in 0..self.cos.len() {
            self.set_trav_id_current(self.cos[i]);
        }
        let mut order = Vec::new();
        for root in self.logic_nodes() {
            let mut stack = vec![(root, false)];
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    order.push(id);
                    continue;
                }
                if self.is_trav_id_current(id) {
                    continue;
                }
                self.set_trav_id_current(id);
                stack.push((id, true));
                for &f in self.fanouts(id) {
                    if !self.is_trav_id_current(f) {
                        stack.push((f, false));
                    }
                }
            }
        }
        order
    }

    /// Collect the logic reachable from the outputs in postorder, following equivalence links
    ///
    /// The members of an equivalence class are visited before the node that links to them.
    /// Panics if a node is reached again while it is still being expanded: the equivalence
    /// classes then form a cycle with the logic.
    pub fn dfs_choices(&mut self) -> Vec<NodeId> {
        // Nodes being expanded carry the previous stamp
        self.increment_trav_id();
        self.increment_trav_id();
        self.mark_const_and_inputs();
        let mut order = Vec::new();
        for i in 0..self.cos.len() {
            let mut stack = vec![(self.output(i).node(), false)];
            while let Some((id, expanded)) = stack.pop() {
                if expanded {
                    self.set_trav_id_current(id);
                    order.push(id);
                    continue;
                }
                if self.is_trav_id_current(id) {
                    continue;
                }
                assert!(
                    !self.is_trav_id_previous(id),
                    "Node {id} is reached while being expanded: cycle through equivalence classes"
                );
                self.set_trav_id_previous(id);
                stack.push((id, true));
                let node = self.arena.get(id);
                assert!(node.kind.is_logic(), "Unexpected {} node {id}", node.kind);
                if let Some(next) = self.next_equiv(id) {
                    stack.push((next, false));
                }
                for f in node.fanins().iter().rev() {
                    stack.push((f.node(), false));
                }
            }
        }
        order
    }

    /// Collect the logic between a root and a set of leaves, in postorder
    ///
    /// The leaves are not included; the root is, unless it is a leaf itself.
    /// Panics if the leaves do not separate the root from the inputs.
    pub fn collect_cut(&mut self, root: NodeId, leaves: &[NodeId]) -> Vec<NodeId> {
        for &l in leaves {
            self.arena.get_mut(l).mark_b = true;
        }
        self.increment_trav_id();
        let mut order = Vec::new();
        self.postorder_from(root, &mut order, true);
        for &l in leaves {
            self.arena.get_mut(l).mark_b = false;
        }
        order
    }

    /// Combinational inputs in the cone of the roots, as input indices in traversal order
    pub fn support_of(&mut self, roots: &[NodeId]) -> Vec<usize> {
        self.dfs_nodes(roots)
            .into_iter()
            .filter(|id| self.arena.get(*id).kind == NodeType::Ci)
            .map(|id| self.arena.get(id).cio_id as usize)
            .collect()
    }

    /// Combinational inputs in the cone of a node, as input indices in traversal order
    pub fn support(&mut self, root: NodeId) -> Vec<usize> {
        self.support_of(&[root])
    }

    /// Number of And and Xor nodes in the cone of a node
    pub fn dag_size(&mut self, root: NodeId) -> usize {
        let ret = self.cone_mark(root);
        self.cone_unmark(root);
        ret
    }

    /// Set mark A on the logic cone of a node; returns the number of two-input nodes newly marked
    fn cone_mark(&mut self, root: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.arena.get_mut(id);
            if !node.kind.is_logic() || node.mark_a {
                continue;
            }
            node.mark_a = true;
            if node.kind.is_hashed() {
                count += 1;
            }
            stack.extend(node.fanins().iter().map(|f| f.node()));
        }
        count
    }

    /// Clear mark A on the logic cone of a node
    fn cone_unmark(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.arena.get_mut(id);
            if !node.kind.is_logic() || !node.mark_a {
                continue;
            }
            node.mark_a = false;
            stack.extend(node.fanins().iter().map(|f| f.node()));
        }
    }

    /// Returns whether `old` is in the transitive fanin of `new`, following equivalence links
    pub fn check_tfi(&mut self, new: NodeId, old: NodeId) -> bool {
        self.increment_trav_id();
        let mut stack = vec![new];
        while let Some(id) = stack.pop() {
            if id == old {
                return true;
            }
            if self.is_trav_id_current(id) {
                continue;
            }
            self.set_trav_id_current(id);
            let node = self.arena.get(id);
            stack.extend(node.fanins().iter().map(|f| f.node()));
            if let Some(next) = self.next_equiv(id) {
                stack.push(next);
            }
        }
        false
    }

    /// Returns whether every logic node comes after its fanins in identity order
    pub fn is_topo_sorted(&self) -> bool {
        self.arena
            .iter()
            .filter(|n| n.kind.is_logic())
            .all(|n| n.fanins().iter().all(|f| f.node() < n.id))
    }
}

#[cfg(test)]
mod tests {
    use crate::network::generators::testcases;
    use crate::{Edge, Network, NodeId, NodeType};

    /// Check that every fanin comes before its node in the order
    fn check_postorder(aig: &Network, order: &[NodeId]) {
        let mut pos = vec![usize::MAX; aig.nb_ids()];
        for (i, id) in order.iter().enumerate() {
            assert_eq!(pos[id.index()], usize::MAX, "Node {id} appears twice");
            pos[id.index()] = i;
        }
        for id in order {
            for f in aig.node(*id).fanins() {
                let k = aig.node(f.node()).kind();
                if k.is_logic() {
                    assert!(pos[f.node().index()] < pos[id.index()]);
                }
            }
        }
    }

    #[test]
    fn test_dfs_postorder() {
        for seed in 0..5 {
            let mut aig = testcases::random(8, 4, 200, seed);
            let order = aig.dfs(true);
            check_postorder(&aig, &order);
            assert!(order.iter().all(|id| aig.node(*id).kind().is_logic()));
            let with_outputs = aig.dfs(false);
            assert_eq!(with_outputs.len(), order.len() + aig.nb_outputs());
            assert_eq!(&with_outputs[order.len()..], aig.outputs());
        }
    }

    #[test]
    fn test_dfs_nodes() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, !b);
        let order = aig.dfs_nodes(&[y.node()]);
        assert_eq!(order, vec![a.node(), b.node(), x.node(), y.node()]);
        // Nothing is visited twice, even from several roots
        let order = aig.dfs_nodes(&[x.node(), y.node()]);
        assert_eq!(order, vec![a.node(), b.node(), x.node(), y.node()]);
    }

    #[test]
    fn test_dfs_preorder() {
        let mut aig = testcases::random(6, 3, 100, 3);
        let order = aig.dfs_preorder(true);
        let post = aig.dfs(true);
        assert_eq!(order.len(), post.len());
        // Each node comes before its fanins
        let mut pos = vec![usize::MAX; aig.nb_ids()];
        for (i, id) in order.iter().enumerate() {
            pos[id.index()] = i;
        }
        let mut nb_checked = 0;
        for id in &order {
            for f in aig.node(*id).fanins() {
                if aig.node(f.node()).kind().is_logic() && pos[f.node().index()] > pos[id.index()] {
                    nb_checked += 1;
                }
            }
        }
        assert!(nb_checked > 0);
        assert!(aig.node(order[0]).refs() > 0);
    }

    #[test]
    fn test_dfs_reverse() {
        let mut aig = testcases::random(8, 4, 200, 1);
        let order = aig.dfs_reverse();
        assert_eq!(order.len(), aig.nb_nodes());
        let mut pos = vec![usize::MAX; aig.nb_ids()];
        for (i, id) in order.iter().enumerate() {
            pos[id.index()] = i;
        }
        for id in &order {
            for f in aig.fanouts(*id) {
                if aig.node(*f).kind() != NodeType::Co {
                    assert!(pos[f.index()] < pos[id.index()]);
                }
            }
        }
    }

    #[test]
    fn test_collect_cut() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, c);
        let z = aig.and(y, !a);
        let cut = aig.collect_cut(z.node(), &[x.node(), c.node(), a.node()]);
        assert_eq!(cut, vec![y.node(), z.node()]);
        let cut = aig.collect_cut(z.node(), &[a.node(), b.node(), c.node()]);
        assert_eq!(cut, vec![x.node(), y.node(), z.node()]);
        let cut = aig.collect_cut(z.node(), &[z.node()]);
        assert!(cut.is_empty());
        // Marks are released, and leaves are not visited
        assert!(!aig.node(x.node()).mark_b());
        assert!(!aig.is_trav_id_current(x.node()));
        let cut = aig.collect_cut(z.node(), &[y.node(), a.node()]);
        assert_eq!(cut, vec![z.node()]);
        assert!(!aig.is_trav_id_current(y.node()));
    }

    #[test]
    #[should_panic]
    fn test_collect_cut_invalid() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        aig.collect_cut(x.node(), &[a.node()]);
    }

    #[test]
    fn test_support() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.and(c, !a);
        let y = aig.and(x, b);
        let mut s = aig.support(x.node());
        s.sort();
        assert_eq!(s, vec![0, 2]);
        assert_eq!(aig.support(y.node()).len(), 3);
        assert_eq!(aig.support(b.node()), vec![1]);
        assert!(aig.support(Edge::one().node()).is_empty());
    }

    #[test]
    fn test_dag_size() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.xor(a, b);
        let y = aig.and(x, c);
        assert_eq!(aig.dag_size(x.node()), 3);
        assert_eq!(aig.dag_size(y.node()), 4);
        assert_eq!(aig.dag_size(a.node()), 0);
        assert!(!aig.node(x.node()).mark_a());
    }

    #[test]
    fn test_check_tfi() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, !a);
        assert!(aig.check_tfi(y.node(), x.node()));
        assert!(aig.check_tfi(y.node(), a.node()));
        assert!(!aig.check_tfi(x.node(), y.node()));
    }

    #[test]
    fn test_trav_id_overflow() {
        let mut aig = Network::new();
        let a = aig.add_input();
        aig.trav_id = u32::MAX - 2;
        aig.increment_trav_id();
        aig.set_trav_id_current(a.node());
        assert!(aig.is_trav_id_current(a.node()));
        aig.increment_trav_id();
        assert!(!aig.is_trav_id_current(a.node()));
        assert!(!aig.is_trav_id_previous(a.node()));
        assert!(aig.is_topo_sorted());
    }
}

//! Removal of dangling logic and reference-count based cone analysis

use crate::network::edge::NodeId;
use crate::Network;

impl Network {
    /// Remove all logic that is not used by an output; returns the number of nodes removed
    ///
    /// Members of equivalence classes are kept, as well as their fanin cones.
    pub fn cleanup(&mut self) -> usize {
        let roots: Vec<NodeId> = self
            .arena
            .iter()
            .filter(|n| n.kind.is_logic() && n.refs == 0)
            .map(|n| n.id)
            .filter(|id| !self.in_choice_class(*id))
            .collect();
        let mut removed = 0;
        for root in roots {
            removed += self.delete_cone(root);
        }
        if removed > 0 {
            self.invalidate_fanout();
        }
        log::debug!("Cleanup removed {} dangling nodes", removed);
        removed
    }

    /// Remove an unreferenced node, and recursively the fanins that become unreferenced
    fn delete_cone(&mut self, root: NodeId) -> usize {
        let mut removed = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = self.arena.get(id);
            let (kind, fanins) = (node.kind, node.fanins);
            self.delete_node(id);
            removed += 1;
            for f in &fanins[..kind.nb_fanins()] {
                let n = self.arena.get(f.node());
                if n.kind.is_logic() && n.refs == 0 && !self.in_choice_class(n.id) {
                    stack.push(n.id);
                }
            }
        }
        removed
    }

    /// Dereference the cone of a node; returns the number of nodes whose count reached zero
    fn deref_cone(&mut self, root: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            count += 1;
            let fanins = self.arena.get(id).fanins();
            let children: Vec<NodeId> = fanins.iter().map(|f| f.node()).collect();
            for c in children {
                let n = self.arena.get_mut(c);
                if !n.kind.is_logic() {
                    continue;
                }
                assert!(n.refs > 0, "Invalid reference count for node {c}");
                n.refs -= 1;
                if n.refs == 0 {
                    stack.push(c);
                }
            }
        }
        count
    }

    /// Restore the references removed by `deref_cone`
    fn ref_cone(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let children: Vec<NodeId> = self.arena.get(id).fanins().iter().map(|f| f.node()).collect();
            for c in children {
                let n = self.arena.get_mut(c);
                if !n.kind.is_logic() {
                    continue;
                }
                n.refs += 1;
                if n.refs == 1 {
                    stack.push(c);
                }
            }
        }
    }

    /// Size of the maximum fanout-free cone of a logic node
    ///
    /// This is the number of nodes that would become dangling if the node itself was removed.
    pub fn mffc_size(&mut self, id: NodeId) -> usize {
        assert!(self.arena.get(id).kind.is_logic(), "Node {id} is not a logic node");
        let ret = self.deref_cone(id);
        self.ref_cone(id);
        ret
    }
}

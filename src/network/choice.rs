//! Equivalence classes of nodes (choices)
//!
//! Nodes proven equivalent, possibly up to complement, are grouped in classes.
//! The representative of a class is the member with the smallest identity; each other member
//! links to a node of smaller identity in the class, with the relative polarity of the link.
//! Members are also chained from the representative, which is the order followed by
//! [`Network::dfs_choices`].
//!
//! ```
//! # use aigkit::Network;
//! let mut aig = Network::new();
//! let a = aig.add_input();
//! let b = aig.add_input();
//! let c = aig.add_input();
//! let x = aig.and(a, b);
//! let y = aig.and(x, c);
//! let t = aig.and(b, c);
//! let z = aig.and(a, t);
//! aig.add_output(y);
//!
//! // y and z compute the same function
//! aig.start_choices();
//! aig.merge(y, z);
//! assert_eq!(aig.class_repr(z.node()), y);
//! assert_eq!(aig.class_members(y.node()), vec![y.node(), z.node()]);
//! ```

use crate::network::edge::{Edge, NodeId};
use crate::Network;

#[derive(Debug, Clone, Default)]
pub(crate) struct ChoiceTable {
    reprs: Vec<Option<NodeId>>,
    phases: Vec<bool>,
    nexts: Vec<Option<NodeId>>,
}

impl ChoiceTable {
    fn reserve(&mut self, len: usize) {
        if self.reprs.len() < len {
            self.reprs.resize(len, None);
            self.phases.resize(len, false);
            self.nexts.resize(len, None);
        }
    }

    fn repr(&self, id: NodeId) -> Option<Edge> {
        let i = id.index();
        match self.reprs.get(i) {
            Some(Some(r)) => Some(Edge::new(*r, self.phases[i])),
            _ => None,
        }
    }

    fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nexts.get(id.index()).copied().flatten()
    }
}

impl Network {
    /// Start tracking equivalence classes
    pub fn start_choices(&mut self) {
        if self.choices.is_none() {
            self.choices = Some(ChoiceTable::default());
        }
    }

    /// Drop all equivalence classes
    pub fn stop_choices(&mut self) {
        self.choices = None;
    }

    /// Returns whether equivalence classes are tracked
    pub fn has_choices(&self) -> bool {
        self.choices.is_some()
    }

    /// Direct representative link of a node, with the relative polarity
    pub fn repr(&self, id: NodeId) -> Option<Edge> {
        self.choices.as_ref().and_then(|c| c.repr(id))
    }

    /// Next member in the chain of the class, starting from the representative
    pub fn next_equiv(&self, id: NodeId) -> Option<NodeId> {
        self.choices.as_ref().and_then(|c| c.next(id))
    }

    /// Representative of the class of a node, with the polarity of the node relative to it
    ///
    /// A node that is not in any class is its own representative.
    pub fn class_repr(&self, id: NodeId) -> Edge {
        let mut ret = Edge::from(id);
        let mut steps = 0;
        while let Some(r) = self.repr(ret.node()) {
            assert!(
                r.node() < ret.node(),
                "Node {} links to representative {} with a larger identity",
                ret.node(),
                r.node()
            );
            ret = r ^ ret.is_inverted();
            steps += 1;
            assert!(steps <= self.arena.len(), "Cycle in representative links");
        }
        ret
    }

    /// Returns whether the node belongs to a class with at least two members
    pub fn in_choice_class(&self, id: NodeId) -> bool {
        self.repr(id).is_some() || self.next_equiv(id).is_some()
    }

    /// Returns whether the node is the representative of a class with other members
    pub fn is_choice(&self, id: NodeId) -> bool {
        self.repr(id).is_none() && self.next_equiv(id).is_some()
    }

    /// All members of a class, starting with the representative
    pub fn class_members(&self, repr: NodeId) -> Vec<NodeId> {
        let mut ret = vec![repr];
        let mut cur = self.next_equiv(repr);
        while let Some(n) = cur {
            assert!(ret.len() <= self.arena.len(), "Cycle in equivalence chain");
            ret.push(n);
            cur = self.next_equiv(n);
        }
        ret
    }

    /// Record that two edges are equivalent
    ///
    /// The classes of both nodes are merged; the root with the larger identity is linked to the other.
    /// Panics if the edges are already known to be complementary.
    pub fn merge(&mut self, a: Edge, b: Edge) {
        assert!(self.is_valid(a), "Invalid signal {a}");
        assert!(self.is_valid(b), "Invalid signal {b}");
        self.start_choices();
        let ra = self.class_repr(a.node());
        let rb = self.class_repr(b.node());
        // ra.node() and rb.node() are equivalent up to this polarity
        let inv = a.is_inverted() ^ b.is_inverted() ^ ra.is_inverted() ^ rb.is_inverted();
        if ra.node() == rb.node() {
            assert!(!inv, "Merging {a} with {b} would make a node equivalent to its complement");
            return;
        }
        let (root, other) = if ra.node() < rb.node() {
            (ra.node(), rb.node())
        } else {
            (rb.node(), ra.node())
        };
        let len = self.arena.len();
        let Some(table) = self.choices.as_mut() else {
            unreachable!()
        };
        table.reserve(len);
        assert!(table.reprs[root.index()].is_none(), "Node {root} is not a representative");
        assert!(table.reprs[other.index()].is_none(), "Node {other} is not a representative");
        table.reprs[other.index()] = Some(root);
        table.phases[other.index()] = inv;
        let mut last = root;
        while let Some(n) = table.nexts[last.index()] {
            last = n;
        }
        table.nexts[last.index()] = Some(other);
        log::trace!("Merged {other} into the class of {root}");
    }

    /// Record that two nodes are equivalent, deducing the polarity from their value under the all-zero pattern
    pub fn merge_by_phase(&mut self, a: NodeId, b: NodeId) {
        let inv = self.node(a).phase() ^ self.node(b).phase();
        self.merge(Edge::from(a), Edge::new(b, inv));
    }

    /// Number of classes with at least two members
    pub fn nb_choice_classes(&self) -> usize {
        self.node_ids().filter(|id| self.is_choice(*id)).count()
    }

    /// Number of nodes that are members of a class without being its representative
    pub fn nb_choice_nodes(&self) -> usize {
        self.node_ids().filter(|id| self.repr(*id).is_some()).count()
    }

    /// Check the ordering invariant of all classes
    pub fn check_choices(&self) {
        for id in self.node_ids() {
            if self.is_choice(id) {
                let members = self.class_members(id);
                for m in &members[1..] {
                    assert!(*m > id, "Member {m} is smaller than representative {id}");
                    assert_eq!(self.class_repr(*m).node(), id, "Member {m} is not linked to {id}");
                    assert!(!self.node(*m).is_dead(), "Member {m} was removed");
                }
            } else if let Some(r) = self.repr(id) {
                assert!(r.node() < id, "Node {id} links to larger node {}", r.node());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::network::generators::testcases;
    use crate::{Edge, Network};

    #[test]
    fn test_merge() {
        let mut aig = Network::new();
        let i: Vec<Edge> = (0..4).map(|_| aig.add_input()).collect();
        let x = aig.and(i[0], i[1]);
        let y = aig.and(i[2], i[3]);
        let z = aig.and(i[1], i[2]);
        let w = aig.and(i[0], i[3]);
        aig.start_choices();
        assert!(aig.has_choices());

        // Classes {x, y} and {z, w}
        aig.merge(!y, x);
        aig.merge(w, z);
        assert_eq!(aig.class_repr(y.node()), !x);
        assert_eq!(aig.class_repr(w.node()), z);
        assert_eq!(aig.nb_choice_classes(), 2);
        assert_eq!(aig.nb_choice_nodes(), 2);

        // Merge the two classes: x = !y, z = w, x = !w
        aig.merge(x, !w);
        assert_eq!(aig.class_repr(z.node()), !x);
        assert_eq!(aig.class_repr(w.node()), !x);
        assert_eq!(aig.class_repr(y.node()), !x);
        assert_eq!(aig.nb_choice_classes(), 1);
        assert_eq!(aig.nb_choice_nodes(), 3);
        assert_eq!(
            aig.class_members(x.node()),
            vec![x.node(), y.node(), z.node(), w.node()]
        );

        // Merging again is harmless
        aig.merge(y, w);
        assert_eq!(aig.nb_choice_nodes(), 3);
        aig.check();
    }

    #[test]
    #[should_panic]
    fn test_merge_contradiction() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(a, !b);
        aig.merge(x, y);
        aig.merge(x, !y);
    }

    #[test]
    fn test_merge_constant() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        aig.merge(x, Edge::zero());
        assert_eq!(aig.class_repr(x.node()), Edge::zero());
        aig.check_choices();
    }

    #[test]
    fn test_merge_by_phase() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(!a, !b);
        let y = aig.and(a, b);
        aig.merge_by_phase(x.node(), y.node());
        assert_eq!(aig.class_repr(y.node()), !x);
    }

    #[test]
    fn test_class_invariant() {
        let mut aig = testcases::random(6, 2, 200, 7);
        let nodes = aig.logic_nodes();
        // Merge nodes in an arbitrary order, each with a node further away
        for k in 0..nodes.len() / 2 {
            let a = nodes[(7 * k) % nodes.len()];
            let b = nodes[(13 * k + 5) % nodes.len()];
            if aig.class_repr(a).node() != aig.class_repr(b).node() {
                aig.merge(Edge::from(a), Edge::from(b));
            }
        }
        aig.check_choices();
        for id in aig.logic_nodes() {
            let r = aig.class_repr(id).node();
            assert!(r <= id);
            let members = aig.class_members(r);
            assert!(members.contains(&id));
            // Following the links reaches the representative within the size of the class
            let mut steps = 0;
            let mut cur = id;
            while let Some(next) = aig.repr(cur) {
                cur = next.node();
                steps += 1;
            }
            assert_eq!(cur, r);
            assert!(steps < members.len());
        }
    }

    #[test]
    fn test_dfs_choices() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let c = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, c);
        let t = aig.and(b, c);
        let z = aig.and(a, t);
        aig.add_output(y);
        aig.merge(y, z);
        let order = aig.dfs_choices();
        assert_eq!(order.len(), 4);
        let pos = |n: &crate::NodeId| order.iter().position(|m| m == n).unwrap();
        assert!(pos(&z.node()) < pos(&y.node()));
        assert!(pos(&t.node()) < pos(&z.node()));
        assert!(pos(&x.node()) < pos(&y.node()));
        assert!(aig.check_tfi(y.node(), t.node()));
    }

    #[test]
    #[should_panic]
    fn test_dfs_choices_cycle() {
        let mut aig = Network::new();
        let a = aig.add_input();
        let b = aig.add_input();
        let x = aig.and(a, b);
        let y = aig.and(x, !a);
        aig.add_output(x);
        // y is built on top of x: linking x to y creates a cycle
        aig.merge(x, y);
        aig.dfs_choices();
    }
}

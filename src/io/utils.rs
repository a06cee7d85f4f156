use std::collections::HashSet;

use crate::{Edge, Network, NodeId};

/// Ad-hoc to_string function to represent edges in bench files
pub fn sig_to_string(s: &Edge) -> String {
    if *s == Edge::one() {
        return "vdd".to_string();
    }
    if *s == Edge::zero() {
        return "gnd".to_string();
    }
    s.node().to_string() + (if s.is_inverted() { "_n" } else { "" })
}

/// Find the set of nodes that are used inverted
pub fn get_inverted_signals(aig: &Network) -> Vec<NodeId> {
    let mut nodes_with_inv = HashSet::new();
    for o in 0..aig.nb_outputs() {
        let s = aig.output(o);
        if s.is_inverted() && !s.is_constant() {
            nodes_with_inv.insert(s.node());
        }
    }
    for id in aig.logic_nodes() {
        for s in aig.node(id).fanins() {
            if s.is_inverted() && !s.is_constant() {
                nodes_with_inv.insert(s.node());
            }
        }
    }
    let mut nodes_with_inv = nodes_with_inv.into_iter().collect::<Vec<_>>();
    nodes_with_inv.sort();
    nodes_with_inv
}

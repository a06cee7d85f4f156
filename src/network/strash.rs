//! Structural hash table for two-input nodes
//!
//! Bins are chained through the `next` field of the nodes themselves.
//! The table grows to the next prime above three times its size
//! when it holds more than two entries per bin.

use std::hash::{Hash, Hasher};

use fxhash::FxHasher;

use crate::network::arena::Arena;
use crate::network::edge::{Edge, NodeId};
use crate::network::node::NodeType;

const MIN_SIZE: usize = 61;
const MAX_LOAD: usize = 2;
const GROWTH: usize = 3;

#[derive(Debug, Clone)]
pub(crate) struct StrashTable {
    bins: Vec<Option<NodeId>>,
    nb_entries: usize,
}

fn bin(kind: NodeType, f0: Edge, f1: Edge, nb_bins: usize) -> usize {
    let mut h = FxHasher::default();
    kind.hash(&mut h);
    f0.hash(&mut h);
    f1.hash(&mut h);
    (h.finish() % nb_bins as u64) as usize
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Smallest prime at or above n
pub(crate) fn next_prime(n: usize) -> usize {
    let mut p = n.max(2);
    while !is_prime(p) {
        p += 1;
    }
    p
}

impl Default for StrashTable {
    fn default() -> Self {
        StrashTable::with_capacity(0)
    }
}

impl StrashTable {
    pub fn with_capacity(nb_nodes: usize) -> StrashTable {
        StrashTable {
            bins: vec![None; next_prime(nb_nodes.max(MIN_SIZE))],
            nb_entries: 0,
        }
    }

    pub fn nb_entries(&self) -> usize {
        self.nb_entries
    }

    pub fn nb_bins(&self) -> usize {
        self.bins.len()
    }

    /// Find a node with exactly these fanins
    pub fn lookup(&self, arena: &Arena, kind: NodeType, f0: Edge, f1: Edge) -> Option<NodeId> {
        let mut cur = self.bins[bin(kind, f0, f1, self.bins.len())];
        while let Some(id) = cur {
            let node = arena.get(id);
            if node.kind == kind && node.fanins == [f0, f1] {
                return Some(id);
            }
            cur = node.next;
        }
        None
    }

    /// Insert a node whose fanins are already set
    pub fn insert(&mut self, arena: &mut Arena, id: NodeId) {
        if self.nb_entries >= MAX_LOAD * self.bins.len() {
            self.resize(arena);
        }
        let node = arena.get(id);
        debug_assert!(node.kind.is_hashed());
        debug_assert!(self.lookup(arena, node.kind, node.fanins[0], node.fanins[1]).is_none());
        let b = bin(node.kind, node.fanins[0], node.fanins[1], self.bins.len());
        arena.get_mut(id).next = self.bins[b];
        self.bins[b] = Some(id);
        self.nb_entries += 1;
    }

    /// Remove a node from its bin
    pub fn remove(&mut self, arena: &mut Arena, id: NodeId) {
        let node = arena.get(id);
        let b = bin(node.kind, node.fanins[0], node.fanins[1], self.bins.len());
        let next = node.next;
        if self.bins[b] == Some(id) {
            self.bins[b] = next;
        } else {
            let mut cur = self.bins[b];
            loop {
                let Some(c) = cur else {
                    panic!("Node {id} is not in the structural hash table");
                };
                let following = arena.get(c).next;
                if following == Some(id) {
                    arena.get_mut(c).next = next;
                    break;
                }
                cur = following;
            }
        }
        arena.get_mut(id).next = None;
        self.nb_entries -= 1;
    }

    /// Grow the table and reinsert every entry with its canonical fanins
    fn resize(&mut self, arena: &mut Arena) {
        let new_size = next_prime(GROWTH * self.bins.len());
        let mut new_bins = vec![None; new_size];
        let mut nb_moved = 0;
        for b in 0..self.bins.len() {
            let mut cur = self.bins[b];
            while let Some(id) = cur {
                let node = arena.get(id);
                cur = node.next;
                let nb = bin(node.kind, node.fanins[0], node.fanins[1], new_size);
                arena.get_mut(id).next = new_bins[nb];
                new_bins[nb] = Some(id);
                nb_moved += 1;
            }
        }
        assert_eq!(nb_moved, self.nb_entries);
        log::trace!(
            "Structural hash table resized from {} to {} bins ({} entries)",
            self.bins.len(),
            new_size,
            self.nb_entries
        );
        self.bins = new_bins;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primes() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(1000), 1009);
        assert_eq!(next_prime(3027), 3037);
    }

    #[test]
    fn test_insert_lookup_remove() {
        let mut arena = Arena::default();
        let mut table = StrashTable::default();
        arena.alloc(NodeType::Const);
        let inputs: Vec<Edge> = (0..100).map(|_| Edge::from(arena.alloc(NodeType::Ci))).collect();
        let mut nodes = Vec::new();
        for i in 0..inputs.len() - 1 {
            let (f0, f1) = (inputs[i], !inputs[i + 1]);
            let id = arena.alloc(NodeType::And);
            arena.get_mut(id).fanins = [f0, f1];
            table.insert(&mut arena, id);
            nodes.push((id, f0, f1));
        }
        assert_eq!(table.nb_entries(), nodes.len());
        for &(id, f0, f1) in &nodes {
            assert_eq!(table.lookup(&arena, NodeType::And, f0, f1), Some(id));
            assert_eq!(table.lookup(&arena, NodeType::Xor, f0, f1), None);
            assert_eq!(table.lookup(&arena, NodeType::And, f0, !f1), None);
        }
        for &(id, f0, f1) in nodes.iter().step_by(2) {
            table.remove(&mut arena, id);
            assert_eq!(table.lookup(&arena, NodeType::And, f0, f1), None);
        }
        for &(id, f0, f1) in nodes.iter().skip(1).step_by(2) {
            assert_eq!(table.lookup(&arena, NodeType::And, f0, f1), Some(id));
        }
    }

    #[test]
    fn test_resize() {
        let mut arena = Arena::default();
        let mut table = StrashTable::default();
        let initial = table.nb_bins();
        arena.alloc(NodeType::Const);
        let inputs: Vec<Edge> = (0..100).map(|_| Edge::from(arena.alloc(NodeType::Ci))).collect();
        let mut nodes = Vec::new();
        for i in 0..inputs.len() {
            for j in i + 1..inputs.len() {
                let id = arena.alloc(NodeType::And);
                arena.get_mut(id).fanins = [inputs[i], inputs[j]];
                table.insert(&mut arena, id);
                nodes.push(id);
            }
        }
        assert!(table.nb_bins() > initial);
        assert!(table.nb_entries() <= MAX_LOAD * table.nb_bins());
        for id in nodes {
            let n = arena.get(id);
            assert_eq!(
                table.lookup(&arena, NodeType::And, n.fanins[0], n.fanins[1]),
                Some(id)
            );
        }
    }
}

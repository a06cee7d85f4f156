//! Reverse adjacency of a network
//!
//! The index is built on demand. Node creation keeps a live index up to date;
//! edits that remove edges drop it, and it must be started again before use.

use crate::network::arena::Arena;
use crate::network::edge::{Edge, NodeId};
use crate::Network;

#[derive(Debug, Clone, Default)]
pub(crate) struct FanoutIndex {
    fanouts: Vec<Vec<NodeId>>,
}

impl FanoutIndex {
    pub fn build(arena: &Arena) -> FanoutIndex {
        let mut ret = FanoutIndex {
            fanouts: vec![Vec::new(); arena.len()],
        };
        for node in arena.iter() {
            for f in node.fanins() {
                ret.fanouts[f.node().index()].push(node.id);
            }
        }
        ret
    }

    pub fn add(&mut self, id: NodeId, fanins: &[Edge]) {
        if self.fanouts.len() <= id.index() {
            self.fanouts.resize(id.index() + 1, Vec::new());
        }
        for f in fanins {
            self.fanouts[f.node().index()].push(id);
        }
    }

    pub fn get(&self, id: NodeId) -> &[NodeId] {
        self.fanouts
            .get(id.index())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

impl Network {
    /// Build the fanout index, if not already available
    pub fn start_fanout(&mut self) {
        if self.fanout.is_none() {
            log::trace!("Building fanout index for {} objects", self.nb_objects());
            self.fanout = Some(FanoutIndex::build(&self.arena));
        }
    }

    /// Drop the fanout index
    pub fn stop_fanout(&mut self) {
        self.fanout = None;
    }

    /// Returns whether the fanout index is available
    pub fn has_fanout(&self) -> bool {
        self.fanout.is_some()
    }

    /// Nodes and outputs using this node as a fanin
    ///
    /// Requires the fanout index: see [`Network::start_fanout`].
    pub fn fanouts(&self, id: NodeId) -> &[NodeId] {
        match &self.fanout {
            Some(f) => f.get(id),
            None => panic!("The fanout index is not available; call start_fanout() first"),
        }
    }

    /// Drop the fanout index after an edit that removed edges
    pub(crate) fn invalidate_fanout(&mut self) {
        if self.fanout.take().is_some() {
            log::trace!("Fanout index invalidated");
        }
    }
}

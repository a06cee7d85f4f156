//! Chunked storage of node records
//!
//! Identities index a sequence of fixed-size chunks. Only the last chunk grows, doubling its
//! capacity up to the chunk size; a full chunk is never reallocated, so the nodes it holds are
//! never moved.

use crate::network::edge::NodeId;
use crate::network::node::{Node, NodeType};

const CHUNK_BITS: usize = 12;
const CHUNK_SIZE: usize = 1 << CHUNK_BITS;
const CHUNK_MASK: usize = CHUNK_SIZE - 1;
const MIN_CHUNK_SIZE: usize = 16;

#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    chunks: Vec<Vec<Node>>,
    len: usize,
    nb_deleted: usize,
}

impl Arena {
    /// Reserve space for at least this many nodes
    pub fn with_capacity(nb: usize) -> Arena {
        let nb_chunks = (nb + CHUNK_MASK) >> CHUNK_BITS;
        let chunks = (0..nb_chunks)
            .map(|c| Vec::with_capacity((nb - (c << CHUNK_BITS)).min(CHUNK_SIZE)))
            .collect();
        Arena {
            chunks,
            len: 0,
            nb_deleted: 0,
        }
    }

    /// Number of identities issued so far, including removed nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of removed nodes
    pub fn nb_deleted(&self) -> usize {
        self.nb_deleted
    }

    /// Allocate a node with a fresh identity
    pub fn alloc(&mut self, kind: NodeType) -> NodeId {
        let id = NodeId::new(self.len);
        let c = self.len >> CHUNK_BITS;
        if c == self.chunks.len() {
            self.chunks.push(Vec::new());
        }
        let chunk = &mut self.chunks[c];
        debug_assert!(chunk.len() < CHUNK_SIZE);
        if chunk.len() == chunk.capacity() {
            // Double the capacity, but never beyond a full chunk
            let extra = chunk.len().max(MIN_CHUNK_SIZE).min(CHUNK_SIZE - chunk.len());
            chunk.reserve_exact(extra);
        }
        chunk.push(Node::new(kind, id));
        self.len += 1;
        id
    }

    pub fn get(&self, id: NodeId) -> &Node {
        let i = id.index();
        assert!(i < self.len, "Node {id} does not exist");
        &self.chunks[i >> CHUNK_BITS][i & CHUNK_MASK]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        let i = id.index();
        assert!(i < self.len, "Node {id} does not exist");
        &mut self.chunks[i >> CHUNK_BITS][i & CHUNK_MASK]
    }

    /// Mark the slot as removed; the identity is not reused
    pub fn recycle(&mut self, id: NodeId) {
        let node = self.get_mut(id);
        debug_assert!(!node.is_dead());
        *node = Node::new(NodeType::None, id);
        self.nb_deleted += 1;
    }

    /// All slots, in identity order
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.chunks.iter().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> + '_ {
        self.chunks.iter_mut().flatten()
    }
}

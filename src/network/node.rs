use std::fmt;

use crate::network::edge::{Edge, NodeId};

/// Type tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeType {
    /// Slot of a node removed by cleanup
    #[default]
    None,
    /// The constant true node
    Const,
    /// Combinational input
    Ci,
    /// Combinational output
    Co,
    /// Single-input buffer
    Buf,
    /// Two-input And
    And,
    /// Two-input Xor, only created when enabled on the network
    Xor,
}

impl NodeType {
    /// Number of fanins for this type of node
    pub fn nb_fanins(&self) -> usize {
        match self {
            NodeType::None | NodeType::Const | NodeType::Ci => 0,
            NodeType::Co | NodeType::Buf => 1,
            NodeType::And | NodeType::Xor => 2,
        }
    }

    /// Returns true for two-input logic nodes, that go through the structural hash table
    pub fn is_hashed(&self) -> bool {
        matches!(self, NodeType::And | NodeType::Xor)
    }

    /// Returns true for internal logic: And, Xor and buffers
    pub fn is_logic(&self) -> bool {
        matches!(self, NodeType::And | NodeType::Xor | NodeType::Buf)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeType::None => "None",
            NodeType::Const => "Const",
            NodeType::Ci => "Ci",
            NodeType::Co => "Co",
            NodeType::Buf => "Buf",
            NodeType::And => "And",
            NodeType::Xor => "Xor",
        };
        write!(f, "{s}")
    }
}

/// Per-node scratch slot, reused by each pass
///
/// Duplication stores the corresponding edge in the target network; analysis passes store an integer.
/// A pass must clear the slots before using them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scratch {
    /// No value
    #[default]
    Empty,
    /// Corresponding edge in another network
    Copy(Edge),
    /// Auxiliary value of an analysis pass
    Value(u32),
}

impl Scratch {
    /// Integer stored in the slot, or 0
    pub fn value(&self) -> u32 {
        match self {
            Scratch::Value(v) => *v,
            _ => 0,
        }
    }
}

/// A node record in the arena
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) kind: NodeType,
    pub(crate) id: NodeId,
    pub(crate) fanins: [Edge; 2],
    pub(crate) level: u32,
    pub(crate) refs: u32,
    pub(crate) phase: bool,
    pub(crate) mark_a: bool,
    pub(crate) mark_b: bool,
    pub(crate) trav_id: u32,
    pub(crate) cio_id: u32,
    pub(crate) next: Option<NodeId>,
    pub(crate) scratch: Scratch,
}

impl Node {
    /// A fresh node: everything is zero except the type
    pub(crate) fn new(kind: NodeType, id: NodeId) -> Node {
        Node {
            kind,
            id,
            fanins: [Edge::one(), Edge::one()],
            level: 0,
            refs: 0,
            phase: false,
            mark_a: false,
            mark_b: false,
            trav_id: 0,
            cio_id: 0,
            next: None,
            scratch: Scratch::Empty,
        }
    }

    /// Type of the node
    pub fn kind(&self) -> NodeType {
        self.kind
    }

    /// Identity of the node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns true if the node has been removed
    pub fn is_dead(&self) -> bool {
        self.kind == NodeType::None
    }

    /// Fanins of the node; empty for inputs and the constant
    pub fn fanins(&self) -> &[Edge] {
        &self.fanins[..self.kind.nb_fanins()]
    }

    /// First fanin
    pub fn fanin0(&self) -> Edge {
        assert!(self.kind.nb_fanins() >= 1, "{} node {} has no fanin", self.kind, self.id);
        self.fanins[0]
    }

    /// Second fanin
    pub fn fanin1(&self) -> Edge {
        assert!(self.kind.nb_fanins() >= 2, "{} node {} has no second fanin", self.kind, self.id);
        self.fanins[1]
    }

    /// Logic level of the node
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Number of edges pointing to the node
    pub fn refs(&self) -> u32 {
        self.refs
    }

    /// Value of the node when all inputs are zero
    pub fn phase(&self) -> bool {
        self.phase
    }

    /// Position of an input or output in the network interface
    pub fn cio_id(&self) -> usize {
        assert!(
            matches!(self.kind, NodeType::Ci | NodeType::Co),
            "{} node {} is not an input or output",
            self.kind,
            self.id
        );
        self.cio_id as usize
    }

    /// Value of the scratch slot
    pub fn scratch(&self) -> Scratch {
        self.scratch
    }

    /// Transient mark A
    pub fn mark_a(&self) -> bool {
        self.mark_a
    }

    /// Transient mark B
    pub fn mark_b(&self) -> bool {
        self.mark_b
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NodeType::Ci => write!(f, "{} = Ci({})", self.id, self.cio_id),
            NodeType::Co => write!(f, "Co({}) = {}", self.cio_id, self.fanins[0]),
            NodeType::Const => write!(f, "{} = 1", self.id),
            NodeType::None => write!(f, "{} = <deleted>", self.id),
            NodeType::Buf => write!(f, "{} = Buf({})", self.id, self.fanins[0]),
            NodeType::And | NodeType::Xor => {
                write!(f, "{} = {}({}, {})", self.id, self.kind, self.fanins[0], self.fanins[1])
            }
        }
    }
}

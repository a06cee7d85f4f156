use std::fmt;
use std::ops::{BitXor, BitXorAssign, Not};

/// Identity of a node in a network
///
/// Identities are allocated in increasing order and never reused while the network is alive.
/// Identity 0 is the constant node.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default)]
pub struct NodeId(u32);

impl NodeId {
    /// The constant node, present in every network
    pub const CONST: NodeId = NodeId(0);

    /// Create an identity from an index in the arena
    pub fn new(i: usize) -> NodeId {
        assert!(i < u32::MAX as usize, "Node identity {i} is too large");
        NodeId(i as u32)
    }

    /// Index of the node in the arena
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns true for the constant node
    pub fn is_const(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Reference to a node, possibly complemented
///
/// The constant node represents true: the false constant is its complement.
/// Edges are ordered by node identity first, then by polarity.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Edge {
    target: NodeId,
    inverted: bool,
}

impl Edge {
    /// Create an edge to a node
    pub fn new(target: NodeId, inverted: bool) -> Edge {
        Edge { target, inverted }
    }

    /// Constant zero edge
    pub fn zero() -> Edge {
        Edge::new(NodeId::CONST, true)
    }

    /// Constant one edge
    pub fn one() -> Edge {
        Edge::new(NodeId::CONST, false)
    }

    /// Node pointed to by the edge
    pub fn node(&self) -> NodeId {
        self.target
    }

    /// Returns true if the edge is complemented
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Returns true if the edge points to the constant node
    pub fn is_constant(&self) -> bool {
        self.target.is_const()
    }

    /// The same edge without complement
    pub fn regular(&self) -> Edge {
        Edge::new(self.target, false)
    }
}

impl From<NodeId> for Edge {
    fn from(n: NodeId) -> Edge {
        Edge::new(n, false)
    }
}

impl From<bool> for Edge {
    fn from(b: bool) -> Edge {
        if b {
            Edge::one()
        } else {
            Edge::zero()
        }
    }
}

impl Not for Edge {
    type Output = Edge;
    fn not(self) -> Edge {
        Edge::new(self.target, !self.inverted)
    }
}

impl Not for &'_ Edge {
    type Output = Edge;
    fn not(self) -> Edge {
        !*self
    }
}

impl BitXorAssign<bool> for Edge {
    fn bitxor_assign(&mut self, rhs: bool) {
        self.inverted ^= rhs;
    }
}

impl BitXor<bool> for Edge {
    type Output = Edge;
    fn bitxor(self, rhs: bool) -> Self::Output {
        let mut l = self;
        l ^= rhs;
        l
    }
}

impl BitXor<bool> for &'_ Edge {
    type Output = Edge;
    fn bitxor(self, rhs: bool) -> Self::Output {
        *self ^ rhs
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_constant() {
            let v = if self.inverted { 0 } else { 1 };
            write!(f, "{v}")
        } else {
            if self.inverted {
                write!(f, "!")?;
            }
            write!(f, "{}", self.target)
        }
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let l0 = Edge::zero();
        let l1 = Edge::one();
        assert_eq!(l0, !l1);
        assert_eq!(l1, !l0);
        assert!(l0.is_inverted());
        assert!(!l1.is_inverted());
        assert!(l0.is_constant());
        assert_eq!(format!("{l0}"), "0");
        assert_eq!(format!("{l1}"), "1");
        assert_eq!(Edge::from(false), l0);
        assert_eq!(Edge::from(true), l1);
    }

    #[test]
    fn test_node() {
        for v in 1..10 {
            let l = Edge::from(NodeId::new(v));
            assert!(!l.is_constant());
            assert_eq!(l.node().index(), v);
            assert_eq!((!l).node().index(), v);
            assert!(!l.is_inverted());
            assert!((!l).is_inverted());
            assert_eq!((!l).regular(), l);
            assert_eq!(l ^ false, l);
            assert_eq!(l ^ true, !l);
            assert_eq!(format!("{l}"), format!("n{v}"));
            assert_eq!(format!("{}", !l), format!("!n{v}"));
        }
    }

    #[test]
    fn test_ordering() {
        let a = Edge::from(NodeId::new(3));
        let b = Edge::from(NodeId::new(5));
        assert!(a < !a);
        assert!(!a < b);
        assert!(Edge::one() < a);
        assert!(Edge::zero() < a);
    }
}

//! Representation and handling of And-Inverter-Graphs

mod arena;
mod choice;
mod cleanup;
mod dup;
mod edge;
mod fanout;
pub mod generators;
mod level;
mod network;
mod node;
pub mod stats;
mod strash;
mod traversal;

pub use dup::{InputMapping, MiterOp};
pub use edge::{Edge, NodeId};
pub use level::{BoxDesc, BoxHierarchy, Hierarchy};
pub use network::Network;
pub use node::{Node, NodeType, Scratch};

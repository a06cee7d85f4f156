//! Compute network statistics
//!
//! ```
//! # use aigkit::Network;
//! # let mut aig = Network::new();
//! use aigkit::network::stats::stats;
//! let stats = stats(&mut aig);
//!
//! // Check that there is no Xor node
//! assert_eq!(stats.nb_xor, 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::Network;

/// Number of inputs, outputs and nodes in a network
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkStats {
    /// Number of inputs
    pub nb_inputs: usize,
    /// Number of outputs
    pub nb_outputs: usize,
    /// Number of And nodes
    pub nb_and: usize,
    /// Number of Xor nodes
    pub nb_xor: usize,
    /// Number of buffers
    pub nb_buf: usize,
    /// Maximum level of the outputs
    pub nb_levels: u32,
    /// Number of equivalence classes with several members
    pub nb_choice_classes: usize,
    /// Number of class members that are not representatives
    pub nb_choice_nodes: usize,
}

impl NetworkStats {
    /// Total number of logic nodes, including buffers
    pub fn nb_nodes(&self) -> usize {
        self.nb_and + self.nb_xor + self.nb_buf
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs)?;
        writeln!(f, "  Outputs: {}", self.nb_outputs)?;
        writeln!(f, "  Nodes: {}", self.nb_nodes())?;
        if self.nb_and != 0 {
            writeln!(f, "  And: {}", self.nb_and)?;
        }
        if self.nb_xor != 0 {
            writeln!(f, "  Xor: {}", self.nb_xor)?;
        }
        if self.nb_buf != 0 {
            writeln!(f, "  Buf: {}", self.nb_buf)?;
        }
        writeln!(f, "  Levels: {}", self.nb_levels)?;
        if self.nb_choice_classes != 0 {
            writeln!(
                f,
                "  Choices: {} classes, {} alternatives",
                self.nb_choice_classes, self.nb_choice_nodes
            )?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the network
///
/// The network is levelized as a side effect.
pub fn stats(a: &mut Network) -> NetworkStats {
    NetworkStats {
        nb_inputs: a.nb_inputs(),
        nb_outputs: a.nb_outputs(),
        nb_and: a.nb_ands(),
        nb_xor: a.nb_xors(),
        nb_buf: a.nb_buffers(),
        nb_levels: a.levelize(),
        nb_choice_classes: a.nb_choice_classes(),
        nb_choice_nodes: a.nb_choice_nodes(),
    }
}

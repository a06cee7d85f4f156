//! Error types for operations whose arguments are controlled by the caller
//!
//! Broken network invariants are not reported here: they panic where they are detected.

use thiserror::Error;

/// Result type for network operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported before any network is modified
#[derive(Debug, Error)]
pub enum Error {
    /// Two networks combined together have different numbers of inputs
    #[error("Different number of inputs: {0} vs {1}")]
    InputCountMismatch(usize, usize),

    /// Two networks combined together have different numbers of outputs
    #[error("Different number of outputs: {0} vs {1}")]
    OutputCountMismatch(usize, usize),

    /// Input index past the end of the network inputs
    #[error("Input {index} is out of range: the network has {nb_inputs} inputs")]
    InputOutOfRange {
        /// Requested index
        index: usize,
        /// Number of inputs in the network
        nb_inputs: usize,
    },

    /// Output index past the end of the network outputs
    #[error("Output {index} is out of range: the network has {nb_outputs} outputs")]
    OutputOutOfRange {
        /// Requested index
        index: usize,
        /// Number of outputs in the network
        nb_outputs: usize,
    },

    /// Input mapping that is not a permutation of the inputs
    #[error("Invalid input permutation: {0}")]
    InvalidPermutation(String),

    /// Edge that does not point to a live node of the target network
    #[error("Edge {0} is not valid in the target network")]
    InvalidEdge(String),

    /// Malformed text in a network file
    #[error("Parse error at line {line}: {msg}")]
    Parse {
        /// Line number, starting at 1
        line: usize,
        /// Description of the problem
        msg: String,
    },

    /// File with an extension that no reader or writer handles
    #[error("Unknown file extension: {0}")]
    UnknownExtension(String),

    /// I/O error while reading or writing a network
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

//! Structurally hashed And-Inverter-Graphs
//!
//! This crate provides the kernel of a logic synthesis package: a network of two-input And nodes connected
//! by edges that may be complemented, kept canonical by structural hashing.
//! Around it come the usual passes on such networks: traversals, duplication and rebuilding,
//! equivalence classes of nodes (choices), levelization and cleanup of dangling logic.
//!
//! # Usage
//!
//! The library is the main way to use aigkit. A small binary is provided to inspect and transform
//! networks in the [.bench](https://github.com/sterin/bench) format.
//!
//! ```bash
//! # Show available commands
//! aigkit help
//! # Show statistics
//! aigkit show mydesign.bench
//! # Rebuild the network with structural hashing
//! aigkit strash mydesign.bench -o hashed.bench
//! # Check equivalence between the two by random simulation
//! aigkit equiv mydesign.bench hashed.bench
//! ```
//!
//! Logging is done through the [log](https://docs.rs/log) crate; set `RUST_LOG=debug` to follow the passes.
//!
//! # Datastructures
//!
//! `Network` is an And-Inverter-Graph.
//! Inverters are implicit, occupying just one boolean in `Edge`.
//! Nodes live in an arena and are referred to by their `NodeId`, which is stable while they are alive.
//! Nodes are only created through constructors that simplify trivial cases, order their fanins and
//! share isomorphic nodes, so that a network never contains two nodes with the same fanins.
//!
//! For example, here is a full adder circuit:
//! ```
//! # use aigkit::Network;
//! let mut net = Network::new();
//! let i0 = net.add_input();
//! let i1 = net.add_input();
//! let i2 = net.add_input();
//! let carry = net.maj(i0, i1, i2);
//! let out = net.xor_n(&[i0, i1, i2]);
//! net.add_output(carry);
//! net.add_output(out);
//!
//! // Building the same function again does not create any node
//! let nb_ands = net.nb_ands();
//! net.maj(i1, i0, i2);
//! assert_eq!(net.nb_ands(), nb_ands);
//! ```
//!
//! Every node has a reference count. Logic that becomes unused after an edit stays in the network until
//! [`Network::cleanup`] is called.
//!
//! ## Library and documentation
//!
//! The library is not stable, and the datastructures may change between versions.

#![warn(missing_docs)]

pub mod error;
pub mod io;
pub mod network;
pub mod sim;

pub use error::{Error, Result};
pub use network::{stats, Edge, Network, NodeId, NodeType};

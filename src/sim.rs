//! Simulation of a logic network
//!
//! Simulation is bit-parallel: each word holds the values of 64 independent patterns.

mod simple_sim;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::Network;

use simple_sim::SimpleSimulator;

/// Maximum number of inputs for exhaustive simulation
pub const MAX_TRUTH_TABLE_INPUTS: usize = 16;

/// Simple conversion to 64b format
fn bool_to_multi(values: &[bool]) -> Vec<u64> {
    values.iter().map(|b| if *b { !0 } else { 0 }).collect()
}

/// Simple conversion from 64b format
fn multi_to_bool(values: &[u64]) -> Vec<bool> {
    values.iter().map(|b| *b & 1 != 0).collect()
}

/// Simulate a network on multiple patterns; return the output values for each
pub fn simulate(a: &Network, input_values: &Vec<Vec<bool>>) -> Vec<Vec<bool>> {
    let mut sim = SimpleSimulator::from_aig(a);
    input_values
        .iter()
        .map(|v| multi_to_bool(&sim.run(&bool_to_multi(v))))
        .collect()
}

/// Simulate a combinatorial network; return the output values
pub fn simulate_comb(a: &Network, input_values: &Vec<bool>) -> Vec<bool> {
    let input = vec![input_values.clone()];
    let output = simulate(a, &input);
    output[0].clone()
}

/// Simulate a network with 64b inputs, one pattern per bit; return the output values
pub fn simulate_multi(a: &Network, input_values: &[u64]) -> Vec<u64> {
    let mut sim = SimpleSimulator::from_aig(a);
    sim.run(input_values)
}

/// Value of input `i` in word `w` of an exhaustive enumeration of the patterns
fn truth_table_input(i: usize, w: usize) -> u64 {
    const MASKS: [u64; 6] = [
        0xAAAA_AAAA_AAAA_AAAA,
        0xCCCC_CCCC_CCCC_CCCC,
        0xF0F0_F0F0_F0F0_F0F0,
        0xFF00_FF00_FF00_FF00,
        0xFFFF_0000_FFFF_0000,
        0xFFFF_FFFF_0000_0000,
    ];
    if i < 6 {
        MASKS[i]
    } else if (w >> (i - 6)) & 1 != 0 {
        !0
    } else {
        0
    }
}

/// Compute the truth table of each output by exhaustive simulation
///
/// Bit `p` of the table is the value of the output for the pattern where input `i` is bit `i` of `p`.
/// Tables of networks with fewer than 6 inputs are padded with zeros.
pub fn truth_tables(a: &Network) -> Vec<Vec<u64>> {
    let n = a.nb_inputs();
    assert!(
        n <= MAX_TRUTH_TABLE_INPUTS,
        "Too many inputs for exhaustive simulation: {n}"
    );
    let nb_words = if n <= 6 { 1 } else { 1 << (n - 6) };
    let mask = if n < 6 { (1u64 << (1 << n)) - 1 } else { !0 };
    let mut sim = SimpleSimulator::from_aig(a);
    let mut ret = vec![Vec::with_capacity(nb_words); a.nb_outputs()];
    for w in 0..nb_words {
        let inputs: Vec<u64> = (0..n).map(|i| truth_table_input(i, w)).collect();
        for (o, v) in sim.run(&inputs).into_iter().enumerate() {
            ret[o].push(v & mask);
        }
    }
    ret
}

/// Compare two networks by random simulation
///
/// Returns an input pattern on which some output differs, or None if no difference was found.
pub fn random_equivalence(
    a: &Network,
    b: &Network,
    nb_words: usize,
    seed: u64,
) -> Result<Option<Vec<bool>>> {
    if a.nb_inputs() != b.nb_inputs() {
        return Err(Error::InputCountMismatch(a.nb_inputs(), b.nb_inputs()));
    }
    if a.nb_outputs() != b.nb_outputs() {
        return Err(Error::OutputCountMismatch(a.nb_outputs(), b.nb_outputs()));
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut sim_a = SimpleSimulator::from_aig(a);
    let mut sim_b = SimpleSimulator::from_aig(b);
    for _ in 0..nb_words {
        let inputs: Vec<u64> = (0..a.nb_inputs()).map(|_| rng.gen()).collect();
        let out_a = sim_a.run(&inputs);
        let out_b = sim_b.run(&inputs);
        let diff = out_a
            .iter()
            .zip(out_b.iter())
            .fold(0u64, |acc, (x, y)| acc | (x ^ y));
        if diff != 0 {
            let bit = diff.trailing_zeros();
            let pattern = inputs.iter().map(|v| (v >> bit) & 1 != 0).collect();
            log::debug!("Found a difference after {} random patterns", 64 * nb_words);
            return Ok(Some(pattern));
        }
    }
    Ok(None)
}

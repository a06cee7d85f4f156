//! Network generators and templates

/// Adder generators
pub mod adder {
    use crate::{Edge, Network};

    /// A simple and slow ripple-carry adder
    ///
    /// The inputs are the bits of the first operand then the bits of the second, least significant first.
    /// The outputs are the bits of the sum followed by the carry.
    pub fn ripple_carry(len: usize) -> Network {
        let mut ret = Network::new();
        let a: Vec<Edge> = (0..len).map(|_| ret.add_input()).collect();
        let b: Vec<Edge> = (0..len).map(|_| ret.add_input()).collect();
        let mut c = Edge::zero();
        for i in 0..len {
            let next_c = ret.maj(a[i], b[i], c);
            let o = ret.xor_n(&[a[i], b[i], c]);
            ret.add_output(o);
            c = next_c;
        }
        ret.add_output(c);
        ret.cleanup();
        ret.check();
        ret
    }
}

/// Carry chain generators
pub mod carry_chain {
    use crate::{Edge, Network};

    /// A simple and slow ripple-carry chain
    pub fn ripple_carry(len: usize) -> Network {
        let mut ret = Network::new();
        let mut c = Edge::zero();
        for _ in 0..len {
            let propagate = ret.add_input();
            let generate = ret.add_input();
            let d = ret.and(propagate, c);
            c = !ret.and(!generate, !d);
            ret.add_output(c);
        }
        ret
    }
}

/// Simple generators to test functionality
pub mod testcases {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{Edge, Network};

    /// A random network, reproducible from its seed
    ///
    /// Each step combines two random signals with an And or, more rarely, a Xor. The outputs are
    /// driven by the last signals created, so that most of the logic is used.
    pub fn random(nb_inputs: usize, nb_outputs: usize, nb_nodes: usize, seed: u64) -> Network {
        assert!(nb_inputs >= 2);
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut ret = Network::with_capacity(nb_nodes);
        let mut pool: Vec<Edge> = (0..nb_inputs).map(|_| ret.add_input()).collect();
        for _ in 0..nb_nodes {
            let a = pool[rng.gen_range(0..pool.len())] ^ rng.gen::<bool>();
            let b = pool[rng.gen_range(0..pool.len())] ^ rng.gen::<bool>();
            let s = if rng.gen_bool(0.1) {
                ret.xor(a, b)
            } else {
                ret.and(a, b)
            };
            if !s.is_constant() {
                pool.push(s);
            }
        }
        for i in 0..nb_outputs {
            let s = pool[pool.len() - 1 - (i % pool.len())];
            ret.add_output(s ^ rng.gen::<bool>());
        }
        ret
    }

    /// A balanced tree of Xor computing the parity of the inputs
    pub fn parity(nb_inputs: usize, xor_nodes: bool) -> Network {
        let mut ret = Network::new();
        ret.set_xor_nodes(xor_nodes);
        let inputs: Vec<Edge> = (0..nb_inputs).map(|_| ret.add_input()).collect();
        let o = ret.xor_n(&inputs);
        ret.add_output(o);
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{adder, carry_chain, testcases};
    use crate::sim::simulate_comb;

    #[test]
    fn test_adder() {
        for i in [0, 1, 2, 4, 8, 16, 32, 64, 128] {
            let aig = adder::ripple_carry(i);
            assert_eq!(aig.nb_inputs(), 2 * i);
            assert_eq!(aig.nb_outputs(), i + 1);
        }
    }

    #[test]
    fn test_adder_function() {
        let aig = adder::ripple_carry(3);
        for a in 0..8usize {
            for b in 0..8usize {
                let mut inputs = Vec::new();
                for i in 0..3 {
                    inputs.push((a >> i) & 1 != 0);
                }
                for i in 0..3 {
                    inputs.push((b >> i) & 1 != 0);
                }
                let out = simulate_comb(&aig, &inputs);
                let sum: usize = out
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (*v as usize) << i)
                    .sum();
                assert_eq!(sum, a + b);
            }
        }
    }

    #[test]
    fn test_carry_chain() {
        for i in [0, 1, 2, 4, 8, 16, 32, 64, 128] {
            let mut aig = carry_chain::ripple_carry(i);
            assert_eq!(aig.nb_ands(), 2 * i.saturating_sub(1));
            assert_eq!(aig.levelize() as usize, 2 * i.saturating_sub(1));
        }
    }

    #[test]
    fn test_random() {
        let a = testcases::random(8, 4, 200, 3);
        let b = testcases::random(8, 4, 200, 3);
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.nb_inputs(), 8);
        assert_eq!(a.nb_outputs(), 4);
        assert!(a.nb_ands() > 50);
        for o in 0..a.nb_outputs() {
            assert!(a.node(a.output(o).node()).kind().is_logic());
        }
        a.check();
    }

    #[test]
    fn test_parity() {
        let aig = testcases::parity(5, false);
        assert_eq!(aig.nb_ands(), 12);
        let aig = testcases::parity(5, true);
        assert_eq!(aig.nb_xors(), 4);
        assert_eq!(
            simulate_comb(&aig, &vec![true, false, true, true, false]),
            vec![true]
        );
    }
}

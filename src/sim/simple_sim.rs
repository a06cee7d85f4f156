use crate::network::NodeType;
use crate::{Edge, Network};

/// Structure for simulation based directly on the network representation
pub struct SimpleSimulator<'a> {
    aig: &'a Network,
    node_values: Vec<u64>,
}

/// Convert the inversion to a word for bitwise operations
fn pol_to_word(s: Edge) -> u64 {
    let pol = s.is_inverted() as u64;
    (!pol).wrapping_add(1)
}

impl<'a> SimpleSimulator<'a> {
    pub fn from_aig(aig: &'a Network) -> SimpleSimulator<'a> {
        assert!(aig.is_topo_sorted());
        SimpleSimulator {
            aig,
            node_values: vec![0; aig.nb_ids()],
        }
    }

    /// Simulate 64 patterns at once; returns the output values
    pub fn run(&mut self, input_values: &[u64]) -> Vec<u64> {
        self.reset();
        self.copy_inputs(input_values);
        self.run_comb();
        self.get_output_values()
    }

    fn reset(&mut self) {
        self.node_values = vec![0; self.aig.nb_ids()];
        self.node_values[0] = !0;
    }

    fn get_value(&self, s: Edge) -> u64 {
        self.node_values[s.node().index()] ^ pol_to_word(s)
    }

    fn copy_inputs(&mut self, inputs: &[u64]) {
        assert_eq!(inputs.len(), self.aig.nb_inputs());
        for (id, v) in self.aig.inputs().iter().zip(inputs) {
            self.node_values[id.index()] = *v;
        }
    }

    fn run_comb(&mut self) {
        for id in self.aig.logic_nodes() {
            let node = self.aig.node(id);
            let val = match node.kind() {
                NodeType::And => self.get_value(node.fanin0()) & self.get_value(node.fanin1()),
                NodeType::Xor => self.get_value(node.fanin0()) ^ self.get_value(node.fanin1()),
                NodeType::Buf => self.get_value(node.fanin0()),
                _ => unreachable!(),
            };
            self.node_values[id.index()] = val;
        }
    }

    fn get_output_values(&self) -> Vec<u64> {
        (0..self.aig.nb_outputs())
            .map(|o| self.get_value(self.aig.output(o)))
            .collect()
    }
}

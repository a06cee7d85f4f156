//! IO for .bench (ISCAS) files

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};

use crate::error::{Error, Result};
use crate::network::NodeType;
use crate::{Edge, Network};

use super::utils::{get_inverted_signals, sig_to_string};

/// A gate statement, with its line in the file
struct Statement {
    line: usize,
    name: String,
    gate: String,
    deps: Vec<String>,
}

/// Origin of a named signal
#[derive(Clone, Copy)]
enum Source {
    Input(usize),
    Statement(usize),
    Constant(bool),
}

fn parse_error(line: usize, msg: String) -> Error {
    Error::Parse { line, msg }
}

fn build_name_to_source(
    statements: &[Statement],
    inputs: &[(usize, String)],
) -> Result<HashMap<String, Source>> {
    let mut ret = HashMap::new();
    for (i, (line, name)) in inputs.iter().enumerate() {
        if ret.insert(name.clone(), Source::Input(i)).is_some() {
            return Err(parse_error(*line, format!("{name} is defined twice")));
        }
    }
    for (i, s) in statements.iter().enumerate() {
        if ret.insert(s.name.clone(), Source::Statement(i)).is_some() {
            return Err(parse_error(s.line, format!("{} is defined twice", s.name)));
        }
    }

    // ABC-style naming for constant signals
    if !ret.contains_key("vdd") {
        ret.insert("vdd".to_string(), Source::Constant(true));
    }
    if !ret.contains_key("gnd") {
        ret.insert("gnd".to_string(), Source::Constant(false));
    }
    Ok(ret)
}

fn check_statement(statement: &Statement, name_to_src: &HashMap<String, Source>) -> Result<()> {
    for dep in &statement.deps {
        if !name_to_src.contains_key(dep) {
            return Err(parse_error(
                statement.line,
                format!("Gate input {dep} is not generated anywhere"),
            ));
        }
    }
    let nb = statement.deps.len();
    let ok = match statement.gate.to_uppercase().as_str() {
        "BUF" | "BUFF" | "NOT" => nb == 1,
        "VDD" | "VSS" | "GND" => nb == 0,
        "MUX" | "MAJ" => nb == 3,
        "AND" | "NAND" | "OR" | "NOR" | "XOR" | "XNOR" => nb >= 1,
        _ => {
            return Err(parse_error(
                statement.line,
                format!("Unknown gate type {}", statement.gate),
            ))
        }
    };
    if !ok {
        return Err(parse_error(
            statement.line,
            format!("Wrong number of inputs for {}: {}", statement.gate, nb),
        ));
    }
    Ok(())
}

/// Build the logic of a statement whose dependencies are already built
fn build_gate(aig: &mut Network, gate: &str, deps: &[Edge]) -> Edge {
    match gate.to_uppercase().as_str() {
        "BUF" | "BUFF" => deps[0],
        "NOT" => !deps[0],
        "VDD" => Edge::one(),
        "VSS" | "GND" => Edge::zero(),
        "AND" => aig.and_n(deps),
        "NAND" => !aig.and_n(deps),
        "OR" => aig.or_n(deps),
        "NOR" => !aig.or_n(deps),
        "XOR" => aig.xor_n(deps),
        "XNOR" => !aig.xor_n(deps),
        "MUX" => aig.mux(deps[0], deps[1], deps[2]),
        "MAJ" => aig.maj(deps[0], deps[1], deps[2]),
        _ => unreachable!("Gate types are checked before construction"),
    }
}

/// Builds the statements in dependency order, whatever their order in the file
struct Builder<'a> {
    statements: &'a [Statement],
    name_to_src: &'a HashMap<String, Source>,
    values: Vec<Option<Edge>>,
    in_progress: Vec<bool>,
}

impl<'a> Builder<'a> {
    fn value(&self, aig: &Network, name: &str) -> Option<Edge> {
        match self.name_to_src[name] {
            Source::Input(i) => Some(aig.input(i)),
            Source::Constant(b) => Some(Edge::from(b)),
            Source::Statement(i) => self.values[i],
        }
    }

    /// Build a statement and everything it depends on, with an explicit stack
    fn build(&mut self, aig: &mut Network, root: usize) -> Result<Edge> {
        let statements = self.statements;
        let mut stack = vec![(root, false)];
        while let Some((i, expanded)) = stack.pop() {
            let s = &statements[i];
            if expanded {
                let deps = s
                    .deps
                    .iter()
                    .map(|d| self.value(&*aig, d))
                    .collect::<Option<Vec<Edge>>>()
                    .ok_or_else(|| parse_error(s.line, format!("{} is not built", s.name)))?;
                self.values[i] = Some(build_gate(aig, &s.gate, &deps));
                self.in_progress[i] = false;
                continue;
            }
            if self.values[i].is_some() {
                continue;
            }
            if self.in_progress[i] {
                return Err(parse_error(
                    s.line,
                    format!("Combinational loop through {}", s.name),
                ));
            }
            self.in_progress[i] = true;
            stack.push((i, true));
            for d in s.deps.iter().rev() {
                if let Source::Statement(j) = self.name_to_src[d] {
                    if self.values[j].is_none() {
                        stack.push((j, false));
                    }
                }
            }
        }
        self.values[root].ok_or_else(|| {
            let s = &statements[root];
            parse_error(s.line, format!("{} is not built", s.name))
        })
    }
}

fn network_from_statements(
    statements: &[Statement],
    inputs: &[(usize, String)],
    outputs: &[(usize, String)],
) -> Result<Network> {
    let mut ret = Network::new();
    ret.add_inputs(inputs.len());

    // Compute a mapping between the two
    let name_to_src = build_name_to_source(statements, inputs)?;

    // Check everything
    for statement in statements {
        check_statement(statement, &name_to_src)?;
    }
    for (line, output) in outputs {
        if !name_to_src.contains_key(output) {
            return Err(parse_error(
                *line,
                format!("Output {output} is not generated anywhere"),
            ));
        }
    }

    let mut builder = Builder {
        statements,
        name_to_src: &name_to_src,
        values: vec![None; statements.len()],
        in_progress: vec![false; statements.len()],
    };
    for i in 0..statements.len() {
        builder.build(&mut ret, i)?;
    }
    for (line, o) in outputs {
        let e = builder
            .value(&ret, o)
            .ok_or_else(|| parse_error(*line, format!("Output {o} is not built")))?;
        ret.add_output(e);
    }
    ret.check();
    Ok(ret)
}

/// Read a network in .bench format, as used by the ISCAS benchmarks
///
/// These files describe the design with simple statements like:
/// ```text
///     # This is a comment
///     INPUT(i0)
///     INPUT(i1)
///     x0 = AND(i0, i1)
///     x1 = NAND(x0, i1)
///     x2 = OR(x0, i0)
///     x3 = NOR(i0, x1)
///     x4 = XOR(x3, x2)
///     x5 = BUF(x4)
///     x6 = NOT(x5)
///     x7 = gnd
///     x8 = vdd
///     OUTPUT(x0)
/// ```
///
/// Statements may come in any order. The logic is structurally hashed while it is read, so that
/// buffers and trivial gates disappear; unused statements are kept as dangling logic.
pub fn read_bench<R: Read>(r: R) -> Result<Network> {
    let mut statements = Vec::new();
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let line = i + 1;
        let s = l?;
        let t = s.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if !t.contains('=') {
            let parts: Vec<_> = t
                .split(&['(', ')'])
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() != 2 {
                return Err(parse_error(line, format!("Malformed statement {t}")));
            }
            if ["INPUT", "PINPUT"].contains(&parts[0]) {
                inputs.push((line, parts[1].to_string()));
            } else if ["OUTPUT", "POUTPUT"].contains(&parts[0]) {
                outputs.push((line, parts[1].to_string()));
            } else {
                return Err(parse_error(line, format!("Unknown keyword {}", parts[0])));
            }
        } else {
            let parts: Vec<_> = t
                .split(&['=', '(', ',', ')'])
                .map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .collect();
            if parts.len() < 2 {
                return Err(parse_error(line, format!("Malformed statement {t}")));
            }
            statements.push(Statement {
                line,
                name: parts[0].clone(),
                gate: parts[1].clone(),
                deps: parts[2..].to_vec(),
            });
        }
    }
    network_from_statements(&statements, &inputs, &outputs)
}

/// Write a network in .bench format, as used by the ISCAS benchmarks
///
/// Each node is named after its identity, and complemented edges use an additional Not gate:
/// ```text
///     INPUT(n1)
///     INPUT(n2)
///     OUTPUT(n3_n)
///     n3 = AND(n1, n2_n)
///     n2_n = NOT(n2)
///     n3_n = NOT(n3)
/// ```
pub fn write_bench<W: Write>(w: &mut W, aig: &Network) -> std::io::Result<()> {
    writeln!(w, "# .bench (ISCAS) file")?;
    writeln!(w, "# Generated by aigkit")?;
    for i in 0..aig.nb_inputs() {
        writeln!(w, "INPUT({})", aig.input(i))?;
    }
    writeln!(w)?;
    for i in 0..aig.nb_outputs() {
        writeln!(w, "OUTPUT({})", sig_to_string(&aig.output(i)))?;
    }
    writeln!(w)?;
    for id in aig.logic_nodes() {
        let node = aig.node(id);
        let rep = node
            .fanins()
            .iter()
            .map(sig_to_string)
            .collect::<Vec<_>>()
            .join(", ");
        match node.kind() {
            NodeType::And => writeln!(w, "{} = AND({})", id, rep)?,
            NodeType::Xor => writeln!(w, "{} = XOR({})", id, rep)?,
            NodeType::Buf => writeln!(w, "{} = BUF({})", id, rep)?,
            _ => unreachable!(),
        }
    }

    for id in get_inverted_signals(aig) {
        writeln!(w, "{}_n = NOT({})", id, id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_bench, write_bench};
    use crate::error::Error;
    use crate::network::generators::testcases;
    use crate::sim::truth_tables;
    use crate::Edge;

    #[test]
    fn test_basic_readwrite() {
        let example = "# .bench (ISCAS) file
INPUT(i0)
INPUT(i1)

OUTPUT(x0)
OUTPUT(x1)
OUTPUT(x2)
OUTPUT(x3)
OUTPUT(x4)
OUTPUT(x5)
OUTPUT(x6)
OUTPUT(x8)

x0 = AND(i0, i1)
x1 = NAND(i0, i1)
x2 = OR(i0, i1)
x3 = NOR(i0, i1)
x4 = XOR(i0, i1)
x5 = BUF(i0)
x6 = NOT(i1)
x7 = NOT(x2)
x8 = gnd
x9 = vdd
x10 = XOR(  i0, i1 )
x11   =  gnd
x12 = MUX(x0, x1, x2)
x13 = MAJ(x0, i1, x7)
";
        let aig = read_bench(example.as_bytes()).unwrap();
        assert_eq!(aig.nb_inputs(), 2);
        assert_eq!(aig.nb_outputs(), 8);
        assert_eq!(aig.output(0), !aig.output(1));
        assert_eq!(aig.output(2), !aig.output(3));
        assert_eq!(aig.output(5), aig.input(0));
        assert_eq!(aig.output(6), !aig.input(1));
        assert_eq!(aig.output(7), Edge::zero());
        let tt = truth_tables(&aig);
        assert_eq!(tt[0], vec![0b1000]);
        assert_eq!(tt[2], vec![0b1110]);
        assert_eq!(tt[4], vec![0b0110]);

        let mut buf = Vec::new();
        write_bench(&mut buf, &aig).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let aig2 = read_bench(text.as_bytes()).unwrap();
        assert_eq!(truth_tables(&aig2), tt);
    }

    #[test]
    fn test_any_order() {
        let example = "INPUT(a)
INPUT(b)
OUTPUT(z)
z = OR(y, b)
y = AND(x, a)
x = NOT(b)
";
        let aig = read_bench(example.as_bytes()).unwrap();
        assert_eq!(aig.nb_ands(), 2);
        assert_eq!(truth_tables(&aig), vec![vec![0b1110]]);
    }

    #[test]
    fn test_cycle() {
        let example = "INPUT(a)
OUTPUT(x)
x = AND(y, a)
y = AND(x, a)
";
        assert!(matches!(
            read_bench(example.as_bytes()),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_errors() {
        let undefined = "INPUT(a)\nOUTPUT(x)\nx = AND(a, b)\n";
        assert!(matches!(
            read_bench(undefined.as_bytes()),
            Err(Error::Parse { line: 3, .. })
        ));
        let twice = "INPUT(a)\nINPUT(a)\n";
        assert!(matches!(
            read_bench(twice.as_bytes()),
            Err(Error::Parse { line: 2, .. })
        ));
        let unknown = "INPUT(a)\nx = FOO(a)\n";
        assert!(read_bench(unknown.as_bytes()).is_err());
        let arity = "INPUT(a)\nx = NOT(a, a)\n";
        assert!(read_bench(arity.as_bytes()).is_err());
        let keyword = "WIRE(a)\n";
        assert!(read_bench(keyword.as_bytes()).is_err());
        let output = "INPUT(a)\nOUTPUT(b)\n";
        assert!(read_bench(output.as_bytes()).is_err());
    }

    #[test]
    fn test_roundtrip_random() {
        let mut aig = testcases::random(6, 4, 150, 11);
        aig.cleanup();
        let mut buf = Vec::new();
        write_bench(&mut buf, &aig).unwrap();
        let aig2 = read_bench(buf.as_slice()).unwrap();
        assert_eq!(aig2.nb_ands(), aig.nb_ands());
        assert_eq!(truth_tables(&aig2), truth_tables(&aig));
    }
}

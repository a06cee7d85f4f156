//! Command line interface

use std::path::PathBuf;

use aigkit::io::{read_network_file, write_network_file};
use aigkit::network::stats::stats;
use aigkit::network::MiterOp;
use aigkit::sim::random_equivalence;
use aigkit::{Network, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a logic network
    ///
    /// Will print statistics on the number of inputs, outputs and nodes in the network,
    /// and the number of nodes at each level.
    #[clap()]
    Show(ShowArgs),

    /// Rebuild a logic network with structural hashing
    ///
    /// Buffers and duplicate logic are removed, as well as logic not used by any output.
    #[clap()]
    Strash(StrashArgs),

    /// Build a miter from two logic networks
    ///
    /// Each output of the miter compares a pair of outputs of the two networks.
    #[clap()]
    Miter(MiterArgs),

    /// Replace an input of a logic network by a constant
    #[clap()]
    Cofactor(CofactorArgs),

    /// Extract the logic cones of some outputs
    #[clap()]
    Extract(ExtractArgs),

    /// Check equivalence between two logic networks by random simulation
    ///
    /// The command will fail if a difference is found, and will output the
    /// failing test pattern. Passing does not prove equivalence.
    #[clap(alias = "equiv")]
    CheckEquivalence(EquivArgs),
}

impl Commands {
    /// Run the command
    pub fn run(&self) -> Result<()> {
        match self {
            Commands::Show(a) => a.run(),
            Commands::Strash(a) => a.run(),
            Commands::Miter(a) => a.run(),
            Commands::Cofactor(a) => a.run(),
            Commands::Extract(a) => a.run(),
            Commands::CheckEquivalence(a) => a.run(),
        }
    }
}

/// Command arguments for network informations
#[derive(Args)]
pub struct ShowArgs {
    /// Network to show
    file: PathBuf,
}

impl ShowArgs {
    pub fn run(&self) -> Result<()> {
        let mut aig = read_network_file(&self.file)?;
        println!("Network stats:\n{}", stats(&mut aig));
        let levels = aig.levels_by_depth();
        println!("Nodes per level:");
        for (l, nodes) in levels.iter().enumerate().skip(1) {
            println!("  {}: {}", l, nodes.len());
        }
        Ok(())
    }
}

/// Command arguments for structural hashing
#[derive(Args)]
pub struct StrashArgs {
    /// Network to rebuild
    file: PathBuf,

    /// Output file for the rebuilt network
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Create the nodes in order of their logic level
    #[arg(long)]
    levelized: bool,

    /// Remove the inputs that are not used
    #[arg(long)]
    trim: bool,
}

impl StrashArgs {
    pub fn run(&self) -> Result<()> {
        let mut aig = read_network_file(&self.file)?;
        let mut ret = if self.levelized {
            aig.dup_levelized()
        } else {
            aig.dup_dfs()
        };
        ret.cleanup();
        if self.trim {
            ret = ret.dup_trim().0;
        }
        log::info!(
            "Rebuilt network from {} to {} nodes",
            aig.nb_nodes(),
            ret.nb_nodes()
        );
        write_network_file(&self.output, &ret)
    }
}

/// Comparison between outputs of a miter
#[derive(Clone, Copy, ValueEnum)]
pub enum MiterKind {
    /// Outputs differ
    Xor,
    /// The first output holds and the second does not
    Implication,
    /// Either output holds
    Or,
    /// Both outputs hold
    And,
}

impl From<MiterKind> for MiterOp {
    fn from(k: MiterKind) -> MiterOp {
        match k {
            MiterKind::Xor => MiterOp::Xor,
            MiterKind::Implication => MiterOp::Implication,
            MiterKind::Or => MiterOp::Or,
            MiterKind::And => MiterOp::And,
        }
    }
}

/// Command arguments for miter construction
#[derive(Args)]
pub struct MiterArgs {
    /// First network
    file1: PathBuf,
    /// Second network
    file2: PathBuf,

    /// Output file for the miter
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Comparison applied to each pair of outputs
    #[arg(long, value_enum, default_value_t = MiterKind::Xor)]
    op: MiterKind,

    /// Combine all outputs of the miter into a single one
    #[arg(long)]
    single_output: bool,
}

impl MiterArgs {
    pub fn run(&self) -> Result<()> {
        let mut aig1 = read_network_file(&self.file1)?;
        let mut aig2 = read_network_file(&self.file2)?;
        let mut miter = Network::miter(&mut aig1, &mut aig2, self.op.into())?;
        if self.single_output {
            miter = miter.or_outputs();
        }
        write_network_file(&self.output, &miter)
    }
}

/// Command arguments for cofactoring
#[derive(Args)]
pub struct CofactorArgs {
    /// Network to cofactor
    file: PathBuf,

    /// Output file for the cofactor
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Index of the input to replace
    #[arg(short = 'i', long)]
    input: usize,

    /// Value given to the input
    #[arg(long, action = clap::ArgAction::Set, default_value_t = false)]
    value: bool,
}

impl CofactorArgs {
    pub fn run(&self) -> Result<()> {
        let mut aig = read_network_file(&self.file)?;
        let ret = aig.cofactor(self.input, self.value)?;
        write_network_file(&self.output, &ret)
    }
}

/// Command arguments for cone extraction
#[derive(Args)]
pub struct ExtractArgs {
    /// Network to extract from
    file: PathBuf,

    /// Output file for the extracted network
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Indices of the outputs to keep
    #[arg(long, value_delimiter = ',', required = true)]
    outputs: Vec<usize>,
}

impl ExtractArgs {
    pub fn run(&self) -> Result<()> {
        let mut aig = read_network_file(&self.file)?;
        let (ret, support) = aig.extract_partition(&self.outputs)?;
        println!("Inputs of the extracted network: {:?}", support);
        write_network_file(&self.output, &ret)
    }
}

/// Command arguments for equivalence checking
#[derive(Args)]
pub struct EquivArgs {
    /// First network to compare
    file1: PathBuf,
    /// Second network to compare
    file2: PathBuf,

    /// Number of 64-pattern words simulated
    #[arg(short = 'n', long, default_value_t = 64)]
    num_words: usize,

    /// Seed for random pattern generation
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl EquivArgs {
    pub fn run(&self) -> Result<()> {
        let aig1 = read_network_file(&self.file1)?;
        let aig2 = read_network_file(&self.file2)?;
        match random_equivalence(&aig1, &aig2, self.num_words, self.seed)? {
            Some(pattern) => {
                println!("Networks are not equivalent");
                println!("Test pattern:");
                let bits: String = pattern.iter().map(|b| if *b { '1' } else { '0' }).collect();
                println!("{}", bits);
                std::process::exit(1);
            }
            None => {
                println!(
                    "No difference found with {} random patterns",
                    64 * self.num_words
                );
                Ok(())
            }
        }
    }
}

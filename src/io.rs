//! Read and write logic networks to files

mod bench;
mod utils;

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

pub use bench::{read_bench, write_bench};

use crate::error::{Error, Result};
use crate::Network;

fn extension(path: &PathBuf) -> Result<String> {
    match path.extension() {
        None => Err(Error::UnknownExtension(String::new())),
        Some(s) => Ok(s.to_string_lossy().to_string()),
    }
}

/// Read a logic network from a file
///
/// Following extensions are supported: .bench
pub fn read_network_file(path: &PathBuf) -> Result<Network> {
    let ext = extension(path)?;
    if ext == "bench" {
        let f = File::open(path)?;
        let aig = read_bench(f)?;
        log::debug!(
            "Read {} with {} inputs, {} outputs and {} nodes",
            path.display(),
            aig.nb_inputs(),
            aig.nb_outputs(),
            aig.nb_nodes()
        );
        Ok(aig)
    } else {
        Err(Error::UnknownExtension(ext))
    }
}

/// Write a logic network to a file
///
/// Following extensions are supported: .bench
pub fn write_network_file(path: &PathBuf, aig: &Network) -> Result<()> {
    let ext = extension(path)?;
    if ext == "bench" {
        let mut f = BufWriter::new(File::create(path)?);
        write_bench(&mut f, aig)?;
        Ok(())
    } else {
        Err(Error::UnknownExtension(ext))
    }
}

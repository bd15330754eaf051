use std::{io, path::PathBuf};

use clap::Parser;
use pagesim::{config::DEFAULT_FRAMES, PolicyKind, ReferenceString, SimConfig};

#[derive(Parser, Debug)]
#[command(
    name = "pagesim",
    version,
    about = "Replays a reference string against a fixed set of frames and counts page faults"
)]
pub struct Cli {
    /// Reference string file: whitespace separated page numbers, `-` for stdin
    pub file: PathBuf,

    /// Number of physical frames
    #[arg(default_value_t = DEFAULT_FRAMES, env = "PAGESIM_FRAMES")]
    pub frames: usize,

    /// Page replacement algorithm
    #[arg(default_value_t = PolicyKind::Optimal, env = "PAGESIM_ALGORITHM")]
    pub pra: PolicyKind,

    /// Only print the totals, not every reference
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every page fault to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> pagesim::Result<SimConfig> {
        SimConfig::new(self.frames, self.pra)
    }

    pub fn load_references(&self) -> pagesim::Result<ReferenceString> {
        if self.file.as_os_str() == "-" {
            ReferenceString::from_reader(io::stdin().lock())
        } else {
            ReferenceString::from_path(&self.file)
        }
    }
}

//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::{Path, PathBuf};

/// One-line usage hint printed when the positional arguments are missing.
pub const USAGE: &str = "Usage: svgnorm <input1.svg> [input2.svg ...] <output_dir>";

/// svgnorm batch SVG normalizer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Input SVG files followed by the output directory (last argument)
    #[arg(value_name = "PATH", required = true, num_args = 2..)]
    pub paths: Vec<PathBuf>,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Number of worker threads processing files concurrently
    #[arg(short, long, default_value_t = crate::batch::DEFAULT_JOBS)]
    pub jobs: usize,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Split the trailing positional off as the output directory.
    ///
    /// `None` only when fewer than two positionals survived parsing,
    /// which clap already rejects.
    pub fn split_paths(&self) -> Option<(&[PathBuf], &Path)> {
        match self.paths.split_last() {
            Some((output_dir, inputs)) if !inputs.is_empty() => {
                Some((inputs, output_dir.as_path()))
            }
            _ => None,
        }
    }
}

//! svgnorm - batch SVG origin normalizer.
//!
//! Translates all path coordinates so the geometry's minimum corner sits
//! at the origin, recomputes `viewBox`/`width`/`height` from the
//! endpoint bounding box, and reports per-file outcomes in
//! `summary.json`.

#![allow(dead_code)]

mod batch;
mod cli;
mod logger;
mod svg;

use std::path::Path;

use anyhow::Result;
use clap::{ColorChoice, Parser, error::ErrorKind};
use cli::{Cli, USAGE};

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(_) => {
            // Argument problems print the usage hint on stdout and exit 1
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let Some((inputs, output_dir)) = cli.split_paths() else {
        println!("{USAGE}");
        std::process::exit(1);
    };

    let summary = batch::run(inputs, output_dir, cli.jobs)?;
    batch::write_summary(&summary, Path::new("summary.json"))?;

    log!("summary"; "{} normalized, {} failed ({} total)",
        summary.success.len(), summary.fail.len(), inputs.len());

    // Per-file failures are reported via summary.json, not the exit code
    Ok(())
}

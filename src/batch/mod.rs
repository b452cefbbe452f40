//! Worker-pool fan-out over the input file list.
//!
//! Each file is normalized independently on a bounded rayon pool; the
//! only shared mutable state is the mutex-guarded [`Summary`] collector.
//! Per-file errors are recorded and never abort the batch.

mod summary;

pub use summary::{Failure, Summary, write_summary};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::log;
use crate::svg::normalize_file;

/// Default worker count for the file pool.
pub const DEFAULT_JOBS: usize = 8;

/// Normalize every input file into `output_dir` on `jobs` workers.
///
/// The output directory is created (with intermediate directories) up
/// front. Returns the collected summary; only infrastructure failures
/// (directory creation, pool construction) surface as `Err`.
pub fn run(inputs: &[PathBuf], output_dir: &Path, jobs: usize) -> Result<Summary> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            output_dir.display()
        )
    })?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("failed to build worker pool")?;

    let summary = Mutex::new(Summary::default());
    pool.install(|| {
        inputs
            .par_iter()
            .for_each(|input| process_file(input, output_dir, &summary));
    });

    Ok(summary.into_inner())
}

/// Normalize one file, recording exactly one outcome in the collector.
///
/// The output keeps the input's base filename; the input's directory is
/// discarded.
fn process_file(input: &Path, output_dir: &Path, summary: &Mutex<Summary>) {
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let output = output_dir.join(&filename);

    match normalize_file(input, &output) {
        Ok(()) => {
            log!("normalize"; "{} {}", "✓".green(), filename);
            summary.lock().record_success(filename);
        }
        Err(e) => {
            log!("error"; "{} {}: {}", "✗".red(), filename, e);
            summary.lock().record_failure(filename, e.to_string());
        }
    }
}

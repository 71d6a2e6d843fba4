//! The conversion run: output-directory setup plus the per-file pipeline.
//!
//! A run is a single sequential pass over the input directory. Each file is
//! fully converted (or fails) before the next one starts:
//!
//! ```text
//! decode → fit inside resize limit (optional) → encode → write
//! ```
//!
//! ## Error Policy
//!
//! Two tiers, attempted exactly once each — there is no retry logic:
//!
//! - **Fatal**: output-directory removal/creation and input enumeration.
//!   These abort before any file is touched.
//! - **Recoverable**: everything per-file (read, decode, resize, encode,
//!   write). A failure becomes a [`FileOutcome::Failed`] and the run moves
//!   on to the next file.
//!
//! Pixel work goes through an [`ImageBackend`] so the loop logic is testable
//! with the recording mock instead of real codecs.

use crate::config::RunConfig;
use crate::imaging::{BackendError, EncodeParams, ImageBackend, fit_within};
use crate::output;
use crate::scan::{self, Entry, ScanError, SourceFile};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to prepare output directory {0}: {1}")]
    OutputDir(PathBuf, std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Everything a run needs, resolved before it starts.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Purge the output directory before converting.
    pub refresh: bool,
    pub config: RunConfig,
}

/// What happened to one input-directory entry.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Converted {
        source: String,
        output: String,
        bytes: u64,
        /// Final dimensions when a resize was applied.
        resized: Option<(u32, u32)>,
    },
    Skipped {
        source: String,
    },
    Failed {
        source: String,
        error: String,
    },
}

/// Result of a whole run: one outcome per input-directory entry, in
/// enumeration order.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Whether the output directory was purged before the run.
    pub cleared: bool,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn converted(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Converted { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// Ensure the output directory exists, optionally purging it first.
///
/// Returns whether a purge happened. Failures here are fatal for the run —
/// converting into a directory we could not set up would scatter partial
/// results.
pub fn prepare_output_dir(dir: &Path, refresh: bool) -> std::io::Result<bool> {
    let cleared = refresh && dir.exists();
    if cleared {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(cleared)
}

/// Run one file through decode → optional resize → encode.
///
/// Returns the encoded bytes plus the applied dimensions when the image was
/// resized. An image already inside the resize limit is never enlarged and
/// skips the resize step entirely.
pub fn convert_file(
    backend: &impl ImageBackend,
    file: &SourceFile,
    config: &RunConfig,
) -> Result<(Vec<u8>, Option<(u32, u32)>), BackendError> {
    let image = backend.decode(&file.path, file.format)?;

    let fitted = config
        .resize_limit
        .and_then(|limit| fit_within((image.width(), image.height()), limit));
    let image = match fitted {
        Some((w, h)) => backend.resize(&image, w, h),
        None => image,
    };

    let params = EncodeParams::for_output(file.format.output_format(), config.quality);
    let bytes = backend.encode(&image, &params)?;
    Ok((bytes, fitted))
}

/// Run the full conversion sequentially over the input directory.
///
/// Prints a notice per entry as it completes. Per-file failures become
/// outcomes; only output-directory setup and input enumeration abort.
pub fn run(backend: &impl ImageBackend, opts: &RunOptions) -> Result<RunSummary, ConvertError> {
    let cleared = prepare_output_dir(&opts.output_dir, opts.refresh)
        .map_err(|e| ConvertError::OutputDir(opts.output_dir.clone(), e))?;
    if cleared {
        println!("{}", output::format_clear_notice(&opts.output_dir));
    }

    let listing = scan::scan(&opts.input_dir)?;

    let mut summary = RunSummary {
        cleared,
        outcomes: Vec::new(),
    };

    for entry in &listing.entries {
        let outcome = match entry {
            Entry::Skipped(name) => FileOutcome::Skipped {
                source: name.clone(),
            },
            Entry::Convertible(file) => {
                match convert_and_write(backend, file, &opts.config, &opts.output_dir) {
                    Ok((bytes, resized)) => FileOutcome::Converted {
                        source: file.file_name(),
                        output: file.output_name(),
                        bytes,
                        resized,
                    },
                    Err(e) => FileOutcome::Failed {
                        source: file.file_name(),
                        error: e.to_string(),
                    },
                }
            }
        };
        println!("{}", output::format_outcome(&outcome));
        summary.outcomes.push(outcome);
    }

    Ok(summary)
}

/// Convert one file and write the result, overwriting any previous output.
fn convert_and_write(
    backend: &impl ImageBackend,
    file: &SourceFile,
    config: &RunConfig,
    output_dir: &Path,
) -> Result<(u64, Option<(u32, u32)>), BackendError> {
    let (bytes, resized) = convert_file(backend, file, config)?;
    let output_path = output_dir.join(file.output_name());
    fs::write(&output_path, &bytes)?;
    Ok((bytes.len() as u64, resized))
}

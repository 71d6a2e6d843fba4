//! Input directory enumeration and extension dispatch.
//!
//! The dispatcher looks at exactly one directory level — subdirectories are
//! not traversed — and partitions its regular files by extension:
//!
//! | Extension (any case) | Converted as | Written as |
//! |---|---|---|
//! | `heic` | HEIC | `.jpg` |
//! | `jpg`, `jpeg` | JPEG | `.jpg` |
//! | `png` | PNG | `.png` |
//! | anything else | — | skipped with a notice |
//!
//! Skips are expected behavior, not errors: the input directory commonly
//! holds sidecar files, dotfiles, and notes alongside the photos. Entries
//! keep directory enumeration order — deliberately unsorted, so a listing
//! matches what a run will do.

use crate::imaging::SourceFormat;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input directory not found: {0}")]
    MissingInput(PathBuf),
}

/// A convertible file discovered in the input directory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Filename with the final extension segment stripped (`photo.HEIC` → `photo`).
    pub base_name: String,
    pub format: SourceFormat,
}

impl SourceFile {
    /// Filename as it appears in the input directory.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Filename of this source's conversion result.
    pub fn output_name(&self) -> String {
        format!(
            "{}.{}",
            self.base_name,
            self.format.output_format().extension()
        )
    }
}

/// One input-directory entry, as the dispatcher saw it.
#[derive(Debug, Clone)]
pub enum Entry {
    Convertible(SourceFile),
    /// File with an unrecognized extension; carries the filename.
    Skipped(String),
}

/// Input directory contents in enumeration order.
#[derive(Debug, Default)]
pub struct Listing {
    pub entries: Vec<Entry>,
}

impl Listing {
    /// Convertible files, in enumeration order.
    pub fn convertible(&self) -> impl Iterator<Item = &SourceFile> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Convertible(f) => Some(f),
            Entry::Skipped(_) => None,
        })
    }

    /// Names of skipped files, in enumeration order.
    pub fn skipped(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Skipped(name) => Some(name.as_str()),
            Entry::Convertible(_) => None,
        })
    }
}

/// Enumerate the input directory (non-recursive) and dispatch by extension.
///
/// Only regular files are considered; subdirectories are ignored without a
/// skip notice. A missing input directory is an error — there is nothing
/// sensible to convert.
pub fn scan(input_dir: &Path) -> Result<Listing, ScanError> {
    if !input_dir.is_dir() {
        return Err(ScanError::MissingInput(input_dir.to_path_buf()));
    }

    let mut listing = Listing::default();

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        listing.entries.push(match SourceFormat::from_extension(ext) {
            Some(format) => {
                let base_name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| name.clone());
                Entry::Convertible(SourceFile {
                    path,
                    base_name,
                    format,
                })
            }
            None => Entry::Skipped(name),
        });
    }

    Ok(listing)
}

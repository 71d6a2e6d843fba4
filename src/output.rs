//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Convert
//!
//! One line per input-directory entry, in enumeration order, as each file
//! completes:
//!
//! ```text
//! Cleared dist
//! converted photo.HEIC → photo.jpg (142.3 KB, resized to 2000x1500)
//! converted art.png → art.png (88.1 KB)
//! skip: notes.txt
//! failed: broken.jpg: Processing failed: invalid JPEG marker
//! Converted 2 files, skipped 1, failed 1
//! ```
//!
//! ## Check
//!
//! ```text
//! Convertible
//!     photo.heic → photo.jpg
//!     art.png → art.png
//!
//! Skipped
//!     notes.txt
//!
//! 2 convertible, 1 skipped
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns lines) for testability and
//! a `print_*` wrapper that writes to stdout. Format functions are pure —
//! no I/O, no side effects.

use crate::convert::{FileOutcome, RunSummary};
use crate::scan::Listing;
use std::path::Path;

/// Format a byte count for humans: `B` below a kilobyte, then one-decimal
/// `KB`/`MB`.
fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Format the notice for a purged output directory.
pub fn format_clear_notice(dir: &Path) -> String {
    format!("Cleared {}", dir.display())
}

/// Format one per-file line: conversion, skip, or failure.
pub fn format_outcome(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Converted {
            source,
            output,
            bytes,
            resized,
        } => {
            let detail = match resized {
                Some((w, h)) => format!("{}, resized to {}x{}", format_size(*bytes), w, h),
                None => format_size(*bytes),
            };
            format!("converted {} → {} ({})", source, output, detail)
        }
        FileOutcome::Skipped { source } => format!("skip: {}", source),
        FileOutcome::Failed { source, error } => format!("failed: {}: {}", source, error),
    }
}

/// Format the end-of-run summary line.
pub fn format_run_summary(summary: &RunSummary) -> String {
    format!(
        "Converted {} files, skipped {}, failed {}",
        summary.converted(),
        summary.skipped(),
        summary.failed()
    )
}

/// Print the end-of-run summary.
pub fn print_run_summary(summary: &RunSummary) {
    println!("{}", format_run_summary(summary));
}

/// Format the dry-run listing: what a run would convert and skip.
pub fn format_check_output(listing: &Listing) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Convertible".to_string());
    for file in listing.convertible() {
        lines.push(format!("    {} → {}", file.file_name(), file.output_name()));
    }

    let skipped: Vec<&str> = listing.skipped().collect();
    if !skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped".to_string());
        for name in &skipped {
            lines.push(format!("    {}", name));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} convertible, {} skipped",
        listing.convertible().count(),
        skipped.len()
    ));

    lines
}

/// Print the dry-run listing.
pub fn print_check_output(listing: &Listing) {
    for line in format_check_output(listing) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::SourceFormat;
    use crate::scan::{Entry, SourceFile};

    fn converted(source: &str, output: &str, bytes: u64) -> FileOutcome {
        FileOutcome::Converted {
            source: source.to_string(),
            output: output.to_string(),
            bytes,
            resized: None,
        }
    }

    #[test]
    fn size_formatting_picks_sane_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(145_716), "142.3 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn converted_line_shows_remap_and_size() {
        let line = format_outcome(&converted("photo.HEIC", "photo.jpg", 2048));
        assert_eq!(line, "converted photo.HEIC → photo.jpg (2.0 KB)");
    }

    #[test]
    fn converted_line_shows_resize() {
        let outcome = FileOutcome::Converted {
            source: "big.jpg".to_string(),
            output: "big.jpg".to_string(),
            bytes: 1024,
            resized: Some((2000, 1500)),
        };
        assert_eq!(
            format_outcome(&outcome),
            "converted big.jpg → big.jpg (1.0 KB, resized to 2000x1500)"
        );
    }

    #[test]
    fn skip_and_failure_lines() {
        let skip = FileOutcome::Skipped {
            source: "notes.txt".to_string(),
        };
        assert_eq!(format_outcome(&skip), "skip: notes.txt");

        let failed = FileOutcome::Failed {
            source: "broken.jpg".to_string(),
            error: "decode blew up".to_string(),
        };
        assert_eq!(format_outcome(&failed), "failed: broken.jpg: decode blew up");
    }

    #[test]
    fn run_summary_counts() {
        let summary = RunSummary {
            cleared: false,
            outcomes: vec![
                converted("a.jpg", "a.jpg", 10),
                converted("b.png", "b.png", 10),
                FileOutcome::Skipped {
                    source: "c.txt".to_string(),
                },
                FileOutcome::Failed {
                    source: "d.jpg".to_string(),
                    error: "boom".to_string(),
                },
            ],
        };
        assert_eq!(
            format_run_summary(&summary),
            "Converted 2 files, skipped 1, failed 1"
        );
    }

    #[test]
    fn check_output_lists_both_partitions() {
        let listing = Listing {
            entries: vec![
                Entry::Convertible(SourceFile {
                    path: "/in/photo.heic".into(),
                    base_name: "photo".into(),
                    format: SourceFormat::Heic,
                }),
                Entry::Skipped("notes.txt".to_string()),
            ],
        };

        let lines = format_check_output(&listing);
        assert_eq!(lines[0], "Convertible");
        assert_eq!(lines[1], "    photo.heic → photo.jpg");
        assert!(lines.contains(&"Skipped".to_string()));
        assert!(lines.contains(&"    notes.txt".to_string()));
        assert_eq!(lines.last().unwrap(), "1 convertible, 1 skipped");
    }

    #[test]
    fn check_output_without_skips_has_no_skip_section() {
        let listing = Listing {
            entries: vec![Entry::Convertible(SourceFile {
                path: "/in/a.png".into(),
                base_name: "a".into(),
                format: SourceFormat::Png,
            })],
        };

        let lines = format_check_output(&listing);
        assert!(!lines.contains(&"Skipped".to_string()));
        assert_eq!(lines.last().unwrap(), "1 convertible, 0 skipped");
    }
}

//! # batchpix
//!
//! A batch image converter for preparing photo dumps for the web: HEIC
//! becomes JPEG, JPEG and PNG are normalized, and everything is optionally
//! bounded to a max dimension and recompressed.
//!
//! # Architecture: One Sequential Pass
//!
//! A run is a single pass over a flat input directory:
//!
//! ```text
//! image/  →  scan (dispatch by extension)  →  per file:
//!            decode → fit inside limit → encode  →  dist/
//! ```
//!
//! Files are processed strictly one at a time; each conversion completes or
//! fails before the next begins. A failing file is reported and skipped —
//! it never takes the rest of the batch down with it. Only two things abort
//! a run: not being able to set up the output directory, and not being able
//! to enumerate the input directory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Mode presets (`plain`/`min`/`comp`/`mincomp`) → run knobs; optional `config.toml` |
//! | [`scan`] | Input enumeration and the extension table (heic→jpg, jpg/jpeg→jpg, png→png) |
//! | [`convert`] | Output-directory setup, the per-file pipeline, and the run loop |
//! | [`imaging`] | Decode/resize/encode behind the [`ImageBackend`](imaging::ImageBackend) trait |
//! | [`output`] | Console output formatting — pure `format_*` functions + `print_*` wrappers |
//!
//! # Design Decisions
//!
//! ## Fixed Extension Table
//!
//! Output format is decided by the source extension alone: HEIC and JPEG
//! sources become `.jpg`, PNG stays `.png`. Anything else is skipped with a
//! notice — an input directory full of sidecars and notes is normal, and a
//! skip is not a failure.
//!
//! ## Backend Seam
//!
//! Pixel work lives behind the `ImageBackend` trait. The production backend
//! combines libheif (HEIC), the `image` crate (JPEG/PNG decode, resize),
//! mozjpeg (JPEG encode), and oxipng (PNG palette reduction). The run loop
//! itself never touches pixels, so its policy — never enlarge, per-file
//! error isolation, quality fallbacks — is tested against a recording mock.
//!
//! ## Presets Over Flags-Only
//!
//! The common invocations are presets (`min`, `comp`, `mincomp`) mapping to
//! at most two knobs: a resize bound and a quality level. Explicit
//! `--max-size`/`--quality` flags override the preset for one-off runs, and
//! a sparse `config.toml` can re-tune the preset defaults per project.

pub mod config;
pub mod convert;
pub mod imaging;
pub mod output;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;

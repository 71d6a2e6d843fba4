//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every backend must
//! support: decode, resize, and encode. The run loop composes them per file
//! and never touches pixel data itself.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — libheif for HEIC,
//! the `image` crate plus mozjpeg/oxipng for everything else.

use super::params::{EncodeParams, SourceFormat};
use image::DynamicImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
///
/// Every backend must implement all three operations — decode, resize, and
/// encode — so the run loop is backend-agnostic and testable with a mock.
pub trait ImageBackend: Sync {
    /// Read and decode a source file into a pixel buffer.
    ///
    /// The format comes from the dispatcher's extension decision; backends
    /// must not second-guess it by sniffing content.
    fn decode(&self, path: &Path, format: SourceFormat) -> Result<DynamicImage, BackendError>;

    /// Resize to exact target dimensions.
    ///
    /// The caller has already done the bounding-box math; `width`/`height`
    /// preserve the source aspect ratio.
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage;

    /// Encode a pixel buffer into final output bytes.
    fn encode(&self, image: &DynamicImage, params: &EncodeParams) -> Result<Vec<u8>, BackendError>;
}

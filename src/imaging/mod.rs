//! Image processing: decode, resize, and encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode JPEG/PNG** | `image` crate |
//! | **Decode HEIC** | libheif (`libheif-rs`) |
//! | **Resize** | Lanczos3, bounding-box fit, never enlarging |
//! | **Encode JPEG** | mozjpeg, `image` encoder fallback |
//! | **Encode PNG** | `image` encoder + oxipng palette reduction |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Format table and encode parameter types
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub(crate) mod heic;
pub mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::fit_within;
pub use params::{CompressionEffort, EncodeParams, OutputFormat, Quality, SourceFormat};
pub use rust_backend::RustBackend;

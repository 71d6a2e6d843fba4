//! HEIC decoding via libheif.
//!
//! The `image` crate has no HEIF decoder, so HEIC sources go through
//! libheif: container → primary image handle → interleaved RGB plane.
//! Decoding is always full fidelity; the run's quality level only applies
//! later, at the JPEG encode step.

use super::backend::BackendError;
use image::DynamicImage;
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use std::path::Path;

/// Decode a HEIC file into an 8-bit RGB pixel buffer.
pub fn decode_heic(path: &Path) -> Result<DynamicImage, BackendError> {
    let lib_heif = LibHeif::new();

    let ctx = HeifContext::read_from_file(path.to_string_lossy().as_ref()).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to read HEIC {}: {}", path.display(), e))
    })?;

    let handle = ctx.primary_image_handle().map_err(|e| {
        BackendError::ProcessingFailed(format!(
            "Failed to get primary image of {}: {}",
            path.display(),
            e
        ))
    })?;

    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to decode HEIC {}: {}",
                path.display(),
                e
            ))
        })?;

    let width = handle.width();
    let height = handle.height();

    let planes = decoded.planes();
    let plane = planes.interleaved.ok_or_else(|| {
        BackendError::ProcessingFailed(format!("No RGB plane in {}", path.display()))
    })?;

    // libheif rows are padded to `stride` bytes; the image crate expects
    // tightly packed rows.
    let row_bytes = width as usize * 3;
    let rgb = if plane.stride == row_bytes {
        plane.data.to_vec()
    } else {
        let mut buf = Vec::with_capacity(row_bytes * height as usize);
        for row in plane.data.chunks(plane.stride).take(height as usize) {
            buf.extend_from_slice(&row[..row_bytes]);
        }
        buf
    };

    image::RgbImage::from_raw(width, height, rgb)
        .map(DynamicImage::ImageRgb8)
        .ok_or_else(|| {
            BackendError::ProcessingFailed(format!(
                "Decoded HEIC data from {} has unexpected size",
                path.display()
            ))
        })
}

//! Production image backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG) | `image` crate (pure Rust decoders) |
//! | Decode (HEIC) | libheif via [`heic`](super::heic) |
//! | Resize | `image::DynamicImage::resize` with `Lanczos3` filter |
//! | Encode → JPEG | mozjpeg (trellis + optimized coding), `image` encoder fallback |
//! | Encode → PNG | `image` encoder (adaptive filtering) + oxipng (palette reduction) |

use super::backend::{BackendError, ImageBackend};
use super::heic;
use super::params::{CompressionEffort, EncodeParams, Quality, SourceFormat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Write;
use std::path::Path;

/// Backend backed by libheif and the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn decode(&self, path: &Path, format: SourceFormat) -> Result<DynamicImage, BackendError> {
        match format {
            SourceFormat::Heic => heic::decode_heic(path),
            SourceFormat::Jpeg => decode_with(path, ImageFormat::Jpeg),
            SourceFormat::Png => decode_with(path, ImageFormat::Png),
        }
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        image.resize(width, height, FilterType::Lanczos3)
    }

    fn encode(&self, image: &DynamicImage, params: &EncodeParams) -> Result<Vec<u8>, BackendError> {
        match *params {
            EncodeParams::Jpeg { quality } => encode_jpeg(image, quality),
            EncodeParams::Png { effort } => encode_png(image, effort),
        }
    }
}

/// Decode with the format pinned by the dispatcher's extension decision.
fn decode_with(path: &Path, format: ImageFormat) -> Result<DynamicImage, BackendError> {
    let mut reader = ImageReader::open(path).map_err(BackendError::Io)?;
    reader.set_format(format);
    reader.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// Encode as JPEG, preferring mozjpeg and falling back to the `image` crate
/// encoder if mozjpeg panics on the input.
fn encode_jpeg(image: &DynamicImage, quality: Quality) -> Result<Vec<u8>, BackendError> {
    // JPEG has no alpha; mozjpeg wants 8-bit RGB or grayscale samples.
    let image = match image.color() {
        ColorType::Rgb8 | ColorType::L8 => image.clone(),
        ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            DynamicImage::ImageLuma8(image.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    };

    let mut out = Vec::new();
    if !try_encode_mozjpeg(&mut out, &image, quality.value())? {
        out.clear();
        let encoder = JpegEncoder::new_with_quality(&mut out, quality.value());
        image.write_with_encoder(encoder).map_err(|e| {
            BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e))
        })?;
    }

    Ok(out)
}

/// Returns Ok(false) when mozjpeg could not produce output, leaving the
/// caller to use the fallback encoder.
fn try_encode_mozjpeg<W: Write>(
    mut w: W,
    image: &DynamicImage,
    quality: u8,
) -> Result<bool, std::io::Error> {
    let res = std::panic::catch_unwind(move || {
        use mozjpeg::{ColorSpace, Compress};

        let mut encoder = Compress::new(match image.color() {
            ColorType::Rgb8 => ColorSpace::JCS_RGB,
            ColorType::L8 => ColorSpace::JCS_GRAYSCALE,
            _ => unreachable!("normalized before encode"),
        });

        let (width, height) = image.dimensions();
        encoder.set_size(width as usize, height as usize);
        encoder.set_quality(quality as f32);
        encoder.set_use_scans_in_trellis(true);
        encoder.set_optimize_coding(true);

        // Keep full chroma resolution except at low quality settings
        if quality >= 60 {
            for component in encoder.components_mut() {
                component.h_samp_factor = 1;
                component.v_samp_factor = 1;
            }
        }

        encoder.set_mem_dest();
        encoder.start_compress();
        assert!(encoder.write_scanlines(image.as_bytes()));
        encoder.finish_compress();

        encoder
    });

    match res {
        Ok(mut encoder) => match encoder.data_as_mut_slice() {
            Ok(buf) => w.write_all(buf).map(|_| true),
            Err(_) => Ok(false),
        },
        Err(_) => Ok(false),
    }
}

/// Encode as PNG with adaptive filtering, then run oxipng over the result
/// for palette reduction and filter re-selection.
fn encode_png(image: &DynamicImage, effort: CompressionEffort) -> Result<Vec<u8>, BackendError> {
    // The PNG encoder takes 8-bit samples only
    let image = match image {
        DynamicImage::ImageRgba16(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
            DynamicImage::ImageRgb8(image.to_rgb8())
        }
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(image.to_luma8()),
        DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        other => other.clone(),
    };

    let compression = match effort.value() {
        0..=3 => CompressionType::Fast,
        4..=7 => CompressionType::Default,
        _ => CompressionType::Best,
    };

    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, compression, PngFilterType::Adaptive);
    image.write_with_encoder(encoder).map_err(|e| {
        BackendError::ProcessingFailed(format!("PNG encode failed: {}", e))
    })?;

    // oxipng presets stop at 6
    let mut opts = oxipng::Options::from_preset(effort.value().min(6));
    opts.palette_reduction = true;

    // Keep the plain encode if oxipng rejects the file
    Ok(oxipng::optimize_from_memory(&out, &opts).unwrap_or(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::OutputFormat;
    use crate::test_helpers::{create_test_jpeg, create_test_png};
    use std::path::Path;

    #[test]
    fn decode_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let img = backend.decode(&path, SourceFormat::Jpeg).unwrap();
        assert_eq!((img.width(), img.height()), (200, 150));
    }

    #[test]
    fn decode_synthetic_png() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.png");
        create_test_png(&path, 120, 80);

        let backend = RustBackend::new();
        let img = backend.decode(&path, SourceFormat::Png).unwrap();
        assert_eq!((img.width(), img.height()), (120, 80));
    }

    #[test]
    fn decode_nonexistent_file_errors() {
        let backend = RustBackend::new();
        let result = backend.decode(Path::new("/nonexistent/image.jpg"), SourceFormat::Jpeg);
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn decode_garbage_bytes_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"this is not a jpeg").unwrap();

        let backend = RustBackend::new();
        let result = backend.decode(&path, SourceFormat::Jpeg);
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_to_exact_dimensions() {
        let backend = RustBackend::new();
        let img = DynamicImage::new_rgb8(400, 300);
        let resized = backend.resize(&img, 200, 150);
        assert_eq!((resized.width(), resized.height()), (200, 150));
    }

    #[test]
    fn jpeg_roundtrip_preserves_dimensions() {
        let backend = RustBackend::new();
        let img = gradient(64, 48);

        let bytes = backend
            .encode(&img, &EncodeParams::for_output(OutputFormat::Jpeg, Some(85)))
            .unwrap();
        let decoded =
            image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn jpeg_quality_controls_size() {
        let backend = RustBackend::new();
        let img = gradient(200, 200);

        let low = backend
            .encode(&img, &EncodeParams::for_output(OutputFormat::Jpeg, Some(5)))
            .unwrap();
        let high = backend
            .encode(&img, &EncodeParams::for_output(OutputFormat::Jpeg, Some(95)))
            .unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn png_roundtrip_preserves_dimensions() {
        let backend = RustBackend::new();
        let img = gradient(64, 48);

        let bytes = backend
            .encode(&img, &EncodeParams::for_output(OutputFormat::Png, None))
            .unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn png_rgba_source_roundtrips() {
        let backend = RustBackend::new();
        let img = DynamicImage::ImageRgba8(image::RgbaImage::from_fn(32, 32, |x, _| {
            image::Rgba([x as u8 * 8, 0, 0, 128])
        }));

        let bytes = backend
            .encode(&img, &EncodeParams::for_output(OutputFormat::Png, Some(80)))
            .unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn grayscale_jpeg_encodes() {
        let backend = RustBackend::new();
        let img = DynamicImage::ImageLuma8(image::GrayImage::from_fn(40, 40, |x, y| {
            image::Luma([(x + y) as u8])
        }));

        let bytes = backend
            .encode(&img, &EncodeParams::for_output(OutputFormat::Jpeg, None))
            .unwrap();
        let decoded =
            image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 40));
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }
}

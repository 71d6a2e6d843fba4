//! Parameter and format types for image operations.
//!
//! These types describe *what* to do, not *how* to do it. They are the
//! interface between the [`convert`](crate::convert) run loop (which decides
//! what each file needs) and the [`backend`](super::backend) (which does the
//! actual pixel work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing pipeline logic.
//!
//! ## Types
//!
//! - [`SourceFormat`] / [`OutputFormat`] — the fixed extension table: heic → jpg,
//!   jpg/jpeg → jpg, png → png.
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`CompressionEffort`] — PNG compression effort (0–9, default 6), derived
//!   from a quality level by integer division.
//! - [`EncodeParams`] — Full specification for an encode: target format plus
//!   the format's tuning knob.

/// Input format recognized by the dispatcher, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Heic,
    Jpeg,
    Png,
}

impl SourceFormat {
    /// Map a file extension (without dot, any case) to a source format.
    ///
    /// Returns `None` for anything outside {heic, jpg, jpeg, png} — the
    /// caller treats that as a skip, not an error.
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("heic") {
            Some(Self::Heic)
        } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else {
            None
        }
    }

    /// The format a file of this source format is written out as.
    ///
    /// HEIC has no output path of its own; it is always re-encoded as JPEG.
    pub fn output_format(self) -> OutputFormat {
        match self {
            Self::Heic | Self::Jpeg => OutputFormat::Jpeg,
            Self::Png => OutputFormat::Png,
        }
    }
}

/// Format of an emitted conversion result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Extension used for output filenames (always lowercase, jpeg as `jpg`).
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// PNG compression effort (0 = fastest, 9 = smallest).
///
/// Derived from a run's quality level by dividing by 10 and flooring, so
/// quality 80 maps to effort 8. Unconfigured runs use effort 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionEffort(pub u8);

impl CompressionEffort {
    pub fn new(value: u8) -> Self {
        Self(value.min(9))
    }

    pub fn from_quality(quality: u8) -> Self {
        Self::new(quality / 10)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for CompressionEffort {
    fn default() -> Self {
        Self(6)
    }
}

/// Full specification for encoding a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeParams {
    Jpeg { quality: Quality },
    Png { effort: CompressionEffort },
}

impl EncodeParams {
    /// Build encode parameters for an output format from a run's optional
    /// quality level.
    ///
    /// JPEG falls back to quality 90 when the run configured none; PNG maps
    /// the quality to a compression effort, falling back to effort 6.
    pub fn for_output(format: OutputFormat, quality: Option<u8>) -> Self {
        match format {
            OutputFormat::Jpeg => Self::Jpeg {
                quality: quality.map(Quality::new).unwrap_or_default(),
            },
            OutputFormat::Png => Self::Png {
                effort: quality
                    .map(CompressionEffort::from_quality)
                    .unwrap_or_default(),
            },
        }
    }

    /// The format this encode produces.
    pub fn output_format(self) -> OutputFormat {
        match self {
            Self::Jpeg { .. } => OutputFormat::Jpeg,
            Self::Png { .. } => OutputFormat::Png,
        }
    }
}

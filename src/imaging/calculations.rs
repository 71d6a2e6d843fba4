//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the dimensions needed to fit an image inside a square bounding
/// box, preserving aspect ratio.
///
/// Returns `None` when the image already fits — an image is never enlarged.
/// Otherwise the longer edge becomes `limit` and the shorter edge scales
/// proportionally (rounded, floor 1 px).
///
/// # Examples
/// ```
/// # use batchpix::imaging::fit_within;
/// // 4000x3000 bounded by 2000 → 2000x1500
/// assert_eq!(fit_within((4000, 3000), 2000), Some((2000, 1500)));
///
/// // 800x600 already fits inside 2000 → no resize
/// assert_eq!(fit_within((800, 600), 2000), None);
/// ```
pub fn fit_within(source: (u32, u32), limit: u32) -> Option<(u32, u32)> {
    let (w, h) = source;
    if w <= limit && h <= limit {
        return None;
    }

    let (out_w, out_h) = if w >= h {
        let ratio = limit as f64 / w as f64;
        (limit, (h as f64 * ratio).round() as u32)
    } else {
        let ratio = limit as f64 / h as f64;
        ((w as f64 * ratio).round() as u32, limit)
    };

    // Extreme aspect ratios can round the short edge to zero
    Some((out_w.max(1), out_h.max(1)))
}

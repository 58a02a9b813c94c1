//! Luminance and gradient extraction.

use image::Rgba;

use crate::raster::RasterBuffer;

/// Rec. 601 luma of an RGBA pixel, normalized to [0, 1].
pub fn luminance(pixel: &Rgba<u8>) -> f64 {
    let [r, g, b, _] = pixel.0;
    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0
}

/// Luma at a pixel position, with coordinates clamped to the image bounds.
pub fn luminance_at(raster: &RasterBuffer, x: i64, y: i64) -> f64 {
    luminance(&raster.pixel_clamped(x, y))
}

/// Horizontal plus vertical luma difference at a sample point.
///
/// Neighbor lookups clamp at the image boundary, so border pixels compare
/// against themselves on the outside edge and report a zero contribution
/// there.
pub fn gradient_at(raster: &RasterBuffer, x: i64, y: i64) -> f64 {
    let center = luminance_at(raster, x, y);
    let right = luminance_at(raster, x + 1, y);
    let below = luminance_at(raster, x, y + 1);
    (center - right).abs() + (center - below).abs()
}

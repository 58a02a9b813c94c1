//! Image adjustment pre-pass applied before sampling.
//!
//! Brightness and contrast are per-channel transfer functions matching the
//! usual CSS filter definitions. Rotation spins the buffer about its centre
//! into an equal-sized output, clipping corners and filling uncovered pixels
//! with transparent black. The pass runs once per sampling call so every
//! mode reads the same adjusted pixels.

use image::{Rgba, RgbaImage};
use punchkit_core::SampleParams;

use crate::raster::RasterBuffer;

/// Brightness, contrast and rotation settings for the sampling pre-pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageAdjustments {
    /// Brightness percentage. 100 is neutral.
    pub brightness_pct: f64,
    /// Contrast percentage. 100 is neutral.
    pub contrast_pct: f64,
    /// Clockwise rotation in degrees. 0 is neutral.
    pub rotation_deg: f64,
}

impl Default for ImageAdjustments {
    fn default() -> Self {
        Self {
            brightness_pct: 100.0,
            contrast_pct: 100.0,
            rotation_deg: 0.0,
        }
    }
}

impl ImageAdjustments {
    /// Creates adjustments with explicit values.
    pub fn new(brightness_pct: f64, contrast_pct: f64, rotation_deg: f64) -> Self {
        Self {
            brightness_pct,
            contrast_pct,
            rotation_deg,
        }
    }

    /// Extracts the adjustment settings from sampling parameters.
    pub fn from_params(params: &SampleParams) -> Self {
        Self {
            brightness_pct: params.brightness_pct,
            contrast_pct: params.contrast_pct,
            rotation_deg: params.rotation_deg,
        }
    }

    /// Returns true when applying the adjustments would change nothing.
    pub fn is_neutral(&self) -> bool {
        self.brightness_pct == 100.0 && self.contrast_pct == 100.0 && self.rotation_deg == 0.0
    }

    /// Applies the adjustments, returning the input untouched when neutral.
    ///
    /// Brightness runs first, then contrast, each clamped to the valid
    /// channel range before the next stage. Alpha is left alone. Rotation
    /// runs last with nearest-neighbour lookup.
    pub fn apply(&self, raster: RasterBuffer) -> RasterBuffer {
        if self.is_neutral() {
            return raster;
        }

        let mut image = raster.into_image();
        if self.brightness_pct != 100.0 || self.contrast_pct != 100.0 {
            apply_transfer(&mut image, self.brightness_pct, self.contrast_pct);
        }
        if self.rotation_deg != 0.0 {
            image = rotate_about_centre(&image, self.rotation_deg);
        }
        RasterBuffer::from(image)
    }
}

/// Per-channel brightness then contrast transfer on the colour channels.
fn apply_transfer(image: &mut RgbaImage, brightness_pct: f64, contrast_pct: f64) {
    let brightness = (brightness_pct / 100.0) as f32;
    let contrast = (contrast_pct / 100.0) as f32;

    for pixel in image.pixels_mut() {
        for channel in 0..3 {
            let mut value = pixel.0[channel] as f32 / 255.0;
            value = (value * brightness).clamp(0.0, 1.0);
            value = ((value - 0.5) * contrast + 0.5).clamp(0.0, 1.0);
            pixel.0[channel] = (value * 255.0).round() as u8;
        }
    }
}

/// Rotates clockwise about the pixel-grid centre into an equal-sized buffer.
///
/// Destination pixels are mapped back into the source with the inverse
/// rotation. The pivot sits on the pixel grid so quarter-turn rotations
/// land exactly on source pixels. Anything falling outside the source
/// becomes transparent black, which sampling reads as full luminance.
fn rotate_about_centre(image: &RgbaImage, rotation_deg: f64) -> RgbaImage {
    let (width, height) = image.dimensions();
    let cx = (width.saturating_sub(1)) as f64 / 2.0;
    let cy = (height.saturating_sub(1)) as f64 / 2.0;
    let theta = rotation_deg.to_radians();
    let (sin, cos) = theta.sin_cos();

    RgbaImage::from_fn(width, height, |x, y| {
        let dx = x as f64 - cx;
        let dy = y as f64 - cy;
        let sx = (cx + dx * cos + dy * sin).round();
        let sy = (cy - dx * sin + dy * cos).round();
        if sx < 0.0 || sy < 0.0 || sx >= width as f64 || sy >= height as f64 {
            Rgba([0, 0, 0, 0])
        } else {
            *image.get_pixel(sx as u32, sy as u32)
        }
    })
}

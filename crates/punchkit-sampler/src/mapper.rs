//! Pixel-to-millimeter coordinate mapping.
//!
//! X and Y carry independent scale factors derived from the panel extents
//! against the image's natural dimensions. Rotation is already baked into
//! the adjusted pixel buffer by the time coordinates are mapped, so this
//! stage is pure scaling. The bottom-left Y flip CAD output needs is the
//! exporter's job and is never applied here.

/// Affine pixel-space to panel-space mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelToMm {
    scale_x: f64,
    scale_y: f64,
}

impl PixelToMm {
    /// Derives the per-axis scale factors from panel and image extents.
    ///
    /// A zero-sized image never reaches the scan loop; its factors are
    /// kept at zero so they stay finite.
    pub fn new(
        panel_length_mm: f64,
        panel_height_mm: f64,
        image_width_px: u32,
        image_height_px: u32,
    ) -> Self {
        let scale_x = if image_width_px == 0 {
            0.0
        } else {
            panel_length_mm / image_width_px as f64
        };
        let scale_y = if image_height_px == 0 {
            0.0
        } else {
            panel_height_mm / image_height_px as f64
        };
        Self { scale_x, scale_y }
    }

    /// Millimeters per pixel on X.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Millimeters per pixel on Y.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// Maps a pixel coordinate to panel millimeter space.
    ///
    /// ```text
    /// mm_x = pixel_x * scale_x
    /// mm_y = pixel_y * scale_y
    /// ```
    pub fn to_panel_space(&self, pixel_x: f64, pixel_y: f64) -> (f64, f64) {
        (pixel_x * self.scale_x, pixel_y * self.scale_y)
    }

    /// Maps a panel millimeter coordinate back to pixel space.
    pub fn to_pixel_space(&self, mm_x: f64, mm_y: f64) -> (f64, f64) {
        let px = if self.scale_x == 0.0 {
            0.0
        } else {
            mm_x / self.scale_x
        };
        let py = if self.scale_y == 0.0 {
            0.0
        } else {
            mm_y / self.scale_y
        };
        (px, py)
    }
}

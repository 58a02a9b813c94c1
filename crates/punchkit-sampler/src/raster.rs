//! Decoded raster buffer handed to the sampler.

use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;

use punchkit_core::{Error, Result};

/// An RGBA pixel buffer with its natural dimensions.
///
/// The sampler only ever reads pixels and dimensions from this type;
/// where the bytes came from (file, upload, synthetic buffer) is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    /// Loads and decodes an image file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let img = image::open(path.as_ref())
            .map_err(|e| Error::other(format!("Failed to load image file: {}", e)))?;
        Ok(Self::from_image(img))
    }

    /// Wraps an already decoded image.
    pub fn from_image(img: DynamicImage) -> Self {
        Self {
            image: img.to_rgba8(),
        }
    }

    /// Builds a buffer from raw RGBA bytes in row-major order.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let image = RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| Error::other("RGBA buffer size does not match dimensions"))?;
        Ok(Self { image })
    }

    /// Builds a buffer where every pixel has the same color.
    pub fn uniform(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(rgba)),
        }
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// True when either dimension is zero. Degenerate buffers sample to
    /// an empty hole list.
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Pixel at the given position, with out-of-range coordinates clamped
    /// to the nearest edge pixel.
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Rgba<u8> {
        let cx = x.clamp(0, self.image.width() as i64 - 1) as u32;
        let cy = y.clamp(0, self.image.height() as i64 - 1) as u32;
        *self.image.get_pixel(cx, cy)
    }

    /// Borrow of the underlying RGBA image.
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the buffer and returns the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl From<RgbaImage> for RasterBuffer {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

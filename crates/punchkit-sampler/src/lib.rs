//! # Punchkit Sampler
//!
//! Converts a decoded raster image into punch-hole candidates.
//!
//! The pipeline stage implemented here is pure and synchronous: an RGBA
//! buffer plus [`SampleParams`](punchkit_core::SampleParams) goes in, a
//! list of holes in panel millimeter space comes out. Three conversion
//! algorithms are provided:
//!
//! - **density** buckets inverted luminance into the configured diameter
//!   set, so darker image areas punch larger holes
//! - **contour** thresholds the local luminance gradient and punches a
//!   fixed middle diameter along edges
//! - **pixel** thresholds inverted luminance on a widened grid and picks
//!   between the smallest and largest diameter only
//!
//! Brightness, contrast, and rotation are applied to the pixel buffer
//! before any luminance is read, matching the adjustment preview the
//! parameters were tuned against.

pub mod adjust;
pub mod luminance;
pub mod mapper;
pub mod raster;
pub mod sampler;

pub use adjust::ImageAdjustments;
pub use mapper::PixelToMm;
pub use raster::RasterBuffer;
pub use sampler::sample;

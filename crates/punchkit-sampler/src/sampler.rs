//! Sampling engine turning pixel data into punch holes.
//!
//! All three modes walk the image with the same float-stepping scan loop.
//! The stride is the hole spacing converted to pixels through the per-axis
//! scale factor, so the emitted holes keep the configured millimeter
//! spacing regardless of image resolution. Each sample rounds to the
//! nearest pixel for the luminance lookup but emits its unrounded scan
//! position, which keeps hole coordinates evenly spaced.

use punchkit_core::{Hole, Result, SampleMode, SampleParams};
use tracing::debug;

use crate::adjust::ImageAdjustments;
use crate::luminance::{gradient_at, luminance_at};
use crate::mapper::PixelToMm;
use crate::raster::RasterBuffer;

/// Minimum intensity for density mode to emit a hole.
const DENSITY_THRESHOLD: f64 = 0.1;
/// Minimum gradient strength for contour mode to emit a hole.
const CONTOUR_THRESHOLD: f64 = 0.3;
/// Minimum intensity for pixel mode to emit a hole.
const PIXEL_THRESHOLD: f64 = 0.2;
/// Intensity above which pixel mode switches to the largest diameter.
const PIXEL_SPLIT: f64 = 0.7;
/// Floor for the pixel-mode cell stride in pixels.
const MIN_CELL_STRIDE_PX: f64 = 5.0;

/// Samples an image into punch holes.
///
/// Pure and synchronous. Returns an empty list for a zero-sized image or
/// a zero-sized panel; refuses to run when no hole diameters are
/// configured.
pub fn sample(raster: &RasterBuffer, params: &SampleParams) -> Result<Vec<Hole>> {
    params.validate()?;
    if raster.is_empty() || params.panel_length_mm <= 0.0 || params.panel_height_mm <= 0.0 {
        return Ok(Vec::new());
    }

    let adjustments = ImageAdjustments::from_params(params);
    let adjusted;
    let source = if adjustments.is_neutral() {
        raster
    } else {
        adjusted = adjustments.apply(raster.clone());
        &adjusted
    };

    let mapper = PixelToMm::new(
        params.panel_length_mm,
        params.panel_height_mm,
        source.width(),
        source.height(),
    );

    let holes = match params.mode {
        SampleMode::Density => sample_density(source, params, &mapper),
        SampleMode::Contour => sample_contour(source, params, &mapper),
        SampleMode::Pixel => sample_pixelated(source, params, &mapper),
    };
    debug!("Sampled {} holes in {} mode", holes.len(), params.mode);
    Ok(holes)
}

/// Scan-loop geometry shared by the three modes: float strides and the
/// edge-margin band, both in pixel units per axis.
struct ScanGrid {
    width_px: f64,
    height_px: f64,
    step_x: f64,
    step_y: f64,
    margin_x: f64,
    margin_y: f64,
}

impl ScanGrid {
    fn new(raster: &RasterBuffer, params: &SampleParams, mapper: &PixelToMm) -> Self {
        // Strides never drop below one pixel so the scan always advances.
        let step_x = (params.hole_spacing_mm / mapper.scale_x()).max(1.0);
        let step_y = (params.hole_spacing_mm / mapper.scale_y()).max(1.0);
        let margin_x = (params.edge_margin_mm / mapper.scale_x()).max(0.0);
        let margin_y = (params.edge_margin_mm / mapper.scale_y()).max(0.0);
        Self {
            width_px: raster.width() as f64,
            height_px: raster.height() as f64,
            step_x,
            step_y,
            margin_x,
            margin_y,
        }
    }

    /// Pixel mode samples coarse cells instead of the fine grid.
    fn widen_to_cells(mut self) -> Self {
        self.step_x = (self.step_x * 2.0).max(MIN_CELL_STRIDE_PX);
        self.step_y = (self.step_y * 2.0).max(MIN_CELL_STRIDE_PX);
        self
    }

    /// True when the rounded sample pixel sits inside the margin band and
    /// the image. A stride landing half a pixel past the last column
    /// rounds to the width itself; those samples have no pixel and are
    /// dropped.
    fn in_band(&self, pixel_x: f64, pixel_y: f64) -> bool {
        pixel_x >= self.margin_x
            && pixel_x <= self.width_px - self.margin_x
            && pixel_y >= self.margin_y
            && pixel_y <= self.height_px - self.margin_y
            && pixel_x < self.width_px
            && pixel_y < self.height_px
    }

    /// Visits every in-band sample with its unrounded scan position and
    /// the rounded lookup pixel.
    fn for_each(&self, mut visit: impl FnMut(f64, f64, i64, i64)) {
        let mut y = 0.0;
        while y < self.height_px {
            let pixel_y = y.round();
            let mut x = 0.0;
            while x < self.width_px {
                let pixel_x = x.round();
                if self.in_band(pixel_x, pixel_y) {
                    visit(x, y, pixel_x as i64, pixel_y as i64);
                }
                x += self.step_x;
            }
            y += self.step_y;
        }
    }
}

/// Density mode: darker areas get larger holes off the diameter ladder.
fn sample_density(raster: &RasterBuffer, params: &SampleParams, mapper: &PixelToMm) -> Vec<Hole> {
    let grid = ScanGrid::new(raster, params, mapper);
    let rungs = params.hole_diameters.len();
    let mut holes = Vec::new();
    grid.for_each(|x, y, pixel_x, pixel_y| {
        let intensity = 1.0 - luminance_at(raster, pixel_x, pixel_y);
        if intensity > DENSITY_THRESHOLD {
            // Equal-width intensity buckets over the diameter ladder.
            let index = ((intensity * rungs as f64) as usize).min(rungs - 1);
            let (mm_x, mm_y) = mapper.to_panel_space(x, y);
            holes.push(Hole {
                x: mm_x,
                y: mm_y,
                diameter: params.hole_diameters[index],
                shape: params.shape,
                intensity: Some(intensity),
            });
        }
    });
    holes
}

/// Contour mode: a hole wherever the luminance gradient crosses the edge
/// threshold, always at the middle diameter of the ladder.
fn sample_contour(raster: &RasterBuffer, params: &SampleParams, mapper: &PixelToMm) -> Vec<Hole> {
    let grid = ScanGrid::new(raster, params, mapper);
    let middle = params.hole_diameters[params.hole_diameters.len() / 2];
    let mut holes = Vec::new();
    grid.for_each(|x, y, pixel_x, pixel_y| {
        let strength = gradient_at(raster, pixel_x, pixel_y);
        if strength > CONTOUR_THRESHOLD {
            let (mm_x, mm_y) = mapper.to_panel_space(x, y);
            holes.push(Hole {
                x: mm_x,
                y: mm_y,
                diameter: middle,
                shape: params.shape,
                intensity: Some(strength),
            });
        }
    });
    holes
}

/// Pixel mode: coarse cells with a binary smallest-or-largest diameter.
fn sample_pixelated(raster: &RasterBuffer, params: &SampleParams, mapper: &PixelToMm) -> Vec<Hole> {
    let grid = ScanGrid::new(raster, params, mapper).widen_to_cells();
    let smallest = params
        .hole_diameters
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let largest = params
        .hole_diameters
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let mut holes = Vec::new();
    grid.for_each(|x, y, pixel_x, pixel_y| {
        let intensity = 1.0 - luminance_at(raster, pixel_x, pixel_y);
        if intensity > PIXEL_THRESHOLD {
            let diameter = if intensity > PIXEL_SPLIT {
                largest
            } else {
                smallest
            };
            let (mm_x, mm_y) = mapper.to_panel_space(x, y);
            holes.push(Hole {
                x: mm_x,
                y: mm_y,
                diameter,
                shape: params.shape,
                intensity: Some(intensity),
            });
        }
    });
    holes
}

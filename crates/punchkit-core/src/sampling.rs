//! Sampling parameters shared between the raster sampler, the pattern
//! controller, and the settings layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_HOLE_DIAMETER_MM;
use crate::error::ConfigError;
use crate::model::HoleShape;

/// Image-to-hole conversion algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SampleMode {
    /// Luminance bucketing: darker areas get larger diameters.
    #[default]
    Density,
    /// Gradient edge detection: holes trace luminance boundaries.
    Contour,
    /// Coarse binary thresholding on a widened grid.
    Pixel,
}

impl fmt::Display for SampleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Density => write!(f, "density"),
            Self::Contour => write!(f, "contour"),
            Self::Pixel => write!(f, "pixel"),
        }
    }
}

impl FromStr for SampleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "density" => Ok(Self::Density),
            "contour" => Ok(Self::Contour),
            "pixel" | "pixelated" => Ok(Self::Pixel),
            _ => Err(format!("Unknown sample mode: {}", s)),
        }
    }
}

/// Parameters for one image sampling pass.
///
/// The diameter set is kept sorted ascending; density mode buckets
/// intensity across it, contour mode picks its middle element, and pixel
/// mode uses only the extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleParams {
    /// Conversion algorithm.
    pub mode: SampleMode,
    /// Candidate punch diameters in mm, sorted ascending, never empty
    /// for a valid configuration.
    pub hole_diameters: Vec<f64>,
    /// Grid pitch between sample points in mm.
    pub hole_spacing_mm: f64,
    /// Edge exclusion band in mm. Candidates inside the band are skipped
    /// at generation time.
    pub edge_margin_mm: f64,
    /// Brightness adjustment percentage; 100 leaves the image unchanged.
    pub brightness_pct: f64,
    /// Contrast adjustment percentage; 100 leaves the image unchanged.
    pub contrast_pct: f64,
    /// Rotation about the image center in degrees.
    pub rotation_deg: f64,
    /// Panel X extent in mm; sets the pixel-to-mm X scale together with
    /// the image width.
    pub panel_length_mm: f64,
    /// Panel Y extent in mm; sets the pixel-to-mm Y scale together with
    /// the image height.
    pub panel_height_mm: f64,
    /// Shape stamped on every emitted hole.
    #[serde(default)]
    pub shape: HoleShape,
}

impl Default for SampleParams {
    fn default() -> Self {
        Self {
            mode: SampleMode::Density,
            hole_diameters: vec![3.0, 5.0, 8.0],
            hole_spacing_mm: 5.0,
            edge_margin_mm: 0.0,
            brightness_pct: 100.0,
            contrast_pct: 100.0,
            rotation_deg: 0.0,
            panel_length_mm: 1000.0,
            panel_height_mm: 600.0,
            shape: HoleShape::Circle,
        }
    }
}

impl SampleParams {
    /// Checks the fatal configuration class: an empty diameter set makes
    /// every mode undefined and must refuse the pass.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hole_diameters.is_empty() {
            return Err(ConfigError::EmptyDiameters);
        }
        Ok(())
    }

    /// Adds a diameter to the set, keeping it sorted ascending.
    ///
    /// Rejects non-positive values, values above the 50mm ceiling, and
    /// duplicates.
    pub fn add_diameter(&mut self, diameter: f64) -> Result<(), ConfigError> {
        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(ConfigError::InvalidDiameter {
                diameter,
                reason: "must be positive".to_string(),
            });
        }
        if diameter > MAX_HOLE_DIAMETER_MM {
            return Err(ConfigError::InvalidDiameter {
                diameter,
                reason: format!("exceeds {}mm", MAX_HOLE_DIAMETER_MM),
            });
        }
        if self.hole_diameters.contains(&diameter) {
            return Err(ConfigError::InvalidDiameter {
                diameter,
                reason: "already configured".to_string(),
            });
        }
        self.hole_diameters.push(diameter);
        self.hole_diameters
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        Ok(())
    }

    /// Removes a diameter from the set if present.
    pub fn remove_diameter(&mut self, diameter: f64) {
        self.hole_diameters.retain(|d| *d != diameter);
    }

    /// Pixel-to-mm scale on X for an image of the given natural width.
    pub fn scale_x(&self, image_width_px: u32) -> f64 {
        if image_width_px == 0 {
            0.0
        } else {
            self.panel_length_mm / image_width_px as f64
        }
    }

    /// Pixel-to-mm scale on Y for an image of the given natural height.
    pub fn scale_y(&self, image_height_px: u32) -> f64 {
        if image_height_px == 0 {
            0.0
        } else {
            self.panel_height_mm / image_height_px as f64
        }
    }
}

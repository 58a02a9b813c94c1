//! Application settings for the punch pattern pipeline.
//!
//! Settings are organized into logical sections mirroring the parameter
//! panels:
//! - Panel defaults (dimensions, thickness)
//! - Sampling defaults (mode, diameter set, spacing, edge margin)
//! - Toolpath rates (feed, plunge, heights)
//! - Grid division defaults
//! - Canvas preferences (colors, lock state)
//!
//! Files persist as TOML or JSON selected by extension. Loading clamps
//! out-of-range values back to their defaults instead of rejecting the
//! file, so a hand-edited config never locks the application out.

use std::path::Path;

use punchkit_core::constants::MAX_HOLE_DIAMETER_MM;
use punchkit_core::model::{GridDivisionConfig, HoleShape, Panel};
use punchkit_core::sampling::{SampleMode, SampleParams};
use punchkit_export::ToolpathSettings;
use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Default panel dimensions for new projects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelDefaults {
    /// Panel length (X) in mm.
    pub length_mm: f64,
    /// Panel height (Y) in mm.
    pub height_mm: f64,
    /// Material thickness in mm.
    pub thickness_mm: f64,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            length_mm: 1000.0,
            height_mm: 600.0,
            thickness_mm: 3.0,
        }
    }
}

impl PanelDefaults {
    /// The panel these defaults describe.
    pub fn to_panel(&self) -> Panel {
        Panel::new(self.length_mm, self.height_mm, self.thickness_mm)
    }
}

/// Default image sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingDefaults {
    /// Conversion algorithm.
    #[serde(default)]
    pub mode: SampleMode,
    /// Candidate punch diameters in mm.
    pub hole_diameters: Vec<f64>,
    /// Grid pitch between sample points in mm.
    pub hole_spacing_mm: f64,
    /// Edge exclusion band in mm.
    pub edge_margin_mm: f64,
    /// Shape stamped on generated holes.
    #[serde(default)]
    pub shape: HoleShape,
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            mode: SampleMode::Density,
            hole_diameters: vec![3.0, 5.0, 8.0],
            hole_spacing_mm: 5.0,
            edge_margin_mm: 0.0,
            shape: HoleShape::Circle,
        }
    }
}

impl SamplingDefaults {
    /// Expands this section into full sampling parameters for the given
    /// panel, with image adjustments at their neutral values.
    pub fn to_params(&self, panel: &PanelDefaults) -> SampleParams {
        SampleParams {
            mode: self.mode,
            hole_diameters: self.hole_diameters.clone(),
            hole_spacing_mm: self.hole_spacing_mm,
            edge_margin_mm: self.edge_margin_mm,
            shape: self.shape,
            panel_length_mm: panel.length_mm,
            panel_height_mm: panel.height_mm,
            ..Default::default()
        }
    }
}

/// Preview canvas preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasPrefs {
    /// Panel fill color as a hex string.
    pub panel_color: String,
    /// Hole fill color as a hex string.
    pub hole_color: String,
    /// Whether pan/zoom interaction starts locked.
    #[serde(default)]
    pub locked: bool,
}

impl Default for CanvasPrefs {
    fn default() -> Self {
        Self {
            panel_color: "#f3f4f6".to_string(),
            hole_color: "#374151".to_string(),
            locked: false,
        }
    }
}

/// Complete persisted application settings.
///
/// Every section carries `#[serde(default)]` so configs written by older
/// versions keep loading as sections are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Panel defaults for new projects.
    #[serde(default)]
    pub panel: PanelDefaults,
    /// Sampling defaults.
    #[serde(default)]
    pub sampling: SamplingDefaults,
    /// Toolpath rates and heights for G-code export.
    #[serde(default)]
    pub toolpath: ToolpathSettings,
    /// Grid division defaults.
    #[serde(default)]
    pub grid: GridDivisionConfig,
    /// Canvas preferences.
    #[serde(default)]
    pub canvas: CanvasPrefs,
}

impl Settings {
    /// Creates settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from file (JSON or TOML by extension).
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let mut settings: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            ));
        };

        settings.clamp();
        Ok(settings)
    }

    /// Saves settings to file (JSON or TOML by extension).
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            ));
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamps out-of-range values back to their defaults.
    ///
    /// Runs on every load. Invalid values never fail a load; they are
    /// replaced section by section while valid neighbors are kept.
    pub fn clamp(&mut self) {
        let panel = PanelDefaults::default();
        if self.panel.length_mm <= 0.0 {
            self.panel.length_mm = panel.length_mm;
        }
        if self.panel.height_mm <= 0.0 {
            self.panel.height_mm = panel.height_mm;
        }
        if self.panel.thickness_mm <= 0.0 {
            self.panel.thickness_mm = panel.thickness_mm;
        }

        let sampling = SamplingDefaults::default();
        self.sampling
            .hole_diameters
            .retain(|d| d.is_finite() && *d > 0.0 && *d <= MAX_HOLE_DIAMETER_MM);
        if self.sampling.hole_diameters.is_empty() {
            self.sampling.hole_diameters = sampling.hole_diameters;
        }
        self.sampling
            .hole_diameters
            .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        if self.sampling.hole_spacing_mm <= 0.0 {
            self.sampling.hole_spacing_mm = sampling.hole_spacing_mm;
        }
        if self.sampling.edge_margin_mm < 0.0 {
            self.sampling.edge_margin_mm = 0.0;
        }

        let toolpath = ToolpathSettings::default();
        if self.toolpath.feed_rate <= 0.0 {
            self.toolpath.feed_rate = toolpath.feed_rate;
        }
        if self.toolpath.plunge_rate <= 0.0 {
            self.toolpath.plunge_rate = toolpath.plunge_rate;
        }
        if self.toolpath.spindle_speed <= 0.0 {
            self.toolpath.spindle_speed = toolpath.spindle_speed;
        }
        if self.toolpath.safe_height_mm <= 0.0 {
            self.toolpath.safe_height_mm = toolpath.safe_height_mm;
        }
        if self.toolpath.park_height_mm <= 0.0 {
            self.toolpath.park_height_mm = toolpath.park_height_mm;
        }

        self.grid.horizontal_count = self.grid.horizontal_count.max(1);
        self.grid.vertical_count = self.grid.vertical_count.max(1);

        let canvas = CanvasPrefs::default();
        if self.canvas.panel_color.is_empty() {
            self.canvas.panel_color = canvas.panel_color;
        }
        if self.canvas.hole_color.is_empty() {
            self.canvas.hole_color = canvas.hole_color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections() {
        let settings = Settings::default();
        assert_eq!(settings.panel.length_mm, 1000.0);
        assert_eq!(settings.panel.height_mm, 600.0);
        assert_eq!(settings.panel.thickness_mm, 3.0);
        assert_eq!(settings.sampling.hole_diameters, vec![3.0, 5.0, 8.0]);
        assert_eq!(settings.sampling.hole_spacing_mm, 5.0);
        assert!(!settings.grid.enabled);
        assert_eq!(settings.canvas.panel_color, "#f3f4f6");
    }

    #[test]
    fn test_clamp_restores_bad_panel_dimensions() {
        let mut settings = Settings::default();
        settings.panel.length_mm = -100.0;
        settings.panel.thickness_mm = 0.0;
        settings.panel.height_mm = 450.0;

        settings.clamp();

        assert_eq!(settings.panel.length_mm, 1000.0);
        assert_eq!(settings.panel.thickness_mm, 3.0);
        assert_eq!(settings.panel.height_mm, 450.0);
    }

    #[test]
    fn test_clamp_filters_and_sorts_diameters() {
        let mut settings = Settings::default();
        settings.sampling.hole_diameters = vec![8.0, -1.0, 3.0, 99.0, 5.0];

        settings.clamp();

        assert_eq!(settings.sampling.hole_diameters, vec![3.0, 5.0, 8.0]);
    }

    #[test]
    fn test_clamp_restores_empty_diameter_set() {
        let mut settings = Settings::default();
        settings.sampling.hole_diameters = vec![-2.0, 60.0];

        settings.clamp();

        assert_eq!(settings.sampling.hole_diameters, vec![3.0, 5.0, 8.0]);
    }

    #[test]
    fn test_clamp_restores_toolpath_rates() {
        let mut settings = Settings::default();
        settings.toolpath.feed_rate = 0.0;
        settings.toolpath.plunge_rate = -5.0;
        settings.toolpath.safe_height_mm = 7.5;

        settings.clamp();

        assert_eq!(settings.toolpath.feed_rate, 1000.0);
        assert_eq!(settings.toolpath.plunge_rate, 300.0);
        assert_eq!(settings.toolpath.safe_height_mm, 7.5);
    }

    #[test]
    fn test_sampling_to_params_takes_panel_extents() {
        let settings = Settings::default();
        let params = settings.sampling.to_params(&settings.panel);

        assert_eq!(params.panel_length_mm, 1000.0);
        assert_eq!(params.panel_height_mm, 600.0);
        assert_eq!(params.hole_diameters, vec![3.0, 5.0, 8.0]);
        assert_eq!(params.brightness_pct, 100.0);
        assert_eq!(params.rotation_deg, 0.0);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let settings = Settings::default();
        let err = settings
            .save_to_file(Path::new("/tmp/settings.yaml"))
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnsupportedFormat(_)));
    }
}

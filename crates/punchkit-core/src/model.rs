//! Data model for the punch-hole pattern pipeline.
//!
//! All geometry is in f64 millimeters. The internal coordinate system has
//! its origin at the top-left of the panel with +Y pointing down; the
//! exporters flip Y to the bottom-left CAD convention exactly once at the
//! output boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_EXPORT_MARGIN_MM, DEFAULT_GRID_TOLERANCE_MM, DEFAULT_HORIZONTAL_SPACING_MM,
    DEFAULT_VERTICAL_SPACING_MM,
};
use crate::error::ConfigError;

/// A 2D point in panel space (millimeters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// The physical sheet being perforated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// X extent in mm.
    pub length_mm: f64,
    /// Y extent in mm.
    pub height_mm: f64,
    /// Material thickness in mm, used for toolpath plunge depth.
    pub thickness_mm: f64,
}

impl Panel {
    /// Creates a new panel.
    pub fn new(length_mm: f64, height_mm: f64, thickness_mm: f64) -> Self {
        Self {
            length_mm,
            height_mm,
            thickness_mm,
        }
    }

    /// Panel face area in mm².
    pub fn area_mm2(&self) -> f64 {
        self.length_mm * self.height_mm
    }

    /// True when either extent is not positive. A degenerate panel yields
    /// empty holes and grid lines rather than errors.
    pub fn is_degenerate(&self) -> bool {
        self.length_mm <= 0.0 || self.height_mm <= 0.0
    }

    /// Checks the panel against an externally supplied maximum size.
    pub fn check_limits(&self, limits: &PanelLimits) -> Result<(), ConfigError> {
        if self.length_mm > limits.max_length_mm || self.height_mm > limits.max_height_mm {
            return Err(ConfigError::PanelTooLarge {
                length: self.length_mm,
                height: self.height_mm,
                max_length: limits.max_length_mm,
                max_height: limits.max_height_mm,
            });
        }
        Ok(())
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            length_mm: 1000.0,
            height_mm: 600.0,
            thickness_mm: 3.0,
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}mm x {}mm x {}mm",
            self.length_mm, self.height_mm, self.thickness_mm
        )
    }
}

/// Externally supplied maximum panel size.
///
/// The pipeline rejects oversize panels against this limit but never
/// computes the limit itself; what a caller may build is a plan-tier
/// decision made outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelLimits {
    /// Maximum panel length in mm.
    pub max_length_mm: f64,
    /// Maximum panel height in mm.
    pub max_height_mm: f64,
}

impl PanelLimits {
    /// Creates a limit set.
    pub fn new(max_length_mm: f64, max_height_mm: f64) -> Self {
        Self {
            max_length_mm,
            max_height_mm,
        }
    }

    /// A limit set that allows any panel size.
    pub fn unrestricted() -> Self {
        Self {
            max_length_mm: f64::INFINITY,
            max_height_mm: f64::INFINITY,
        }
    }

    /// True when the panel fits within these limits.
    pub fn allows(&self, panel: &Panel) -> bool {
        panel.length_mm <= self.max_length_mm && panel.height_mm <= self.max_height_mm
    }
}

impl Default for PanelLimits {
    fn default() -> Self {
        Self::unrestricted()
    }
}

/// Shape stamped on every perforation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HoleShape {
    /// Round punch, the common case
    #[default]
    Circle,
    /// Axis-aligned square, side equal to the diameter
    Square,
    /// Regular hexagon inscribed in the diameter
    Hexagon,
    /// Equilateral triangle inscribed in the diameter
    Triangle,
}

impl fmt::Display for HoleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle => write!(f, "circle"),
            Self::Square => write!(f, "square"),
            Self::Hexagon => write!(f, "hexagon"),
            Self::Triangle => write!(f, "triangle"),
        }
    }
}

impl FromStr for HoleShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "square" => Ok(Self::Square),
            "hexagon" => Ok(Self::Hexagon),
            "triangle" => Ok(Self::Triangle),
            _ => Err(format!("Unknown hole shape: {}", s)),
        }
    }
}

/// A single perforation.
///
/// Holes are created in bulk by a sampling or generation pass, replaced
/// wholesale on every parameter change, and filtered (never mutated) by
/// the grid-division collision check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    /// X position in mm, panel-local, top-left origin.
    pub x: f64,
    /// Y position in mm, panel-local, top-left origin.
    pub y: f64,
    /// Punch diameter in mm.
    pub diameter: f64,
    /// Shape of the punched opening.
    #[serde(default)]
    pub shape: HoleShape,
    /// Sampling weight in [0, 1]. Drives diameter selection during
    /// generation and is not carried into any export format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
}

impl Hole {
    /// Creates a circular hole with no sampling weight.
    pub fn new(x: f64, y: f64, diameter: f64) -> Self {
        Self {
            x,
            y,
            diameter,
            shape: HoleShape::Circle,
            intensity: None,
        }
    }

    /// Replaces the shape, keeping everything else.
    pub fn with_shape(mut self, shape: HoleShape) -> Self {
        self.shape = shape;
        self
    }

    /// Punch radius in mm.
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Center as a point.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Direction of a grid-division cut line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridOrientation {
    /// Runs the full panel height; position is an X offset.
    Vertical,
    /// Runs the full panel length; position is a Y offset.
    Horizontal,
}

impl fmt::Display for GridOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertical => write!(f, "vertical"),
            Self::Horizontal => write!(f, "horizontal"),
        }
    }
}

/// A derived cut line splitting the panel into regions.
///
/// Grid lines are pure derivations of the division config and the panel
/// dimensions; they are recomputed on every change and never persisted
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    /// Offset in mm along the axis perpendicular to the line.
    pub position: f64,
    /// Which way the line runs.
    pub orientation: GridOrientation,
}

impl GridLine {
    /// Creates a vertical cut line at the given X offset.
    pub fn vertical(position: f64) -> Self {
        Self {
            position,
            orientation: GridOrientation::Vertical,
        }
    }

    /// Creates a horizontal cut line at the given Y offset.
    pub fn horizontal(position: f64) -> Self {
        Self {
            position,
            orientation: GridOrientation::Horizontal,
        }
    }
}

/// User intent for splitting the panel into regions.
///
/// Explicit spacing lists always take precedence over equal division; the
/// two are never combined. With `enabled` false no lines are derived no
/// matter what the counts and spacings say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDivisionConfig {
    /// Number of bands across the panel height (>= 1); horizontal cut
    /// lines derived is one fewer.
    pub horizontal_count: u32,
    /// Number of columns across the panel length (>= 1); vertical cut
    /// lines derived is one fewer.
    pub vertical_count: u32,
    /// Master switch for grid division.
    pub enabled: bool,
    /// Legacy uniform spacing in mm. Retained only as a fallback source
    /// for the hole-collision tolerance.
    pub spacing: f64,
    /// Explicit Y offsets for horizontal cut lines, in mm.
    pub horizontal_spacings: Vec<f64>,
    /// Explicit X offsets for vertical cut lines, in mm.
    pub vertical_spacings: Vec<f64>,
}

impl Default for GridDivisionConfig {
    fn default() -> Self {
        Self {
            horizontal_count: 2,
            vertical_count: 2,
            enabled: false,
            spacing: 0.0,
            horizontal_spacings: vec![DEFAULT_HORIZONTAL_SPACING_MM],
            vertical_spacings: vec![DEFAULT_VERTICAL_SPACING_MM],
        }
    }
}

impl GridDivisionConfig {
    /// Sets the horizontal region count, resizing the explicit spacing
    /// list to `count - 1` entries. New slots get the default spacing.
    pub fn set_horizontal_count(&mut self, count: u32) {
        let count = count.max(1);
        self.horizontal_count = count;
        self.horizontal_spacings
            .resize((count - 1) as usize, DEFAULT_HORIZONTAL_SPACING_MM);
    }

    /// Sets the vertical region count, resizing the explicit spacing list
    /// to `count - 1` entries. New slots get the default spacing.
    pub fn set_vertical_count(&mut self, count: u32) {
        let count = count.max(1);
        self.vertical_count = count;
        self.vertical_spacings
            .resize((count - 1) as usize, DEFAULT_VERTICAL_SPACING_MM);
    }
}

/// The named margin parameters used across generation and export.
///
/// Three distinct knobs that earlier revisions conflated:
/// - `edge_exclusion_mm` suppresses hole candidates near the panel rim at
///   generation time.
/// - `export_offset_mm` keeps grid cut lines off the rim at export time.
/// - the grid-collision tolerance is derived on demand by
///   [`MarginSet::grid_tolerance_mm`] and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginSet {
    /// Exclusion band along every panel edge, in mm. Candidates inside
    /// the band are skipped during generation, not filtered afterwards.
    pub edge_exclusion_mm: f64,
    /// Export-side margin in mm. Grid lines closer than this to the rim
    /// are dropped from exported output.
    pub export_offset_mm: f64,
}

impl MarginSet {
    /// Creates a margin set with the given edge exclusion and the fixed
    /// default export offset.
    pub fn with_edge_exclusion(edge_exclusion_mm: f64) -> Self {
        Self {
            edge_exclusion_mm,
            export_offset_mm: DEFAULT_EXPORT_MARGIN_MM,
        }
    }

    /// Half-width in mm of the exclusion band around each grid line.
    ///
    /// Falls back from the edge exclusion to the grid config's legacy
    /// spacing to a 5mm default.
    pub fn grid_tolerance_mm(&self, grid: &GridDivisionConfig) -> f64 {
        if self.edge_exclusion_mm > 0.0 {
            self.edge_exclusion_mm
        } else if grid.spacing > 0.0 {
            grid.spacing
        } else {
            DEFAULT_GRID_TOLERANCE_MM
        }
    }
}

impl Default for MarginSet {
    fn default() -> Self {
        Self {
            edge_exclusion_mm: 0.0,
            export_offset_mm: DEFAULT_EXPORT_MARGIN_MM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_area_and_degeneracy() {
        let panel = Panel::new(1000.0, 600.0, 3.0);
        assert_eq!(panel.area_mm2(), 600_000.0);
        assert!(!panel.is_degenerate());

        assert!(Panel::new(0.0, 600.0, 3.0).is_degenerate());
        assert!(Panel::new(1000.0, 0.0, 3.0).is_degenerate());
        assert!(Panel::new(-5.0, 600.0, 3.0).is_degenerate());
    }

    #[test]
    fn test_panel_limits() {
        let panel = Panel::new(1000.0, 600.0, 3.0);
        assert!(panel.check_limits(&PanelLimits::unrestricted()).is_ok());
        assert!(panel.check_limits(&PanelLimits::new(1000.0, 600.0)).is_ok());

        let err = panel.check_limits(&PanelLimits::new(500.0, 600.0));
        assert!(matches!(err, Err(ConfigError::PanelTooLarge { .. })));
        assert!(!PanelLimits::new(500.0, 600.0).allows(&panel));
    }

    #[test]
    fn test_hole_shape_parsing() {
        assert_eq!("circle".parse::<HoleShape>().unwrap(), HoleShape::Circle);
        assert_eq!("Hexagon".parse::<HoleShape>().unwrap(), HoleShape::Hexagon);
        assert!("star".parse::<HoleShape>().is_err());
        assert_eq!(HoleShape::default(), HoleShape::Circle);
    }

    #[test]
    fn test_hole_serde_shape_names() {
        let hole = Hole::new(10.0, 20.0, 3.0).with_shape(HoleShape::Triangle);
        let json = serde_json::to_string(&hole).unwrap();
        assert!(json.contains("\"triangle\""));
        // Intensity is omitted when unset
        assert!(!json.contains("intensity"));

        let back: Hole = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hole);
    }

    #[test]
    fn test_grid_config_count_resizes_spacings() {
        let mut grid = GridDivisionConfig::default();
        assert_eq!(grid.horizontal_spacings, vec![600.0]);
        assert_eq!(grid.vertical_spacings, vec![1500.0]);

        grid.set_vertical_count(4);
        assert_eq!(grid.vertical_spacings, vec![1500.0, 1500.0, 1500.0]);

        grid.set_vertical_count(2);
        assert_eq!(grid.vertical_spacings, vec![1500.0]);

        // Count is clamped to at least one region
        grid.set_horizontal_count(0);
        assert_eq!(grid.horizontal_count, 1);
        assert!(grid.horizontal_spacings.is_empty());
    }

    #[test]
    fn test_margin_tolerance_fallback_chain() {
        let grid = GridDivisionConfig::default();

        let margins = MarginSet::with_edge_exclusion(12.0);
        assert_eq!(margins.grid_tolerance_mm(&grid), 12.0);

        let margins = MarginSet::default();
        assert_eq!(margins.grid_tolerance_mm(&grid), 5.0);

        let mut spaced = grid.clone();
        spaced.spacing = 8.0;
        assert_eq!(margins.grid_tolerance_mm(&spaced), 8.0);

        // Edge exclusion wins over the grid spacing
        let margins = MarginSet::with_edge_exclusion(12.0);
        assert_eq!(margins.grid_tolerance_mm(&spaced), 12.0);
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }
}

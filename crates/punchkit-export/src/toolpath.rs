//! G-Code punch toolpath output.
//!
//! Produces a drilling-style program: an optional block of grid division
//! cuts followed by one position/plunge/retract cycle per hole. Toolpath
//! space matches the pattern model exactly, top-left origin with Y down;
//! nothing is flipped here, only the DXF writer flips.

use punchkit_core::model::GridOrientation;
use punchkit_pattern::PatternState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Machine rates and clearance heights for toolpath output.
///
/// Values are caller-supplied; nothing here is derived from the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolpathSettings {
    /// Lateral feed rate for cut-through moves (mm/min).
    pub feed_rate: f64,
    /// Vertical plunge feed rate (mm/min).
    pub plunge_rate: f64,
    /// Spindle speed (RPM). Carried for machine setup sheets; punch
    /// programs do not start the spindle themselves.
    pub spindle_speed: f64,
    /// Clearance height between operations (mm).
    pub safe_height_mm: f64,
    /// Parking height at program end (mm).
    pub park_height_mm: f64,
}

impl Default for ToolpathSettings {
    fn default() -> Self {
        Self {
            feed_rate: 1000.0,
            plunge_rate: 300.0,
            spindle_speed: 12000.0,
            safe_height_mm: 5.0,
            park_height_mm: 10.0,
        }
    }
}

/// Generator for punch toolpath G-Code.
#[derive(Debug, Clone, Copy)]
pub struct GcodeGenerator {
    settings: ToolpathSettings,
}

impl GcodeGenerator {
    /// Creates a generator with the given machine settings.
    pub fn new(settings: ToolpathSettings) -> Self {
        Self { settings }
    }

    /// Generates the full program for a pattern snapshot.
    ///
    /// Holes are emitted in input-list order; no path optimization or
    /// reordering is applied.
    pub fn generate(&self, state: &PatternState) -> String {
        let mut gcode = String::new();

        self.push_header(&mut gcode, state);
        if !state.grid_lines.is_empty() {
            self.push_grid_cuts(&mut gcode, state);
            // The hole section marker separates holes from a grid block;
            // without grid cuts the holes follow the header directly.
            gcode.push_str("\n; === PUNCH HOLE OPERATIONS ===\n");
        }
        self.push_holes(&mut gcode, state);
        self.push_footer(&mut gcode);

        debug!(
            "G-Code export: {} holes, {} grid lines",
            state.filtered_holes.len(),
            state.grid_lines.len()
        );
        gcode
    }

    fn push_header(&self, gcode: &mut String, state: &PatternState) {
        let panel = &state.panel;
        gcode.push_str("; Aluminum Panel Punch Hole G-Code\n");
        gcode.push_str(&format!(
            "; Generated by punchkit {}\n",
            env!("CARGO_PKG_VERSION")
        ));
        gcode.push_str(&format!(
            "; Panel: {}mm x {}mm x {}mm\n",
            panel.length_mm, panel.height_mm, panel.thickness_mm
        ));
        gcode.push_str(&format!(
            "; Total Holes: {}\n",
            state.filtered_holes.len()
        ));
        gcode.push_str(
            "; IMPORTANT: All coordinates are in millimeters, Y measured from the panel top (no CAD flip)\n",
        );
    }

    fn push_grid_cuts(&self, gcode: &mut String, state: &PatternState) {
        let s = &self.settings;
        let panel = &state.panel;
        let margin = state.margins.export_offset_mm;

        gcode.push_str("; === GRID DIVISION CUTTING ===\n");
        for (i, line) in state.grid_lines.iter().enumerate() {
            match line.orientation {
                GridOrientation::Vertical => {
                    if line.position > margin && line.position < panel.length_mm - margin {
                        gcode.push_str(&format!(
                            "; Vertical cut {} at X={}mm\n",
                            i + 1,
                            line.position
                        ));
                        gcode.push_str(&format!(
                            "G0 X{:.3} Y0 ; Position at start\n",
                            line.position
                        ));
                        gcode.push_str(&format!(
                            "G1 Z-{:.3} F{} ; Plunge\n",
                            panel.thickness_mm, s.plunge_rate
                        ));
                        gcode.push_str(&format!(
                            "G1 Y{:.3} F{} ; Cut through\n",
                            panel.height_mm, s.feed_rate
                        ));
                        gcode.push_str(&format!(
                            "G1 Z{} F{} ; Retract\n",
                            s.safe_height_mm, s.feed_rate
                        ));
                    }
                }
                GridOrientation::Horizontal => {
                    if line.position > margin && line.position < panel.height_mm - margin {
                        gcode.push_str(&format!(
                            "; Horizontal cut {} at Y={}mm\n",
                            i + 1,
                            line.position
                        ));
                        gcode.push_str(&format!(
                            "G0 X0 Y{:.3} ; Position at start\n",
                            line.position
                        ));
                        gcode.push_str(&format!(
                            "G1 Z-{:.3} F{} ; Plunge\n",
                            panel.thickness_mm, s.plunge_rate
                        ));
                        gcode.push_str(&format!(
                            "G1 X{:.3} F{} ; Cut through\n",
                            panel.length_mm, s.feed_rate
                        ));
                        gcode.push_str(&format!(
                            "G1 Z{} F{} ; Retract\n",
                            s.safe_height_mm, s.feed_rate
                        ));
                    }
                }
            }
        }
    }

    fn push_holes(&self, gcode: &mut String, state: &PatternState) {
        let s = &self.settings;
        let t = state.panel.thickness_mm;
        for (i, hole) in state.filtered_holes.iter().enumerate() {
            gcode.push_str(&format!(
                "; Hole {} - Diameter: {:.2}mm\n",
                i + 1,
                hole.diameter
            ));
            gcode.push_str(&format!(
                "G0 X{:.3} Y{:.3} ; Position over hole\n",
                hole.x, hole.y
            ));
            gcode.push_str(&format!("G1 Z-{:.3} F{} ; Plunge\n", t, s.plunge_rate));
            gcode.push_str(&format!("G1 Z{} F{} ; Retract\n", s.safe_height_mm, s.feed_rate));
        }
    }

    fn push_footer(&self, gcode: &mut String) {
        gcode.push_str(&format!(
            "\nG0 Z{} ; Move to safe height\n",
            self.settings.park_height_mm
        ));
        gcode.push_str("M5 ; Stop spindle\n");
        gcode.push_str("M30 ; Program end");
    }
}

impl Default for GcodeGenerator {
    fn default() -> Self {
        Self::new(ToolpathSettings::default())
    }
}

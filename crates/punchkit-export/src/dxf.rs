//! DXF-style vector output.
//!
//! Emits a minimal group-code entity stream: the panel outline, the grid
//! division cut lines, and one primitive per hole keyed by its shape.
//! The pattern model uses a top-left origin with Y growing downward; CAD
//! space puts the origin bottom-left with Y growing upward, so every
//! emitted Y coordinate is flipped exactly once on the way out.

use punchkit_core::model::{GridOrientation, Hole, HoleShape};
use punchkit_pattern::PatternState;
use tracing::debug;

/// Layer holding the closed panel outline.
const OUTLINE_LAYER: &str = "PANEL_OUTLINE";
/// Layer holding grid division cut lines.
const GRID_LAYER: &str = "GRID_DIVISION";
/// Layer holding the punched hole primitives.
const HOLE_LAYER: &str = "PUNCH_HOLES";

/// Maps a model-space Y offset (top-left origin, Y down) into the CAD
/// convention (bottom-left origin, Y up).
pub fn flip_y(panel_height_mm: f64, y: f64) -> f64 {
    panel_height_mm - y
}

/// Writes the pattern snapshot as a DXF entity stream.
///
/// Grid lines are emitted only when strictly inside the export margin
/// band; the margin check runs on the model-space offset before any flip.
/// Holes come from the grid-filtered list and are not margin-checked.
/// Every coordinate is fixed-point with exactly three decimals, which
/// downstream CAD importers are sensitive to.
pub fn write_dxf(state: &PatternState) -> String {
    let length = state.panel.length_mm;
    let height = state.panel.height_mm;
    let margin = state.margins.export_offset_mm;

    let mut out = String::from("0\nSECTION\n2\nENTITIES\n");

    push_lwpolyline(
        &mut out,
        OUTLINE_LAYER,
        &[(0.0, 0.0), (length, 0.0), (length, height), (0.0, height)],
    );

    let mut emitted_lines = 0usize;
    for line in &state.grid_lines {
        match line.orientation {
            GridOrientation::Vertical => {
                if line.position > margin && line.position < length - margin {
                    let x = line.position;
                    push_line(&mut out, GRID_LAYER, (x, 0.0), (x, height));
                    emitted_lines += 1;
                }
            }
            GridOrientation::Horizontal => {
                if line.position > margin && line.position < height - margin {
                    let y = flip_y(height, line.position);
                    push_line(&mut out, GRID_LAYER, (0.0, y), (length, y));
                    emitted_lines += 1;
                }
            }
        }
    }

    for hole in &state.filtered_holes {
        push_hole(&mut out, hole, flip_y(height, hole.y));
    }

    out.push_str("0\nENDSEC\n0\nEOF");

    debug!(
        "DXF export: {} holes, {} of {} grid lines inside margin",
        state.filtered_holes.len(),
        emitted_lines,
        state.grid_lines.len()
    );
    out
}

/// Emits one hole primitive at the already flipped center.
fn push_hole(out: &mut String, hole: &Hole, y: f64) {
    let r = hole.diameter / 2.0;
    let x = hole.x;
    match hole.shape {
        HoleShape::Circle => push_circle(out, HOLE_LAYER, (x, y), r),
        HoleShape::Square => push_lwpolyline(
            out,
            HOLE_LAYER,
            &[(x - r, y - r), (x + r, y - r), (x + r, y + r), (x - r, y + r)],
        ),
        HoleShape::Hexagon => {
            let mut corners = [(0.0, 0.0); 6];
            for (i, corner) in corners.iter_mut().enumerate() {
                let angle = i as f64 * std::f64::consts::FRAC_PI_3;
                *corner = (x + r * angle.cos(), y + r * angle.sin());
            }
            push_lwpolyline(out, HOLE_LAYER, &corners);
        }
        HoleShape::Triangle => {
            let h = r * 3.0_f64.sqrt();
            push_lwpolyline(
                out,
                HOLE_LAYER,
                &[
                    (x, y - h * 2.0 / 3.0),
                    (x - r, y + h / 3.0),
                    (x + r, y + h / 3.0),
                ],
            );
        }
    }
}

/// Emits a closed lightweight polyline on the given layer.
fn push_lwpolyline(out: &mut String, layer: &str, points: &[(f64, f64)]) {
    out.push_str(&format!(
        "0\nLWPOLYLINE\n8\n{}\n90\n{}\n70\n1\n",
        layer,
        points.len()
    ));
    for &(x, y) in points {
        out.push_str(&format!("10\n{:.3}\n20\n{:.3}\n", x, y));
    }
}

/// Emits a straight line entity on the given layer.
fn push_line(out: &mut String, layer: &str, start: (f64, f64), end: (f64, f64)) {
    out.push_str(&format!(
        "0\nLINE\n8\n{}\n10\n{:.3}\n20\n{:.3}\n30\n0.000\n11\n{:.3}\n21\n{:.3}\n31\n0.000\n",
        layer, start.0, start.1, end.0, end.1
    ));
}

/// Emits a circle entity on the given layer.
fn push_circle(out: &mut String, layer: &str, center: (f64, f64), radius: f64) {
    out.push_str(&format!(
        "0\nCIRCLE\n8\n{}\n10\n{:.3}\n20\n{:.3}\n30\n0.000\n40\n{:.3}\n",
        layer, center.0, center.1, radius
    ));
}

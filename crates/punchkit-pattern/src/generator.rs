//! Programmatic radial fill used before any image is loaded.

use punchkit_core::{Hole, Panel};
use tracing::debug;

/// Radial intensity below which no hole is punched.
const RADIAL_THRESHOLD: f64 = 0.2;

/// Generates the default center-weighted pattern.
///
/// Candidates step by `spacing_mm` over `[spacing, extent - spacing)` on
/// both axes and skip the edge-exclusion band. Each surviving candidate
/// gets a radial intensity `1 - distance_from_center / corner_distance`
/// and punches only above 0.2, with `diameter = 2 + intensity * 4`, so
/// holes grow from 2mm near the rim to 6mm at dead center.
pub fn generate_default_pattern(panel: &Panel, spacing_mm: f64, edge_margin_mm: f64) -> Vec<Hole> {
    if panel.length_mm <= 0.0 || panel.height_mm <= 0.0 || spacing_mm <= 0.0 {
        return Vec::new();
    }

    let center_x = panel.length_mm / 2.0;
    let center_y = panel.height_mm / 2.0;
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();

    let mut holes = Vec::new();
    let mut x = spacing_mm;
    while x < panel.length_mm - spacing_mm {
        let mut y = spacing_mm;
        while y < panel.height_mm - spacing_mm {
            let in_margin = x < edge_margin_mm
                || x > panel.length_mm - edge_margin_mm
                || y < edge_margin_mm
                || y > panel.height_mm - edge_margin_mm;
            if !in_margin {
                let dx = x - center_x;
                let dy = y - center_y;
                let intensity = 1.0 - (dx * dx + dy * dy).sqrt() / max_distance;
                if intensity > RADIAL_THRESHOLD {
                    holes.push(Hole::new(x, y, 2.0 + intensity * 4.0));
                }
            }
            y += spacing_mm;
        }
        x += spacing_mm;
    }

    debug!(
        "Generated default pattern: {} holes at {}mm spacing",
        holes.len(),
        spacing_mm
    );
    holes
}

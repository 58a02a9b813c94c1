//! Grid-division line derivation.
//!
//! Grid lines are a pure function of the panel extents and the division
//! config and are recomputed wholesale on every relevant change, never
//! patched incrementally. The output order is stable: vertical lines
//! first, then horizontal, each in spacing/index order.

use punchkit_core::{GridDivisionConfig, GridLine, Panel};
use tracing::debug;

/// Derives the cut lines for the current panel and division config.
///
/// Explicit spacing lists take precedence over equal division and the two
/// are never combined on one axis. Explicit entries are validated
/// `0 < spacing < panel extent`; entries outside that range are silently
/// dropped rather than reported, since partially edited configs are a
/// normal transient state.
pub fn derive_grid_lines(panel: &Panel, config: &GridDivisionConfig) -> Vec<GridLine> {
    if panel.length_mm <= 0.0 || panel.height_mm <= 0.0 {
        return Vec::new();
    }
    if !config.enabled {
        return Vec::new();
    }

    let mut lines = Vec::new();

    // Vertical lines split the panel along its length.
    if !config.vertical_spacings.is_empty() {
        for &spacing in &config.vertical_spacings {
            if spacing > 0.0 && spacing < panel.length_mm {
                lines.push(GridLine::vertical(spacing));
            }
        }
    } else if config.vertical_count > 1 {
        for k in 1..config.vertical_count {
            let position = panel.length_mm / config.vertical_count as f64 * k as f64;
            lines.push(GridLine::vertical(position));
        }
    }

    // Horizontal lines split the panel along its height.
    if !config.horizontal_spacings.is_empty() {
        for &spacing in &config.horizontal_spacings {
            if spacing > 0.0 && spacing < panel.height_mm {
                lines.push(GridLine::horizontal(spacing));
            }
        }
    } else if config.horizontal_count > 1 {
        for k in 1..config.horizontal_count {
            let position = panel.height_mm / config.horizontal_count as f64 * k as f64;
            lines.push(GridLine::horizontal(position));
        }
    }

    debug!("Derived {} grid lines", lines.len());
    lines
}

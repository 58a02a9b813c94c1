//! Pattern summary statistics.

use serde::{Deserialize, Serialize};

use crate::state::PatternState;

/// Counts and material figures for one pattern snapshot.
///
/// Buckets follow the manufacturing convention used throughout the
/// pipeline: small below 3mm, medium from 3mm up to but not including
/// 5mm, large from 5mm. Figures cover the full generated hole set, not
/// just the grid-filtered survivors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternStatistics {
    /// Total generated holes.
    pub total_holes: usize,
    /// Holes with diameter < 3mm.
    pub small_holes: usize,
    /// Holes with 3mm <= diameter < 5mm.
    pub medium_holes: usize,
    /// Holes with diameter >= 5mm.
    pub large_holes: usize,
    /// Derived cut lines.
    pub grid_line_count: usize,
    /// Remaining material as a percentage of the panel face, rounded to
    /// one decimal place.
    pub material_usage_percent: f64,
}

impl PatternStatistics {
    /// Computes statistics over a pattern snapshot.
    pub fn compute(state: &PatternState) -> Self {
        let holes = &state.holes;
        let small_holes = holes.iter().filter(|h| h.diameter < 3.0).count();
        let medium_holes = holes
            .iter()
            .filter(|h| h.diameter >= 3.0 && h.diameter < 5.0)
            .count();
        let large_holes = holes.iter().filter(|h| h.diameter >= 5.0).count();

        let area = state.panel.area_mm2();
        let material_usage_percent = if area > 0.0 {
            let punched: f64 = holes
                .iter()
                .map(|h| std::f64::consts::PI * h.radius() * h.radius())
                .sum();
            ((area - punched) / area * 1000.0).round() / 10.0
        } else {
            // A panel with no face has nothing to remove.
            100.0
        };

        Self {
            total_holes: holes.len(),
            small_holes,
            medium_holes,
            large_holes,
            grid_line_count: state.grid_lines.len(),
            material_usage_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use punchkit_core::{Hole, MarginSet, Panel};

    fn state_with(holes: Vec<Hole>, panel: Panel) -> PatternState {
        PatternState {
            panel,
            filtered_holes: holes.clone(),
            holes,
            grid_lines: Vec::new(),
            margins: MarginSet::default(),
        }
    }

    #[test]
    fn test_diameter_buckets() {
        let holes = vec![
            Hole::new(10.0, 10.0, 2.0),
            Hole::new(20.0, 10.0, 2.9),
            Hole::new(30.0, 10.0, 3.0),
            Hole::new(40.0, 10.0, 4.9),
            Hole::new(50.0, 10.0, 5.0),
            Hole::new(60.0, 10.0, 8.0),
        ];
        let stats = PatternStatistics::compute(&state_with(holes, Panel::new(100.0, 100.0, 1.0)));

        assert_eq!(stats.total_holes, 6);
        assert_eq!(stats.small_holes, 2);
        assert_eq!(stats.medium_holes, 2);
        assert_eq!(stats.large_holes, 2);
    }

    #[test]
    fn test_material_usage_rounding() {
        // One 10mm hole in a 100x100 panel: pi * 25 / 10000 = 0.785%
        // punched, 99.215% remaining, rounded to 99.2.
        let holes = vec![Hole::new(50.0, 50.0, 10.0)];
        let stats = PatternStatistics::compute(&state_with(holes, Panel::new(100.0, 100.0, 1.0)));
        assert_eq!(stats.material_usage_percent, 99.2);
    }

    #[test]
    fn test_empty_pattern_is_all_material() {
        let stats = PatternStatistics::compute(&state_with(
            Vec::new(),
            Panel::new(100.0, 100.0, 1.0),
        ));
        assert_eq!(stats.total_holes, 0);
        assert_eq!(stats.material_usage_percent, 100.0);
    }

    #[test]
    fn test_degenerate_panel_reports_full_material() {
        let stats = PatternStatistics::compute(&state_with(
            vec![Hole::new(0.0, 0.0, 3.0)],
            Panel::new(0.0, 0.0, 0.0),
        ));
        assert_eq!(stats.material_usage_percent, 100.0);
    }
}

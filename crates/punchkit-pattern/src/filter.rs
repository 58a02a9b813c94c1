//! Grid-collision hole filtering.

use punchkit_core::{GridLine, GridOrientation, Hole};

/// Drops every hole that collides with a grid line.
///
/// A hole collides when its coordinate on the line's perpendicular axis is
/// strictly within `tolerance` mm of the line position, so each line
/// carries an exclusion band of width `2 * tolerance`. With no lines the
/// input is returned unchanged. Holes are never mutated, only dropped.
pub fn filter_holes(holes: &[Hole], grid_lines: &[GridLine], tolerance: f64) -> Vec<Hole> {
    if grid_lines.is_empty() {
        return holes.to_vec();
    }

    holes
        .iter()
        .filter(|hole| !collides(hole, grid_lines, tolerance))
        .copied()
        .collect()
}

fn collides(hole: &Hole, grid_lines: &[GridLine], tolerance: f64) -> bool {
    grid_lines.iter().any(|line| {
        let coord = match line.orientation {
            GridOrientation::Vertical => hole.x,
            GridOrientation::Horizontal => hole.y,
        };
        (coord - line.position).abs() < tolerance
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_lines_keeps_everything() {
        let holes = vec![Hole::new(10.0, 10.0, 3.0), Hole::new(500.0, 300.0, 5.0)];
        let filtered = filter_holes(&holes, &[], 5.0);
        assert_eq!(filtered, holes);
    }

    #[test]
    fn test_vertical_line_excludes_on_x() {
        let holes = vec![
            Hole::new(94.0, 50.0, 3.0),
            Hole::new(98.0, 50.0, 3.0),
            Hole::new(100.0, 50.0, 3.0),
            Hole::new(106.0, 50.0, 3.0),
        ];
        let lines = vec![GridLine::vertical(100.0)];

        let filtered = filter_holes(&holes, &lines, 5.0);

        // 94 and 106 sit outside the 95..105 band.
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].x, 94.0);
        assert_eq!(filtered[1].x, 106.0);
    }

    #[test]
    fn test_horizontal_line_excludes_on_y() {
        let holes = vec![Hole::new(50.0, 198.0, 3.0), Hole::new(50.0, 300.0, 3.0)];
        let lines = vec![GridLine::horizontal(200.0)];

        let filtered = filter_holes(&holes, &lines, 5.0);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].y, 300.0);
    }

    #[test]
    fn test_band_edge_is_exclusive() {
        // Exactly tolerance away survives, just inside does not, just
        // outside does.
        let holes = vec![
            Hole::new(95.0, 50.0, 3.0),
            Hole::new(95.001, 50.0, 3.0),
            Hole::new(94.999, 50.0, 3.0),
        ];
        let lines = vec![GridLine::vertical(100.0)];

        let filtered = filter_holes(&holes, &lines, 5.0);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].x, 95.0);
        assert_eq!(filtered[1].x, 94.999);
    }

    #[test]
    fn test_any_line_suffices() {
        // Clear of the vertical line but caught by the horizontal one.
        let holes = vec![Hole::new(50.0, 101.0, 3.0)];
        let lines = vec![GridLine::vertical(300.0), GridLine::horizontal(100.0)];

        let filtered = filter_holes(&holes, &lines, 5.0);
        assert!(filtered.is_empty());
    }
}

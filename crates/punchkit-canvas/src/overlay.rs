//! Grid-division overlay layout and the pattern draw driver.
//!
//! [`GridOverlay::layout`] turns the derived cut lines into panel-local
//! segments and labels; [`render_pattern`] walks a snapshot in paint
//! order and hands each primitive to a [`PatternRenderer`], keeping the
//! drawing backend out of this crate.

use punchkit_core::model::{GridOrientation, Hole, Point};
use punchkit_pattern::PatternState;

use crate::viewport::Viewport;

/// Vertical label offset above the panel's top edge, in world units.
const VERTICAL_LABEL_OFFSET: f64 = 5.0;
/// Horizontal label offset left of the panel's left edge, in world units.
const HORIZONTAL_LABEL_OFFSET: f64 = 15.0;

/// One grid cut line as a drawable segment in panel-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySegment {
    pub start: Point,
    pub end: Point,
}

/// A cut-line annotation anchored next to its segment.
///
/// Horizontal cut labels sit left of the panel and are marked `rotated`
/// so a backend can draw them turned 90 degrees along the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

/// The grid-division overlay for one pattern snapshot.
#[derive(Debug, Clone, Default)]
pub struct GridOverlay {
    pub segments: Vec<OverlaySegment>,
    pub labels: Vec<OverlayLabel>,
}

impl GridOverlay {
    /// Lays out segments and labels for every cut line crossing the panel.
    ///
    /// Lines on or outside the panel boundary are skipped. Numbering is
    /// per orientation and 1-based (V1, V2, ... and H1, H2, ...), counted
    /// over the visible lines only, so labels match what is on screen.
    pub fn layout(state: &PatternState) -> Self {
        let length = state.panel.length_mm;
        let height = state.panel.height_mm;

        let mut overlay = GridOverlay::default();
        let mut vertical_no = 0u32;
        let mut horizontal_no = 0u32;

        for line in &state.grid_lines {
            match line.orientation {
                GridOrientation::Vertical => {
                    if line.position <= 0.0 || line.position >= length {
                        continue;
                    }
                    vertical_no += 1;
                    overlay.segments.push(OverlaySegment {
                        start: Point::new(line.position, 0.0),
                        end: Point::new(line.position, height),
                    });
                    overlay.labels.push(OverlayLabel {
                        text: format!("V{} ({:.0}mm)", vertical_no, line.position),
                        x: line.position,
                        y: -VERTICAL_LABEL_OFFSET,
                        rotated: false,
                    });
                }
                GridOrientation::Horizontal => {
                    if line.position <= 0.0 || line.position >= height {
                        continue;
                    }
                    horizontal_no += 1;
                    overlay.segments.push(OverlaySegment {
                        start: Point::new(0.0, line.position),
                        end: Point::new(length, line.position),
                    });
                    overlay.labels.push(OverlayLabel {
                        text: format!("H{} ({:.0}mm)", horizontal_no, line.position),
                        x: -HORIZONTAL_LABEL_OFFSET,
                        y: line.position,
                        rotated: true,
                    });
                }
            }
        }

        overlay
    }
}

/// Drawing backend for [`render_pattern`].
///
/// Implementations receive world coordinates (millimeters, panel offset
/// already applied) and are expected to run them through
/// [`Viewport::world_to_screen`] or an equivalent device transform.
pub trait PatternRenderer {
    /// Draws the panel outline with its top-left corner at `origin`.
    fn draw_panel(&mut self, origin: Point, length_mm: f64, height_mm: f64);

    /// Draws one punch hole centered at `center`.
    fn draw_hole(&mut self, hole: &Hole, center: Point);

    /// Draws one grid cut segment.
    fn draw_grid_segment(&mut self, segment: &OverlaySegment);

    /// Draws one cut-line label.
    fn draw_label(&mut self, label: &OverlayLabel);
}

/// Draws a pattern snapshot through `renderer`.
///
/// The panel is centered in the viewport; holes, grid segments and
/// labels are then emitted in that order so annotations paint on top.
/// Only the grid-filtered holes are drawn, matching what manufacturing
/// output receives. Positions stay in unflipped model space (Y down
/// from the panel top).
pub fn render_pattern(
    viewport: &Viewport,
    state: &PatternState,
    renderer: &mut impl PatternRenderer,
) {
    let length = state.panel.length_mm;
    let height = state.panel.height_mm;
    let (origin_x, origin_y) = viewport.panel_origin(length, height);

    renderer.draw_panel(Point::new(origin_x, origin_y), length, height);

    for hole in &state.filtered_holes {
        renderer.draw_hole(hole, Point::new(origin_x + hole.x, origin_y + hole.y));
    }

    let overlay = GridOverlay::layout(state);
    for segment in &overlay.segments {
        renderer.draw_grid_segment(&OverlaySegment {
            start: Point::new(origin_x + segment.start.x, origin_y + segment.start.y),
            end: Point::new(origin_x + segment.end.x, origin_y + segment.end.y),
        });
    }
    for label in &overlay.labels {
        renderer.draw_label(&OverlayLabel {
            text: label.text.clone(),
            x: origin_x + label.x,
            y: origin_y + label.y,
            rotated: label.rotated,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use punchkit_core::model::{GridLine, MarginSet, Panel};

    fn snapshot(panel: Panel, holes: Vec<Hole>, grid_lines: Vec<GridLine>) -> PatternState {
        PatternState {
            panel,
            filtered_holes: holes.clone(),
            holes,
            grid_lines,
            margins: MarginSet::default(),
        }
    }

    #[test]
    fn test_layout_builds_segment_per_visible_line() {
        let state = snapshot(
            Panel::new(500.0, 300.0, 3.0),
            vec![],
            vec![GridLine::vertical(250.0), GridLine::horizontal(150.0)],
        );
        let overlay = GridOverlay::layout(&state);

        assert_eq!(overlay.segments.len(), 2);
        assert_eq!(overlay.segments[0].start, Point::new(250.0, 0.0));
        assert_eq!(overlay.segments[0].end, Point::new(250.0, 300.0));
        assert_eq!(overlay.segments[1].start, Point::new(0.0, 150.0));
        assert_eq!(overlay.segments[1].end, Point::new(500.0, 150.0));
    }

    #[test]
    fn test_layout_numbers_each_orientation_separately() {
        let state = snapshot(
            Panel::new(600.0, 300.0, 3.0),
            vec![],
            vec![
                GridLine::vertical(200.0),
                GridLine::vertical(400.0),
                GridLine::horizontal(150.0),
            ],
        );
        let overlay = GridOverlay::layout(&state);

        let texts: Vec<&str> = overlay.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["V1 (200mm)", "V2 (400mm)", "H1 (150mm)"]);
    }

    #[test]
    fn test_layout_skips_boundary_lines() {
        let state = snapshot(
            Panel::new(500.0, 300.0, 3.0),
            vec![],
            vec![
                GridLine::vertical(0.0),
                GridLine::vertical(500.0),
                GridLine::vertical(250.0),
                GridLine::horizontal(300.0),
            ],
        );
        let overlay = GridOverlay::layout(&state);

        assert_eq!(overlay.segments.len(), 1);
        assert_eq!(overlay.labels[0].text, "V1 (250mm)");
    }

    #[test]
    fn test_label_anchors_sit_outside_the_panel() {
        let state = snapshot(
            Panel::new(500.0, 300.0, 3.0),
            vec![],
            vec![GridLine::vertical(100.0), GridLine::horizontal(200.0)],
        );
        let overlay = GridOverlay::layout(&state);

        let vertical = &overlay.labels[0];
        assert_eq!(vertical.x, 100.0);
        assert_eq!(vertical.y, -5.0);
        assert!(!vertical.rotated);

        let horizontal = &overlay.labels[1];
        assert_eq!(horizontal.x, -15.0);
        assert_eq!(horizontal.y, 200.0);
        assert!(horizontal.rotated);
    }
}

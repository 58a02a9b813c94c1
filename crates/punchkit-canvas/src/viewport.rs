//! Viewport state and coordinate transformation for the preview canvas.
//!
//! Handles conversion between screen coordinates (device pixels) and
//! world coordinates (panel millimeters, 1mm = 1px at 100% zoom).
//! Manages fit-to-panel, cursor-anchored wheel zoom, button zoom and
//! panning with consistent drag feel across zoom levels.

use std::fmt;

use tracing::debug;

/// Share of the canvas the fitted panel may occupy.
const FIT_PADDING: f64 = 0.85;
/// Zoom percentage bounds applied by fit-to-panel.
const FIT_MIN_ZOOM: f64 = 10.0;
const FIT_MAX_ZOOM: f64 = 400.0;
/// Fit updates smaller than this many percentage points are skipped.
const FIT_DEADBAND: f64 = 1.0;
/// Wheel zoom step and bounds, in percentage points.
const WHEEL_STEP: f64 = 15.0;
const WHEEL_MIN_ZOOM: f64 = 5.0;
const WHEEL_MAX_ZOOM: f64 = 500.0;
/// Button zoom step and bounds, in percentage points.
const BUTTON_STEP: f64 = 25.0;
const BUTTON_MIN_ZOOM: f64 = 1.0;
const BUTTON_MAX_ZOOM: f64 = 400.0;

/// Represents the preview transformation state (zoom and pan).
///
/// Zoom is a percentage with 100 as the 1mm = 1px baseline. Pan is held
/// in world units and scaled up at draw time, so the screen position of
/// a world point is `(world + pan) * zoom_fraction`.
#[derive(Debug, Clone)]
pub struct Viewport {
    zoom_pct: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    fitted_panel: Option<(f64, f64)>,
}

impl Viewport {
    /// Creates a new viewport at 100% zoom with no pan.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom_pct: 100.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            fitted_panel: None,
        }
    }

    /// Gets the canvas width in device pixels.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height in device pixels.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called on window resize).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom percentage (100 = 1mm per pixel).
    pub fn zoom_pct(&self) -> f64 {
        self.zoom_pct
    }

    /// Gets the current zoom as a fraction (1.0 at 100%).
    pub fn zoom_fraction(&self) -> f64 {
        self.zoom_pct / 100.0
    }

    /// Gets the pan offset (X, world units).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y, world units).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Converts screen coordinates to world coordinates.
    ///
    /// Formula:
    /// ```text
    /// world = screen / zoom_fraction - pan
    /// ```
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        let z = self.zoom_fraction();
        (screen_x / z - self.pan_x, screen_y / z - self.pan_y)
    }

    /// Converts world coordinates to screen coordinates.
    ///
    /// Formula:
    /// ```text
    /// screen = (world + pan) * zoom_fraction
    /// ```
    pub fn world_to_screen(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        let z = self.zoom_fraction();
        ((world_x + self.pan_x) * z, (world_y + self.pan_y) * z)
    }

    /// Whether an automatic fit is still owed for the given panel size.
    ///
    /// True on first availability and again whenever the panel dimensions
    /// change; [`Viewport::fit_to_panel`] clears the latch.
    pub fn fit_pending(&self, panel_length_mm: f64, panel_height_mm: f64) -> bool {
        self.fitted_panel != Some((panel_length_mm, panel_height_mm))
    }

    /// Fits the panel into the canvas and recenters the view.
    ///
    /// Computes an independent scale per axis at 85% of the canvas size,
    /// takes the smaller so the whole panel fits without stretching, and
    /// clamps the resulting percentage to `[10, 400]`. Pan always resets;
    /// the zoom update is skipped inside a 1-point deadband to avoid
    /// jitter during continuous resizing. Degenerate panels are ignored.
    pub fn fit_to_panel(&mut self, panel_length_mm: f64, panel_height_mm: f64) {
        if panel_length_mm <= 0.0 || panel_height_mm <= 0.0 {
            return;
        }

        self.pan_x = 0.0;
        self.pan_y = 0.0;
        self.fitted_panel = Some((panel_length_mm, panel_height_mm));

        let scale_x = (self.canvas_width * FIT_PADDING) / panel_length_mm;
        let scale_y = (self.canvas_height * FIT_PADDING) / panel_height_mm;
        let optimal = (scale_x.min(scale_y) * 100.0).clamp(FIT_MIN_ZOOM, FIT_MAX_ZOOM);

        if (self.zoom_pct - optimal).abs() > FIT_DEADBAND {
            debug!(
                "Fit to panel: zoom {:.1}% (scale x {:.3}, y {:.3})",
                optimal, scale_x, scale_y
            );
            self.zoom_pct = optimal;
        }
    }

    /// Applies one wheel tick of cursor-anchored zoom.
    ///
    /// A positive `wheel_delta` (scroll down) zooms out. The cursor is
    /// converted to world space before the change, then the pan is
    /// shifted so that point stays put as the zoom ratio is applied:
    /// ```text
    /// pan += cursor_world * (1 - new_zoom / old_zoom)
    /// ```
    /// Clamped to `[5, 500]` percent.
    pub fn zoom_at_cursor(&mut self, mouse_x: f64, mouse_y: f64, wheel_delta: f64) {
        let step = if wheel_delta > 0.0 {
            -WHEEL_STEP
        } else {
            WHEEL_STEP
        };
        let new_zoom = (self.zoom_pct + step).clamp(WHEEL_MIN_ZOOM, WHEEL_MAX_ZOOM);
        let ratio = new_zoom / self.zoom_pct;

        let (cursor_x, cursor_y) = self.screen_to_world(mouse_x, mouse_y);
        self.pan_x += cursor_x * (1.0 - ratio);
        self.pan_y += cursor_y * (1.0 - ratio);
        self.zoom_pct = new_zoom;
    }

    /// Zooms in one button step (+25 points, capped at 400%).
    pub fn zoom_in(&mut self) {
        self.zoom_pct = (self.zoom_pct + BUTTON_STEP).min(BUTTON_MAX_ZOOM);
    }

    /// Zooms out one button step (-25 points, floored at 1%).
    pub fn zoom_out(&mut self) {
        self.zoom_pct = (self.zoom_pct - BUTTON_STEP).max(BUTTON_MIN_ZOOM);
    }

    /// Resets zoom to 100%, leaving the pan in place.
    pub fn reset_zoom(&mut self) {
        self.zoom_pct = 100.0;
    }

    /// Pans by a screen-pixel delta.
    ///
    /// The delta is divided by the zoom fraction so dragging moves the
    /// content by the same number of screen pixels at every zoom level.
    pub fn pan_by(&mut self, screen_dx: f64, screen_dy: f64) {
        let sensitivity = 1.0 / self.zoom_fraction();
        self.pan_x += screen_dx * sensitivity;
        self.pan_y += screen_dy * sensitivity;
    }

    /// Computes the world-space origin that centers a panel of the given
    /// pixel size in the visible region.
    ///
    /// Formula, per axis:
    /// ```text
    /// origin = (canvas / zoom_fraction - panel_px) / 2
    /// ```
    pub fn panel_origin(&self, panel_length_px: f64, panel_height_px: f64) -> (f64, f64) {
        let z = self.zoom_fraction();
        (
            (self.canvas_width / z - panel_length_px) / 2.0,
            (self.canvas_height / z - panel_height_px) / 2.0,
        )
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.0}% | Pan: ({:.1}, {:.1})",
            self.zoom_pct, self.pan_x, self.pan_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_is_unzoomed() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.zoom_pct(), 100.0);
        assert_eq!(vp.pan_x(), 0.0);
        assert_eq!(vp.pan_y(), 0.0);
    }

    #[test]
    fn test_fit_uses_smaller_axis_scale() {
        let mut vp = Viewport::new(800.0, 600.0);
        // 1000mm wide panel: x scale 0.68, y scale 1.02; x wins.
        vp.fit_to_panel(1000.0, 500.0);
        assert!((vp.zoom_pct() - 68.0).abs() < 1e-9);
        assert_eq!(vp.pan_x(), 0.0);
        assert_eq!(vp.pan_y(), 0.0);
    }

    #[test]
    fn test_fit_clamps_zoom_range() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.fit_to_panel(10_000.0, 10_000.0);
        assert_eq!(vp.zoom_pct(), 10.0);

        vp.fit_to_panel(10.0, 10.0);
        assert_eq!(vp.zoom_pct(), 400.0);
    }

    #[test]
    fn test_fit_deadband_skips_tiny_changes() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.fit_to_panel(680.0, 400.0);
        let settled = vp.zoom_pct();
        // A canvas change worth less than one point leaves zoom alone.
        vp.set_canvas_size(802.0, 600.0);
        vp.fit_to_panel(680.0, 400.0);
        assert_eq!(vp.zoom_pct(), settled);
    }

    #[test]
    fn test_fit_pending_latch() {
        let mut vp = Viewport::new(800.0, 600.0);
        assert!(vp.fit_pending(500.0, 300.0));
        vp.fit_to_panel(500.0, 300.0);
        assert!(!vp.fit_pending(500.0, 300.0));
        assert!(vp.fit_pending(600.0, 300.0));
    }

    #[test]
    fn test_fit_ignores_degenerate_panel() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.fit_to_panel(0.0, 300.0);
        assert_eq!(vp.zoom_pct(), 100.0);
        assert!(vp.fit_pending(0.0, 300.0));
    }

    #[test]
    fn test_wheel_zoom_steps_and_clamps() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom_at_cursor(400.0, 300.0, -1.0);
        assert_eq!(vp.zoom_pct(), 115.0);

        for _ in 0..40 {
            vp.zoom_at_cursor(400.0, 300.0, -1.0);
        }
        assert_eq!(vp.zoom_pct(), 500.0);

        for _ in 0..80 {
            vp.zoom_at_cursor(400.0, 300.0, 1.0);
        }
        assert_eq!(vp.zoom_pct(), 5.0);
    }

    #[test]
    fn test_wheel_zoom_shifts_pan_toward_cursor() {
        let mut vp = Viewport::new(800.0, 600.0);
        // Cursor at (400, 300) in world space with zero pan.
        vp.zoom_at_cursor(400.0, 300.0, -1.0);
        // ratio 1.15, pan moves by cursor * (1 - 1.15).
        assert!((vp.pan_x() - 400.0 * -0.15).abs() < 1e-9);
        assert!((vp.pan_y() - 300.0 * -0.15).abs() < 1e-9);
    }

    #[test]
    fn test_button_zoom_clamps_asymmetrically() {
        let mut vp = Viewport::new(800.0, 600.0);
        for _ in 0..20 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom_pct(), 400.0);

        for _ in 0..30 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom_pct(), 1.0);
    }

    #[test]
    fn test_button_zoom_in_recovers_from_wheel_overshoot() {
        let mut vp = Viewport::new(800.0, 600.0);
        for _ in 0..40 {
            vp.zoom_at_cursor(0.0, 0.0, -1.0);
        }
        assert_eq!(vp.zoom_pct(), 500.0);
        // The button cap pulls an over-zoomed wheel view back to 400%.
        vp.zoom_in();
        assert_eq!(vp.zoom_pct(), 400.0);
    }

    #[test]
    fn test_reset_zoom_keeps_pan() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.pan_by(50.0, -20.0);
        vp.zoom_in();
        vp.reset_zoom();
        assert_eq!(vp.zoom_pct(), 100.0);
        assert_eq!(vp.pan_x(), 50.0);
        assert_eq!(vp.pan_y(), -20.0);
    }

    #[test]
    fn test_pan_sensitivity_scales_with_zoom() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom_in(); // 125%
        vp.zoom_in(); // 150%
        vp.pan_by(30.0, 0.0);
        assert!((vp.pan_x() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_panel_origin_centers_at_baseline_zoom() {
        let vp = Viewport::new(800.0, 600.0);
        let (x, y) = vp.panel_origin(500.0, 300.0);
        assert_eq!(x, 150.0);
        assert_eq!(y, 150.0);
    }

    #[test]
    fn test_transform_round_trip() {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.zoom_in();
        vp.pan_by(37.0, -12.0);
        let (wx, wy) = vp.screen_to_world(123.0, 456.0);
        let (sx, sy) = vp.world_to_screen(wx, wy);
        assert!((sx - 123.0).abs() < 1e-9);
        assert!((sy - 456.0).abs() < 1e-9);
    }
}

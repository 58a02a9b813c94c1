//! Shared constants for the pattern pipeline.

/// Fixed export-side margin in mm. Grid cut lines closer than this to the
/// panel rim are not emitted by the exporters.
pub const DEFAULT_EXPORT_MARGIN_MM: f64 = 20.0;

/// Fallback half-width of the cut-line exclusion band in mm, used when
/// neither the edge exclusion nor the grid spacing provides a tolerance.
pub const DEFAULT_GRID_TOLERANCE_MM: f64 = 5.0;

/// Largest punch diameter accepted into a diameter set, in mm.
pub const MAX_HOLE_DIAMETER_MM: f64 = 50.0;

/// Quiet period after the last parameter change before a resampling pass
/// is allowed to run, in milliseconds.
pub const REGEN_DEBOUNCE_MS: u64 = 300;

/// Default explicit spacing filled in for a new horizontal division, in mm.
pub const DEFAULT_HORIZONTAL_SPACING_MM: f64 = 600.0;

/// Default explicit spacing filled in for a new vertical division, in mm.
pub const DEFAULT_VERTICAL_SPACING_MM: f64 = 1500.0;

//! # Punchkit Canvas
//!
//! Viewport transforms and overlay layout for interactive pattern
//! previews. The crate owns the math only; hosts bring their own drawing
//! surface and implement [`PatternRenderer`] to receive primitives in
//! painting order.
//!
//! Preview space is unflipped model space: 1mm = 1px at 100% zoom,
//! origin top-left, Y down. Only the DXF exporter flips.

pub mod overlay;
pub mod viewport;

pub use overlay::{render_pattern, GridOverlay, OverlayLabel, OverlaySegment, PatternRenderer};
pub use viewport::Viewport;

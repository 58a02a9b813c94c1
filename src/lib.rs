//! # Punchkit
//!
//! A Rust toolkit that converts raster images into punch-hole patterns for
//! perforated aluminum composite panels and exports them for manufacturing.
//!
//! ## Architecture
//!
//! Punchkit is organized as a workspace with multiple crates:
//!
//! 1. **punchkit-core** - Shared vocabulary: panels, holes, grid divisions, errors
//! 2. **punchkit-sampler** - Image loading, adjustment, luminance sampling
//! 3. **punchkit-pattern** - Unified pattern model, grid derivation, hole filtering
//! 4. **punchkit-export** - DXF, G-code, JSON report and CSV writers
//! 5. **punchkit-canvas** - Preview viewport transforms and overlay layout
//! 6. **punchkit-settings** - Persisted configuration
//! 7. **punchkit** - Main binary that integrates all crates
//!
//! ## Features
//!
//! - **Three conversion modes**: density bucketing, contour tracing, pixelated
//! - **Unified pattern model**: one snapshot feeds preview and every exporter
//! - **Grid division**: panel cut lines with hole-collision filtering
//! - **Manufacturing output**: CAD-convention DXF, punch-cycle G-code, JSON
//!   production reports, CSV coordinate tables
//! - **Cross-Platform**: Linux, Windows, macOS support

// Re-export the workspace surface for main.rs and downstream users.
pub use punchkit_core::{
    ConfigError, Error, GridDivisionConfig, GridLine, GridOrientation, Hole, HoleShape, MarginSet,
    Panel, PanelLimits, Point, Result, SampleMode, SampleParams,
};

pub use punchkit_sampler::{sample, ImageAdjustments, PixelToMm, RasterBuffer};

pub use punchkit_pattern::{
    derive_grid_lines, filter_holes, generate_default_pattern, PatternController,
    PatternDescription, PatternState, PatternStatistics, RegenScheduler,
};

pub use punchkit_export::{
    export, ExportFormat, ExportGate, ExportOptions, GcodeGenerator, OpenGate, ToolpathSettings,
};

pub use punchkit_canvas::{
    render_pattern, GridOverlay, OverlayLabel, OverlaySegment, PatternRenderer, Viewport,
};

pub use punchkit_settings::{
    CanvasPrefs, PanelDefaults, SamplingDefaults, Settings, SettingsError, SettingsManager,
    SettingsResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}

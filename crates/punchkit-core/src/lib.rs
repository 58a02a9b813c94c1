//! # Punchkit Core
//!
//! Core types for the punch-hole pattern pipeline.
//! Provides the shared vocabulary used by the sampler, the pattern model,
//! the exporters, and the canvas transforms: panels, holes, grid divisions,
//! margin parameters, sampling parameters, and the error taxonomy.

pub mod constants;
pub mod error;
pub mod model;
pub mod sampling;

pub use error::{ConfigError, Error, Result};

pub use model::{
    GridDivisionConfig, GridLine, GridOrientation, Hole, HoleShape, MarginSet, Panel, PanelLimits,
    Point,
};

pub use sampling::{SampleMode, SampleParams};

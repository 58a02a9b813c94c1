//! # Punchkit Pattern
//!
//! The unified pattern model: one mutable aggregate owning the panel, the
//! generated holes, the derived grid-division cut lines, and the holes
//! surviving grid filtering.
//!
//! Mutations are whole-field replacements through [`PatternController`];
//! derived data is recomputed before the write lock drops, so every
//! [`PatternState`] snapshot is internally consistent. Renderers and
//! exporters consume snapshots and never mutate.
//!
//! [`RegenScheduler`] adds the asynchronous edge: parameter churn is
//! debounced, and a sampling pass finishing late against a model that
//! moved on is discarded by generation stamp.

pub mod description;
pub mod filter;
pub mod generator;
pub mod grid;
pub mod regen;
pub mod state;
pub mod stats;

pub use description::PatternDescription;
pub use filter::filter_holes;
pub use generator::generate_default_pattern;
pub use grid::derive_grid_lines;
pub use regen::RegenScheduler;
pub use state::{PatternController, PatternState};
pub use stats::PatternStatistics;

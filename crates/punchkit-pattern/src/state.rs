//! Live pattern model shared between the pipeline stages.
//!
//! The controller is the one mutable aggregate in the system. Every
//! mutation is a whole-field replacement followed by recomputation of the
//! derived fields, so a snapshot taken at any point is internally
//! consistent and safe to hand to a renderer or exporter as read-only
//! data.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use punchkit_core::{
    ConfigError, GridDivisionConfig, GridLine, Hole, MarginSet, Panel, PanelLimits,
};

use crate::filter::filter_holes;
use crate::grid::derive_grid_lines;
use crate::stats::PatternStatistics;

/// Immutable snapshot of the unified pattern model.
///
/// `holes` is the full generated set; `filtered_holes` is what survives
/// the grid-collision check and is what renderers and exporters consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternState {
    /// Panel the pattern belongs to.
    pub panel: Panel,
    /// Every generated hole, before grid filtering.
    pub holes: Vec<Hole>,
    /// Holes surviving the cut-line exclusion bands.
    pub filtered_holes: Vec<Hole>,
    /// Derived cut lines, vertical first.
    pub grid_lines: Vec<GridLine>,
    /// The margin parameter set the snapshot was filtered under.
    pub margins: MarginSet,
}

#[derive(Debug)]
struct PatternInner {
    panel: Panel,
    holes: Vec<Hole>,
    filtered_holes: Vec<Hole>,
    grid_lines: Vec<GridLine>,
    grid_config: GridDivisionConfig,
    margins: MarginSet,
    generation: u64,
}

impl PatternInner {
    fn empty() -> Self {
        Self {
            panel: Panel::new(0.0, 0.0, 0.0),
            holes: Vec::new(),
            filtered_holes: Vec::new(),
            grid_lines: Vec::new(),
            grid_config: GridDivisionConfig::default(),
            margins: MarginSet::default(),
            generation: 0,
        }
    }

    fn regenerate_grid(&mut self) {
        self.grid_lines = derive_grid_lines(&self.panel, &self.grid_config);
    }

    fn refilter(&mut self) {
        let tolerance = self.margins.grid_tolerance_mm(&self.grid_config);
        self.filtered_holes = filter_holes(&self.holes, &self.grid_lines, tolerance);
    }

    fn touch(&mut self) {
        self.generation += 1;
    }
}

/// Thread-safe owner of the live pattern model.
///
/// Setters replace whole fields and recompute the derived grid lines and
/// filtered holes before releasing the write lock, so readers never see a
/// half-updated aggregate. Every successful mutation bumps a generation
/// counter; asynchronous regeneration uses it to discard stale results.
pub struct PatternController {
    inner: RwLock<PatternInner>,
    limits: PanelLimits,
}

impl PatternController {
    /// Creates an empty controller with no panel size restrictions.
    pub fn new() -> Self {
        Self::with_limits(PanelLimits::unrestricted())
    }

    /// Creates an empty controller enforcing the given panel limits.
    pub fn with_limits(limits: PanelLimits) -> Self {
        Self {
            inner: RwLock::new(PatternInner::empty()),
            limits,
        }
    }

    /// Replaces the panel, rederiving grid lines and refiltered holes.
    ///
    /// An oversize panel is rejected and leaves the model untouched.
    pub fn set_panel(&self, panel: Panel) -> Result<(), ConfigError> {
        panel.check_limits(&self.limits)?;
        let mut inner = self.inner.write();
        inner.panel = panel;
        inner.regenerate_grid();
        inner.refilter();
        inner.touch();
        debug!("Panel set to {}", panel);
        Ok(())
    }

    /// Replaces the full hole set and refilters.
    pub fn set_holes(&self, holes: Vec<Hole>) {
        let mut inner = self.inner.write();
        inner.holes = holes;
        inner.refilter();
        inner.touch();
        debug!(
            "Holes replaced: {} total, {} after grid filtering",
            inner.holes.len(),
            inner.filtered_holes.len()
        );
    }

    /// Replaces the grid division config, rederiving lines and refiltering.
    pub fn set_grid_config(&self, config: GridDivisionConfig) {
        let mut inner = self.inner.write();
        inner.grid_config = config;
        inner.regenerate_grid();
        inner.refilter();
        inner.touch();
    }

    /// Replaces the margin set and refilters under the new tolerance.
    pub fn set_margins(&self, margins: MarginSet) {
        let mut inner = self.inner.write();
        inner.margins = margins;
        inner.refilter();
        inner.touch();
    }

    /// Applies a sampled hole set only if the model has not changed since
    /// `stamp` was taken. Returns whether the holes were applied.
    pub fn apply_sampled_holes(&self, stamp: u64, holes: Vec<Hole>) -> bool {
        let mut inner = self.inner.write();
        if inner.generation != stamp {
            return false;
        }
        inner.holes = holes;
        inner.refilter();
        inner.touch();
        true
    }

    /// Current mutation generation.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Current grid division config.
    pub fn grid_config(&self) -> GridDivisionConfig {
        self.inner.read().grid_config.clone()
    }

    /// Current margin set.
    pub fn margins(&self) -> MarginSet {
        self.inner.read().margins
    }

    /// Read-only snapshot of the full aggregate.
    pub fn snapshot(&self) -> PatternState {
        let inner = self.inner.read();
        PatternState {
            panel: inner.panel,
            holes: inner.holes.clone(),
            filtered_holes: inner.filtered_holes.clone(),
            grid_lines: inner.grid_lines.clone(),
            margins: inner.margins,
        }
    }

    /// Statistics over the current snapshot.
    pub fn statistics(&self) -> PatternStatistics {
        PatternStatistics::compute(&self.snapshot())
    }
}

impl Default for PatternController {
    fn default() -> Self {
        Self::new()
    }
}

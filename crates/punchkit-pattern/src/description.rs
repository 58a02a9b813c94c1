//! Persistence and sharing record for a generated pattern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use punchkit_core::{Result, SampleMode, SampleParams};

use crate::state::PatternState;

/// Self-contained record describing one generated pattern.
///
/// Produced on demand for the sharing and persistence collaborators; the
/// core never initiates storage itself. The full sampling parameter set
/// is echoed so a stored record can reproduce its pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDescription {
    /// Unique record id.
    pub id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Panel length in mm.
    pub panel_width: f64,
    /// Panel height in mm.
    pub panel_height: f64,
    /// Largest configured punch diameter in mm.
    pub hole_diameter: f64,
    /// Sample grid pitch in mm.
    pub hole_spacing: f64,
    /// Conversion algorithm the pattern came from.
    pub conversion_mode: SampleMode,
    /// Full sampling parameter echo.
    pub parameters: SampleParams,
    /// Generated holes before grid filtering.
    pub hole_count: usize,
}

impl PatternDescription {
    /// Builds a record for the given snapshot and the parameters that
    /// produced it.
    pub fn new(state: &PatternState, params: &SampleParams) -> Self {
        let hole_diameter = params.hole_diameters.iter().copied().fold(0.0, f64::max);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            panel_width: state.panel.length_mm,
            panel_height: state.panel.height_mm,
            hole_diameter,
            hole_spacing: params.hole_spacing_mm,
            conversion_mode: params.mode,
            parameters: params.clone(),
            hole_count: state.holes.len(),
        }
    }

    /// Serializes the record as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

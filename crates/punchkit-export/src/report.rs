//! Structured JSON manufacturing report.
//!
//! A pretty-printed document with project metadata, headline statistics,
//! the full hole and grid-line tables, and an area summary. Consumers are
//! spreadsheet importers and job-tracking tools, so keys are stable and
//! values are plain numbers.

use std::f64::consts::PI;

use chrono::Utc;
use punchkit_core::error::Result;
use punchkit_core::model::GridOrientation;
use punchkit_pattern::{PatternState, PatternStatistics};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    project: Project,
    statistics: Statistics,
    holes: Vec<HoleRow>,
    grid_lines: Vec<GridLineRow>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Project {
    name: String,
    date: String,
    panel_dimensions: PanelDimensions,
}

#[derive(Debug, Serialize)]
struct PanelDimensions {
    length: f64,
    width: f64,
    thickness: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    total_holes: usize,
    grid_line_count: usize,
    material_usage_percent: f64,
}

#[derive(Debug, Serialize)]
struct HoleRow {
    id: usize,
    x: f64,
    y: f64,
    diameter: f64,
}

#[derive(Debug, Serialize)]
struct GridLineRow {
    id: usize,
    #[serde(rename = "type")]
    kind: GridOrientation,
    position: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    total_area: f64,
    punched_area: f64,
    #[serde(rename = "holeDensityPer100cm2")]
    hole_density_per_100cm2: f64,
}

/// Rounds to two decimals for tabular readability.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Writes the pattern snapshot as a JSON report.
///
/// Material usage reflects every generated hole; the hole table lists the
/// grid-filtered set that reaches fabrication, so the two counts differ
/// whenever division cuts suppress holes.
pub fn write_report(state: &PatternState, project_name: &str) -> Result<String> {
    let stats = PatternStatistics::compute(state);
    let panel = &state.panel;
    let area = panel.area_mm2();

    let holes: Vec<HoleRow> = state
        .filtered_holes
        .iter()
        .enumerate()
        .map(|(i, hole)| HoleRow {
            id: i + 1,
            x: round2(hole.x),
            y: round2(hole.y),
            diameter: round2(hole.diameter),
        })
        .collect();

    let grid_lines: Vec<GridLineRow> = state
        .grid_lines
        .iter()
        .enumerate()
        .map(|(i, line)| GridLineRow {
            id: i + 1,
            kind: line.orientation,
            position: round2(line.position),
        })
        .collect();

    let punched_area: f64 = state
        .filtered_holes
        .iter()
        .map(|hole| PI * (hole.diameter / 2.0).powi(2))
        .sum();
    let hole_count = state.filtered_holes.len();

    let report = Report {
        project: Project {
            name: project_name.to_string(),
            date: Utc::now().format("%Y-%m-%d").to_string(),
            panel_dimensions: PanelDimensions {
                length: panel.length_mm,
                width: panel.height_mm,
                thickness: panel.thickness_mm,
            },
        },
        statistics: Statistics {
            total_holes: hole_count,
            grid_line_count: state.grid_lines.len(),
            material_usage_percent: stats.material_usage_percent,
        },
        holes,
        grid_lines,
        summary: Summary {
            total_area: area,
            punched_area,
            hole_density_per_100cm2: if area > 0.0 {
                hole_count as f64 / area * 10000.0
            } else {
                0.0
            },
        },
    };

    debug!("Report export: {} holes for project '{}'", hole_count, project_name);
    Ok(serde_json::to_string_pretty(&report)?)
}

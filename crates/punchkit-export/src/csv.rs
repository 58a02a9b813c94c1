//! Flat CSV hole table.

use punchkit_pattern::PatternState;

/// Writes one row per grid-filtered hole.
///
/// Values are raw, unrounded millimeters in shortest-float form, so a
/// hole at integral coordinates prints without a decimal point. The body
/// carries no trailing newline after the last row.
pub fn write_csv(state: &PatternState) -> String {
    let rows: Vec<String> = state
        .filtered_holes
        .iter()
        .enumerate()
        .map(|(i, hole)| format!("{},{},{},{}", i + 1, hole.x, hole.y, hole.diameter))
        .collect();
    format!("ID,X,Y,Diameter\n{}", rows.join("\n"))
}

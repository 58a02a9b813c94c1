//! Export format selection and dispatch.

use std::fmt;
use std::str::FromStr;

use punchkit_core::error::{ConfigError, Result};
use punchkit_pattern::PatternState;
use tracing::debug;

use crate::csv::write_csv;
use crate::dxf::write_dxf;
use crate::report::write_report;
use crate::toolpath::{GcodeGenerator, ToolpathSettings};

/// Output formats understood by [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// DXF-style vector entity stream.
    Dxf,
    /// G-Code punch toolpath.
    Gcode,
    /// Structured JSON manufacturing report.
    Report,
    /// Flat CSV hole table.
    Csv,
}

impl ExportFormat {
    /// Canonical file extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dxf => "dxf",
            Self::Gcode => "gcode",
            Self::Report => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dxf => write!(f, "dxf"),
            Self::Gcode => write!(f, "gcode"),
            Self::Report => write!(f, "report"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    /// Parses a format name, case-insensitively.
    ///
    /// An unrecognized name is a fatal configuration error; it is the only
    /// way an export request can fail before serialization starts.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dxf" => Ok(Self::Dxf),
            "gcode" => Ok(Self::Gcode),
            "report" => Ok(Self::Report),
            "csv" => Ok(Self::Csv),
            _ => Err(ConfigError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}

/// Caller-supplied knobs that vary per export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Project name recorded in report output.
    pub project_name: String,
    /// Machine rates and heights for G-Code output.
    pub toolpath: ToolpathSettings,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            project_name: "punch_pattern".to_string(),
            toolpath: ToolpathSettings::default(),
        }
    }
}

/// Serializes the pattern snapshot into the requested format.
///
/// Pure buffer production; writing the bytes to disk or triggering a
/// download is the caller's concern. The snapshot is already validated
/// upstream, so serialization itself cannot fail for data reasons (the
/// report writer's JSON encoding error is propagated but unreachable for
/// the plain records it encodes).
pub fn export(state: &PatternState, format: ExportFormat, opts: &ExportOptions) -> Result<Vec<u8>> {
    let text = match format {
        ExportFormat::Dxf => write_dxf(state),
        ExportFormat::Gcode => GcodeGenerator::new(opts.toolpath).generate(state),
        ExportFormat::Report => write_report(state, &opts.project_name)?,
        ExportFormat::Csv => write_csv(state),
    };
    debug!(
        "Exported {} holes as {} ({} bytes)",
        state.filtered_holes.len(),
        format,
        text.len()
    );
    Ok(text.into_bytes())
}

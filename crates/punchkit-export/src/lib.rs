//! # Punchkit Export
//!
//! Serializes a [`punchkit_pattern::PatternState`] snapshot into the
//! manufacturing formats consumed downstream of the pattern editor:
//!
//! - **DXF**: a vector entity stream for CAD import ([`dxf`])
//! - **G-Code**: a punch/drill toolpath for CNC execution ([`toolpath`])
//! - **Report**: a structured JSON manufacturing summary ([`report`])
//! - **CSV**: a flat hole table for spreadsheets ([`csv`])
//!
//! Every writer is a pure function from snapshot to buffer; file I/O and
//! download handling belong to the caller. The exporters consume the
//! grid-filtered hole list, so holes suppressed by a division cut never
//! reach fabrication output.

pub mod csv;
pub mod dxf;
pub mod format;
pub mod gate;
pub mod report;
pub mod toolpath;

pub use format::{export, ExportFormat, ExportOptions};
pub use gate::{ExportGate, OpenGate};
pub use toolpath::{GcodeGenerator, ToolpathSettings};

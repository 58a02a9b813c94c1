//! Error handling for Punchkit
//!
//! The pattern pipeline distinguishes two kinds of bad input:
//! - Configuration errors (empty diameter set, unknown export format,
//!   oversize panel) are fatal to the requested operation and surface
//!   synchronously through these types.
//! - Degenerate input (zero-sized image or panel, empty hole list) is
//!   valid-but-empty and never produces an error; operations return empty
//!   results so a live editing session stays usable.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Pattern configuration error type
///
/// Represents caller mistakes that must not be papered over with defaults:
/// the operation is refused and the reason reported.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// The diameter set is empty, so no hole could be assigned a size
    #[error("No hole diameters configured")]
    EmptyDiameters,

    /// A diameter was rejected when editing the diameter set
    #[error("Invalid hole diameter {diameter}mm: {reason}")]
    InvalidDiameter {
        /// The offending diameter in mm.
        diameter: f64,
        /// Why the diameter was rejected.
        reason: String,
    },

    /// Panel exceeds the externally supplied maximum size
    #[error(
        "Panel {length}mm x {height}mm exceeds allowed maximum {max_length}mm x {max_height}mm"
    )]
    PanelTooLarge {
        /// Requested panel length in mm.
        length: f64,
        /// Requested panel height in mm.
        height: f64,
        /// Maximum allowed length in mm.
        max_length: f64,
        /// Maximum allowed height in mm.
        max_height: f64,
    },

    /// Export format name not recognized
    #[error("Unknown export format: {name}")]
    UnknownFormat {
        /// The unrecognized format name.
        name: String,
    },
}

/// Main error type for Punchkit
///
/// A unified error type that can represent any error from the pipeline.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Pattern configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::EmptyDiameters;
        assert_eq!(err.to_string(), "No hole diameters configured");

        let err = ConfigError::InvalidDiameter {
            diameter: 60.0,
            reason: "exceeds 50mm".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid hole diameter 60mm: exceeds 50mm");

        let err = ConfigError::UnknownFormat {
            name: "step".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown export format: step");
    }

    #[test]
    fn test_error_conversion() {
        let config_err = ConfigError::EmptyDiameters;
        let err: Error = config_err.into();
        assert!(err.is_config_error());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_panel_too_large_display() {
        let err = ConfigError::PanelTooLarge {
            length: 3000.0,
            height: 1500.0,
            max_length: 2000.0,
            max_height: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "Panel 3000mm x 1500mm exceeds allowed maximum 2000mm x 1000mm"
        );
    }
}

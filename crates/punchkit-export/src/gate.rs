//! Entitlement seam for export triggering.
//!
//! Quota accounting lives outside the core; the writers never see it.
//! Callers consult the gate before invoking [`crate::export`] and record
//! usage after a successful run.

/// Decides whether an export may run and records consumed quota.
pub trait ExportGate {
    /// Whether the caller may export right now.
    fn may_export(&self) -> bool {
        true
    }

    /// Records one consumed export.
    fn record_usage(&mut self) {}
}

/// Gate that always allows exporting and records nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGate;

impl ExportGate for OpenGate {}

// ABOUTME: Diagnostics accumulator for non-fatal failures during a transfer run.
// ABOUTME: Collects failures that do not stop a phase but belong in the final report.

use crate::types::ServiceName;

/// Collects non-fatal warnings during a run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}: {}", warning.service, warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Warnings of one kind.
    pub fn of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

/// A non-fatal failure collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub service: ServiceName,
    pub message: String,
}

impl Warning {
    pub fn retag_failed(service: &ServiceName, message: impl Into<String>) -> Self {
        Self::new(WarningKind::RetagFailed, service, message)
    }

    pub fn push_failed(service: &ServiceName, message: impl Into<String>) -> Self {
        Self::new(WarningKind::PushFailed, service, message)
    }

    pub fn remove_failed(service: &ServiceName, message: impl Into<String>) -> Self {
        Self::new(WarningKind::RemoveFailed, service, message)
    }

    fn new(kind: WarningKind, service: &ServiceName, message: impl Into<String>) -> Self {
        Self {
            kind,
            service: service.clone(),
            message: message.into(),
        }
    }
}

/// Categories of non-fatal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Creating the destination tag failed.
    RetagFailed,
    /// Every push attempt for an image failed.
    PushFailed,
    /// A local image could not be removed during cleanup.
    RemoveFailed,
}

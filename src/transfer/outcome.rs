// ABOUTME: Per-phase tallies and the final run report.
// ABOUTME: Decides the process exit status from the push phase outcome.

use crate::diagnostics::Diagnostics;
use std::fmt;

/// Successes and failures of one retag or push phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub succeeded: usize,
    pub failed: usize,
}

impl PhaseOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for PhaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} successful, {} failed", self.succeeded, self.failed)
    }
}

/// Tallies of the cleanup phase. Failures never fail the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub removed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for CleanupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} removed, {} skipped, {} failed",
            self.removed, self.skipped, self.failed
        )
    }
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct RunReport {
    pub retag: PhaseOutcome,
    pub push: PhaseOutcome,
    /// `None` when cleanup was disabled.
    pub cleanup: Option<CleanupOutcome>,
    pub diagnostics: Diagnostics,
}

impl RunReport {
    /// Only push failures surface in the exit status.
    pub fn succeeded(&self) -> bool {
        self.push.is_clean()
    }

    pub fn exit_code(&self) -> i32 {
        if self.succeeded() { 0 } else { 1 }
    }
}

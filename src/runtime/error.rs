// ABOUTME: Subprocess error types with SNAFU pattern.
// ABOUTME: Captures spawn failures and non-zero exits of runtime CLI calls.

use snafu::Snafu;
use std::process::ExitStatus;

/// Failure of a single runtime CLI invocation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum CommandError {
    #[snafu(display("failed to run {program}: {source}"))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("{program} {operation} exited with {status}{}", stderr_suffix(stderr)))]
    Exit {
        program: String,
        operation: String,
        status: ExitStatus,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandErrorKind {
    /// The executable could not be started.
    Spawn,
    /// The executable ran and reported failure.
    Exit,
}

impl CommandError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> CommandErrorKind {
        match self {
            CommandError::Spawn { .. } => CommandErrorKind::Spawn,
            CommandError::Exit { .. } => CommandErrorKind::Exit,
        }
    }

    /// Exit code of the failed invocation, when it ran to completion.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CommandError::Exit { status, .. } => status.code(),
            CommandError::Spawn { .. } => None,
        }
    }
}

// ABOUTME: Runtime type definitions for Docker and Podman.
// ABOUTME: Maps each runtime to its executable name.

use serde::{Deserialize, Serialize};

/// The container runtime whose CLI performs image operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    #[default]
    Podman,
    Docker,
}

impl RuntimeType {
    /// Executable looked up on `PATH`.
    pub fn binary(&self) -> &'static str {
        match self {
            RuntimeType::Podman => "podman",
            RuntimeType::Docker => "docker",
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

impl std::str::FromStr for RuntimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "podman" => Ok(RuntimeType::Podman),
            "docker" => Ok(RuntimeType::Docker),
            other => Err(format!("unknown runtime: {other} (expected podman or docker)")),
        }
    }
}

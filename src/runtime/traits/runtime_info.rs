// ABOUTME: Runtime info trait for container runtimes.
// ABOUTME: Identify the runtime and confirm its CLI is installed.

use crate::runtime::detection::DetectionError;
use crate::runtime::types::RuntimeType;
use std::path::PathBuf;

/// Runtime identity and availability.
pub trait RuntimeInfo: Send + Sync {
    /// Which runtime this is.
    fn runtime_type(&self) -> RuntimeType;

    /// Resolve the runtime executable, failing if it is not installed.
    fn locate(&self) -> Result<PathBuf, DetectionError>;
}

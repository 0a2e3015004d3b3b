// ABOUTME: Container runtime access for Docker and Podman.
// ABOUTME: Detects the runtime CLI and exposes image operations through traits.

mod cli;
mod detection;
mod error;
pub mod traits;
mod types;

pub use cli::CliRuntime;
pub use detection::{DetectionError, detect_local, find_in_path};
pub use error::{CommandError, CommandErrorKind};
pub use traits::{FullRuntime, ImageError, ImageOps, PushOptions, RuntimeInfo};
pub use types::RuntimeType;

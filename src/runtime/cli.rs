// ABOUTME: CliRuntime drives the podman or docker CLI as a subprocess.
// ABOUTME: Implements ImageOps and RuntimeInfo with blocking-until-exit calls.

use super::detection::{self, DetectionError};
use super::error::{CommandError, CommandErrorKind, ExitSnafu, SpawnSnafu};
use super::traits::{ImageError, ImageOps, PushOptions, RuntimeInfo};
use super::types::RuntimeType;
use crate::types::ImageRef;
use async_trait::async_trait;
use snafu::ResultExt;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::sync::OnceLock;
use tokio::process::Command;

/// Container runtime reached through its command-line interface.
#[derive(Debug)]
pub struct CliRuntime {
    runtime_type: RuntimeType,
    program: OnceLock<PathBuf>,
}

impl CliRuntime {
    pub fn new(runtime_type: RuntimeType) -> Self {
        Self {
            runtime_type,
            program: OnceLock::new(),
        }
    }

    /// Use an explicit executable instead of searching `PATH`.
    pub fn with_program(runtime_type: RuntimeType, program: impl Into<PathBuf>) -> Self {
        let runtime = Self::new(runtime_type);
        let _ = runtime.program.set(program.into());
        runtime
    }

    fn program(&self) -> PathBuf {
        self.program
            .get()
            .cloned()
            .unwrap_or_else(|| PathBuf::from(self.runtime_type.binary()))
    }

    async fn output(&self, args: &[&str]) -> Result<Output, CommandError> {
        let program = self.program();
        tracing::debug!("running {} {}", program.display(), args.join(" "));

        Command::new(&program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context(SpawnSnafu {
                program: program.display().to_string(),
            })
    }

    async fn run(&self, operation: &str, args: &[&str]) -> Result<(), CommandError> {
        let output = self.output(args).await?;
        if output.status.success() {
            return Ok(());
        }
        Err(self.exit_error(operation, &output))
    }

    fn exit_error(&self, operation: &str, output: &Output) -> CommandError {
        ExitSnafu {
            program: self.runtime_type.binary(),
            operation,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr),
        }
        .build()
    }
}

#[async_trait]
impl ImageOps for CliRuntime {
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, ImageError> {
        let reference = reference.to_string();
        let args: Vec<&str> = match self.runtime_type {
            RuntimeType::Podman => vec!["image", "exists", reference.as_str()],
            RuntimeType::Docker => {
                vec!["image", "inspect", "--format", "{{.Id}}", reference.as_str()]
            }
        };

        let output = self.output(&args).await?;
        match (self.runtime_type, output.status.code()) {
            (_, Some(0)) => Ok(true),
            (RuntimeType::Podman, Some(1)) => Ok(false),
            // Docker also exits 1 when the daemon is unreachable.
            (RuntimeType::Docker, Some(1)) if reports_missing_image(&output) => Ok(false),
            _ => Err(self.exit_error("image exists", &output).into()),
        }
    }

    async fn tag_image(&self, source: &ImageRef, target: &ImageRef) -> Result<(), ImageError> {
        let (source, target) = (source.to_string(), target.to_string());
        self.run("tag", &["tag", source.as_str(), target.as_str()])
            .await
            .map_err(|e| runtime_failure(e, ImageError::TagFailed))
    }

    async fn push_image(
        &self,
        reference: &ImageRef,
        options: &PushOptions,
    ) -> Result<(), ImageError> {
        let reference = reference.to_string();
        let mut args = vec!["push"];
        match self.runtime_type {
            RuntimeType::Podman if !options.tls_verify => args.push("--tls-verify=false"),
            RuntimeType::Podman => {}
            // Docker takes insecure registries from daemon configuration.
            RuntimeType::Docker => {}
        }
        args.push(reference.as_str());

        self.run("push", &args)
            .await
            .map_err(|e| runtime_failure(e, ImageError::PushFailed))
    }

    async fn remove_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        let reference_str = reference.to_string();
        let output = self.output(&["image", "rm", reference_str.as_str()]).await?;
        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
        if stderr.contains("image is in use") || stderr.contains("being used by") {
            Err(ImageError::InUse(reference_str))
        } else if stderr.contains("image not known") || stderr.contains("no such image") {
            Err(ImageError::NotFound(reference_str))
        } else {
            Err(self.exit_error("image rm", &output).into())
        }
    }
}

impl RuntimeInfo for CliRuntime {
    fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    fn locate(&self) -> Result<PathBuf, DetectionError> {
        if let Some(program) = self.program.get() {
            return Ok(program.clone());
        }
        let found = detection::detect_local(self.runtime_type)?;
        Ok(self.program.get_or_init(|| found).clone())
    }
}

/// A runtime that ran and refused becomes `failed`; one that never started
/// stays a command error.
fn runtime_failure(err: CommandError, failed: fn(String) -> ImageError) -> ImageError {
    match err.kind() {
        CommandErrorKind::Exit => failed(err.to_string()),
        CommandErrorKind::Spawn => ImageError::Command(err),
    }
}

fn reports_missing_image(output: &Output) -> bool {
    let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
    stderr.contains("no such image") || stderr.contains("no such object")
}

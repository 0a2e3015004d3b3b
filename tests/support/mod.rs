// ABOUTME: Test support utilities.
// ABOUTME: Provides an in-memory fake runtime and a recording delay for pipeline tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use retag_push::config::{Config, Overrides, RunConfig};
use retag_push::runtime::{
    DetectionError, ImageError, ImageOps, PushOptions, RuntimeInfo, RuntimeType,
};
use retag_push::transfer::Delay;
use retag_push::types::ImageRef;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Once};
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("retag_push=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Run config for `prefix` with a fixed version and no wait between retries.
#[allow(dead_code)]
pub fn run_config(prefix: &str) -> RunConfig {
    let overrides = Overrides {
        version: Some("3.2.7".to_string()),
        registry_prefix: Some(prefix.to_string()),
        ..Default::default()
    };
    Config::default().resolve(&overrides).unwrap()
}

/// A runtime call observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(String),
    Tag(String, String),
    Push(String),
    Remove(String),
}

#[derive(Default)]
struct FakeState {
    images: HashSet<String>,
    push_failures: HashMap<String, u32>,
    tag_failures: HashSet<String>,
    remove_failures: HashSet<String>,
    calls: Vec<Call>,
}

/// In-memory image store standing in for a container runtime CLI.
pub struct FakeRuntime {
    runtime_type: RuntimeType,
    installed: bool,
    state: Mutex<FakeState>,
}

#[allow(dead_code)]
impl FakeRuntime {
    pub fn new() -> Self {
        Self {
            runtime_type: RuntimeType::Podman,
            installed: true,
            state: Mutex::new(FakeState::default()),
        }
    }

    pub fn not_installed() -> Self {
        Self {
            installed: false,
            ..Self::new()
        }
    }

    pub fn with_image(self, reference: &ImageRef) -> Self {
        self.state.lock().images.insert(reference.to_string());
        self
    }

    /// Fail the next `times` pushes of `reference`.
    pub fn fail_push(self, reference: &ImageRef, times: u32) -> Self {
        self.state
            .lock()
            .push_failures
            .insert(reference.to_string(), times);
        self
    }

    pub fn fail_tag(self, target: &ImageRef) -> Self {
        self.state.lock().tag_failures.insert(target.to_string());
        self
    }

    pub fn fail_remove(self, reference: &ImageRef) -> Self {
        self.state.lock().remove_failures.insert(reference.to_string());
        self
    }

    pub fn has_image(&self, reference: &ImageRef) -> bool {
        self.state.lock().images.contains(&reference.to_string())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn push_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Push(_)))
            .count()
    }

    pub fn tag_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Tag(..)))
            .count()
    }
}

#[async_trait]
impl ImageOps for FakeRuntime {
    async fn image_exists(&self, reference: &ImageRef) -> Result<bool, ImageError> {
        let mut state = self.state.lock();
        let reference = reference.to_string();
        state.calls.push(Call::Exists(reference.clone()));
        Ok(state.images.contains(&reference))
    }

    async fn tag_image(&self, source: &ImageRef, target: &ImageRef) -> Result<(), ImageError> {
        let mut state = self.state.lock();
        let (source, target) = (source.to_string(), target.to_string());
        state.calls.push(Call::Tag(source.clone(), target.clone()));

        if state.tag_failures.contains(&target) {
            return Err(ImageError::TagFailed(format!("cannot tag {target}")));
        }
        if !state.images.contains(&source) {
            return Err(ImageError::NotFound(source));
        }
        state.images.insert(target);
        Ok(())
    }

    async fn push_image(
        &self,
        reference: &ImageRef,
        _options: &PushOptions,
    ) -> Result<(), ImageError> {
        let mut state = self.state.lock();
        let reference = reference.to_string();
        state.calls.push(Call::Push(reference.clone()));

        if let Some(remaining) = state.push_failures.get_mut(&reference)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(ImageError::PushFailed("connection refused".to_string()));
        }
        if !state.images.contains(&reference) {
            return Err(ImageError::NotFound(reference));
        }
        Ok(())
    }

    async fn remove_image(&self, reference: &ImageRef) -> Result<(), ImageError> {
        let mut state = self.state.lock();
        let reference = reference.to_string();
        state.calls.push(Call::Remove(reference.clone()));

        if state.remove_failures.contains(&reference) {
            return Err(ImageError::InUse(reference));
        }
        state.images.remove(&reference);
        Ok(())
    }
}

impl RuntimeInfo for FakeRuntime {
    fn runtime_type(&self) -> RuntimeType {
        self.runtime_type
    }

    fn locate(&self) -> Result<PathBuf, DetectionError> {
        if self.installed {
            Ok(PathBuf::from("/usr/bin/podman"))
        } else {
            Err(DetectionError::NoRuntimeFound(self.runtime_type))
        }
    }
}

/// Records requested waits instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingDelay(Arc<Mutex<Vec<Duration>>>);

#[allow(dead_code)]
impl RecordingDelay {
    pub fn waits(&self) -> Vec<Duration> {
        self.0.lock().clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn wait(&self, duration: Duration) {
        self.0.lock().push(duration);
    }
}

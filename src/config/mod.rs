// ABOUTME: Configuration types and parsing for retag-push.yml.
// ABOUTME: Handles YAML parsing, env var lookups, discovery, and CLI overrides.

mod deserialize;
mod env_value;
mod init;

pub use env_value::EnvValue;
pub use init::init_config;

use crate::error::{Error, Result};
use crate::runtime::{PushOptions, RuntimeType};
use crate::transfer::{CleanupMode, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, RetryPolicy};
use crate::types::ServiceList;
use deserialize::{deserialize_max_attempts, deserialize_services};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "retag-push.yml";
pub const CONFIG_FILENAME_ALT: &str = "retag-push.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".retag-push/config.yml";

pub const VERSION_ENV: &str = "VERSION";
pub const REGISTRY_PREFIX_ENV: &str = "REPOSITORY_PREFIX";
pub const DEFAULT_VERSION: &str = "3.2.7";
pub const DEFAULT_REGISTRY_PREFIX: &str = "localhost:5001";
pub const DEFAULT_SOURCE_PREFIX: &str = "localhost/springcommunity";
pub const DEFAULT_LOG_FILE: &str = "podman-retag-push.log";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tag applied to every destination reference.
    #[serde(default = "default_version")]
    pub version: EnvValue,

    /// Destination registry, `host[:port][/namespace]`.
    #[serde(default = "default_registry_prefix")]
    pub registry_prefix: EnvValue,

    /// Local namespace the source images were built under.
    #[serde(default = "default_source_prefix")]
    pub source_prefix: String,

    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    #[serde(default)]
    pub runtime: RuntimeType,

    /// Push without TLS verification.
    #[serde(default = "default_true")]
    pub insecure_registry: bool,

    /// Stop before pushing when any retag fails.
    #[serde(default)]
    pub abort_on_retag_failure: bool,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,

    #[serde(default, deserialize_with = "deserialize_services")]
    pub services: ServiceList,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryConfig {
    #[serde(
        default = "default_max_attempts",
        deserialize_with = "deserialize_max_attempts"
    )]
    pub max_attempts: u32,

    #[serde(default = "default_retry_delay", with = "humantime_serde")]
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay: default_retry_delay(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CleanupConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Also remove the source images once their destination is pushed.
    #[serde(default = "default_true")]
    pub remove_source: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            remove_source: true,
        }
    }
}

fn default_version() -> EnvValue {
    EnvValue::from_env(VERSION_ENV, DEFAULT_VERSION)
}

fn default_registry_prefix() -> EnvValue {
    EnvValue::from_env(REGISTRY_PREFIX_ENV, DEFAULT_REGISTRY_PREFIX)
}

fn default_source_prefix() -> String {
    DEFAULT_SOURCE_PREFIX.to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_retry_delay() -> Duration {
    DEFAULT_RETRY_DELAY
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version: default_version(),
            registry_prefix: default_registry_prefix(),
            source_prefix: default_source_prefix(),
            log_file: default_log_file(),
            runtime: RuntimeType::default(),
            insecure_registry: true,
            abort_on_retag_failure: false,
            retry: RetryConfig::default(),
            cleanup: CleanupConfig::default(),
            services: ServiceList::default(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub version: Option<String>,
    pub registry_prefix: Option<String>,
    pub runtime: Option<RuntimeType>,
    pub keep_source: bool,
    pub no_cleanup: bool,
    pub strict: bool,
}

/// Fully resolved settings for one run. Never mutated once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub version: String,
    pub registry_prefix: String,
    pub source_prefix: String,
    pub log_path: PathBuf,
    pub runtime: RuntimeType,
    pub push: PushOptions,
    pub retry: RetryPolicy,
    pub cleanup: CleanupMode,
    pub abort_on_retag_failure: bool,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("using config file {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Load `explicit` if given (it must exist), else discover in `dir`,
    /// else fall back to built-in defaults.
    pub fn load_or_default(dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            return Self::load(path);
        }

        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => {
                tracing::debug!("no config file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Resolve env references and apply overrides.
    ///
    /// An empty registry prefix is not rejected here; the run's environment
    /// validation reports it.
    pub fn resolve(&self, overrides: &Overrides) -> Result<RunConfig> {
        let version = match &overrides.version {
            Some(v) => v.clone(),
            None => self.version.resolve()?,
        };
        let registry_prefix = match &overrides.registry_prefix {
            Some(p) => p.clone(),
            None => self.registry_prefix.resolve()?,
        };

        let retry = RetryPolicy::new(self.retry.max_attempts, self.retry.delay).ok_or_else(
            || Error::InvalidConfig("retry.max_attempts must be at least 1".to_string()),
        )?;

        let cleanup = if overrides.no_cleanup || !self.cleanup.enabled {
            CleanupMode::Disabled
        } else if overrides.keep_source || !self.cleanup.remove_source {
            CleanupMode::DestinationOnly
        } else {
            CleanupMode::DestinationAndSource
        };

        Ok(RunConfig {
            version,
            registry_prefix,
            source_prefix: self.source_prefix.clone(),
            log_path: self.log_file.clone(),
            runtime: overrides.runtime.unwrap_or(self.runtime),
            push: PushOptions {
                tls_verify: !self.insecure_registry,
            },
            retry,
            cleanup,
            abort_on_retag_failure: self.abort_on_retag_failure || overrides.strict,
        })
    }
}

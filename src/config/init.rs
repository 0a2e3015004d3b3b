// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates a retag-push.yml template holding the built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::ServiceName;

use super::{CONFIG_FILENAME, Config};

/// Write the default configuration into `dir`, returning the file path.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&Config::default());
    std::fs::write(&config_path, yaml)?;

    Ok(config_path)
}

fn generate_template_yaml(config: &Config) -> String {
    let services = config
        .services
        .iter()
        .map(ServiceName::as_str)
        .map(|name| format!("  - {name}\n"))
        .collect::<String>();

    format!(
        r#"# Tag applied to every pushed image. Literal or {{ env: NAME, default: VALUE }}.
version: {}
# Destination registry prefix (host[:port][/namespace]).
registry_prefix: {}
# Namespace the images were built under locally.
source_prefix: {}
log_file: {}
# podman or docker
runtime: {}
insecure_registry: {}
# Stop before pushing if any image fails to retag.
abort_on_retag_failure: {}
retry:
  max_attempts: {}
  delay: {}
cleanup:
  enabled: {}
  remove_source: {}
services:
{}"#,
        config.version,
        config.registry_prefix,
        config.source_prefix,
        config.log_file.display(),
        config.runtime,
        config.insecure_registry,
        config.abort_on_retag_failure,
        config.retry.max_attempts,
        format_delay(config.retry.delay),
        config.cleanup.enabled,
        config.cleanup.remove_source,
        services
    )
}

fn format_delay(delay: Duration) -> String {
    if delay.subsec_millis() == 0 {
        format!("{}s", delay.as_secs())
    } else {
        format!("{}ms", delay.as_millis())
    }
}

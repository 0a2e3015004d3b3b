// ABOUTME: Command module aggregator for the retag-push CLI.
// ABOUTME: Re-exports run, plan, and cleanup command handlers.

mod cleanup;
mod plan;
mod run;

pub use cleanup::cleanup;
pub use plan::plan;
pub use run::run;

use retag_push::config::RunConfig;
use retag_push::output::{OutputMode, RunLog};

/// Open the run log at the configured path, appending to earlier runs.
/// Falls back to console-only output when the file cannot be opened.
fn open_run_log(config: &RunConfig, mode: OutputMode) -> RunLog {
    match RunLog::with_file(mode, &config.log_path) {
        Ok(log) => {
            tracing::debug!("appending run log to {}", config.log_path.display());
            log
        }
        Err(e) => {
            tracing::warn!(
                "cannot open run log {}, logging to console only: {}",
                config.log_path.display(),
                e
            );
            RunLog::new(mode)
        }
    }
}

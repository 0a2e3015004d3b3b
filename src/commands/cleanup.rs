// ABOUTME: Cleanup command implementation.
// ABOUTME: Removes local destination and source images without retagging or pushing.

use super::open_run_log;
use retag_push::config::{Config, Overrides};
use retag_push::diagnostics::Diagnostics;
use retag_push::error::Result;
use retag_push::output::OutputMode;
use retag_push::runtime::CliRuntime;
use retag_push::transfer::{CleanupMode, Pipeline, TokioDelay};

/// Remove local images for every configured service.
///
/// Runs even when cleanup is disabled for `run` in the config file.
pub async fn cleanup(config: Config, overrides: Overrides, mode: OutputMode) -> Result<i32> {
    let run_config = config.resolve(&overrides)?;
    let log = open_run_log(&run_config, mode);
    let runtime = CliRuntime::new(run_config.runtime);
    let pipeline = Pipeline::new(&runtime, &log, TokioDelay);

    let plan = pipeline.validate_environment(&run_config, &config.services)?;
    pipeline.check_runtime()?;

    let cleanup_mode = match run_config.cleanup {
        CleanupMode::Disabled if config.cleanup.remove_source && !overrides.keep_source => {
            CleanupMode::DestinationAndSource
        }
        CleanupMode::Disabled => CleanupMode::DestinationOnly,
        other => other,
    };

    let mut diagnostics = Diagnostics::default();
    pipeline.cleanup(&plan, cleanup_mode, &mut diagnostics).await;

    Ok(0)
}

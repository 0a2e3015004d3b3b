// ABOUTME: Run command implementation.
// ABOUTME: Drives the full retag, push, and cleanup pipeline.

use super::open_run_log;
use retag_push::config::{Config, Overrides};
use retag_push::error::Result;
use retag_push::output::{Event, OutputMode};
use retag_push::runtime::CliRuntime;
use retag_push::transfer::{Pipeline, TokioDelay};

/// Transfer every configured image. Returns the process exit code.
pub async fn run(config: Config, overrides: Overrides, mode: OutputMode) -> Result<i32> {
    let run_config = config.resolve(&overrides)?;
    let log = open_run_log(&run_config, mode);
    let runtime = CliRuntime::new(run_config.runtime);

    let report = Pipeline::new(&runtime, &log, TokioDelay)
        .run(&run_config, &config.services)
        .await?;

    if report.diagnostics.has_warnings() {
        log.record(Event::info(format!(
            "Finished in {:.1}s with {} non-fatal failure(s)",
            log.elapsed_secs(),
            report.diagnostics.warnings().len()
        )));
    } else {
        log.record(Event::info(format!(
            "Finished in {:.1}s",
            log.elapsed_secs()
        )));
    }

    Ok(report.exit_code())
}

// ABOUTME: The retag, push, and cleanup workflow as a sequence of phases.
// ABOUTME: Fatal phases abort the run; per-image failures are tallied and reported.

use super::outcome::{CleanupOutcome, PhaseOutcome, RunReport};
use super::plan::TransferPlan;
use super::retry::{Delay, RetryPolicy};
use crate::config::RunConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::output::{Event, RunLog};
use crate::runtime::{FullRuntime, PushOptions};
use crate::types::{ImageRef, ServiceList};
use std::path::PathBuf;

/// Which local references the cleanup phase removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupMode {
    Disabled,
    DestinationOnly,
    DestinationAndSource,
}

impl CleanupMode {
    pub fn removes_source(&self) -> bool {
        matches!(self, CleanupMode::DestinationAndSource)
    }
}

/// Runs the transfer phases against a runtime, recording through one log.
pub struct Pipeline<'a, R, D> {
    runtime: &'a R,
    log: &'a RunLog,
    delay: D,
}

impl<'a, R: FullRuntime, D: Delay> Pipeline<'a, R, D> {
    pub fn new(runtime: &'a R, log: &'a RunLog, delay: D) -> Self {
        Self {
            runtime,
            log,
            delay,
        }
    }

    /// Run every phase in order.
    ///
    /// Returns `Err` for fatal precondition failures, after which no later
    /// phase has run. Otherwise the report carries per-phase tallies and its
    /// exit code reflects push failures.
    pub async fn run(&self, config: &RunConfig, services: &ServiceList) -> Result<RunReport> {
        self.log.record(Event::info(format!(
            "Starting retag and push of {} image(s) with version {}",
            services.len(),
            config.version
        )));

        let plan = self.validate_environment(config, services)?;
        self.check_runtime()?;
        self.check_sources(&plan).await?;

        let mut diagnostics = Diagnostics::default();

        let retag = self.retag(&plan, &mut diagnostics).await;
        if !retag.is_clean() {
            if config.abort_on_retag_failure {
                return Err(self.fatal(Error::RetagFailed(retag.failed)));
            }
            self.log.record(Event::warning(format!(
                "{} image(s) failed to retag, pushing anyway",
                retag.failed
            )));
        }

        let push = self
            .push(&plan, &config.push, &config.retry, &mut diagnostics)
            .await;

        let cleanup = match config.cleanup {
            CleanupMode::Disabled => {
                self.log.record(Event::info("Cleanup disabled, keeping local images"));
                None
            }
            mode => Some(self.cleanup(&plan, mode, &mut diagnostics).await),
        };

        if push.is_clean() {
            self.log.record(Event::success(format!(
                "All {} image(s) pushed to {}",
                push.succeeded, config.registry_prefix
            )));
        } else {
            self.log.record(Event::error(format!(
                "{} of {} image(s) failed to push",
                push.failed,
                plan.len()
            )));
        }

        Ok(RunReport {
            retag,
            push,
            cleanup,
            diagnostics,
        })
    }

    /// Reject a missing registry prefix, then build the transfer plan.
    pub fn validate_environment(
        &self,
        config: &RunConfig,
        services: &ServiceList,
    ) -> Result<TransferPlan> {
        if config.registry_prefix.trim().is_empty() {
            return Err(self.fatal(Error::MissingRegistryPrefix));
        }

        let plan = TransferPlan::build(config, services).map_err(|e| self.fatal(e.into()))?;

        self.log.record(Event::info(format!(
            "Environment OK: {} -> {} (tag {})",
            config.source_prefix, config.registry_prefix, config.version
        )));
        Ok(plan)
    }

    /// Confirm the runtime CLI is installed.
    pub fn check_runtime(&self) -> Result<PathBuf> {
        let runtime = self.runtime.runtime_type();
        self.log
            .record(Event::info(format!("Checking for {runtime}...")));

        let path = self
            .runtime
            .locate()
            .map_err(|e| self.fatal(e.into()))?;

        self.log.record(Event::info(format!(
            "Found {runtime} at {}",
            path.display()
        )));
        Ok(path)
    }

    /// Fail unless every source image exists locally. Reports all missing
    /// images before failing.
    pub async fn check_sources(&self, plan: &TransferPlan) -> Result<()> {
        self.log.record(Event::info("Checking source images..."));

        let mut missing = Vec::new();
        for transfer in plan.iter() {
            match self.runtime.image_exists(&transfer.source).await {
                Ok(true) => {}
                Ok(false) => {
                    self.log.record(Event::error(format!(
                        "Source image not found: {}",
                        transfer.source
                    )));
                    missing.push(transfer.service.clone());
                }
                Err(e) => {
                    self.log.record(Event::error(format!(
                        "Could not inspect {}: {}",
                        transfer.source, e
                    )));
                    missing.push(transfer.service.clone());
                }
            }
        }

        if !missing.is_empty() {
            return Err(self.fatal(Error::MissingSourceImages(missing)));
        }

        self.log.record(Event::info(format!(
            "All {} source image(s) present",
            plan.len()
        )));
        Ok(())
    }

    /// Tag every source image with its destination reference. Continues
    /// past individual failures.
    pub async fn retag(&self, plan: &TransferPlan, diagnostics: &mut Diagnostics) -> PhaseOutcome {
        self.log.record(Event::info("Retagging images..."));

        let mut outcome = PhaseOutcome::default();
        for transfer in plan.iter() {
            match self
                .runtime
                .tag_image(&transfer.source, &transfer.destination)
                .await
            {
                Ok(()) => {
                    self.log.record(Event::success(format!(
                        "Tagged {} as {}",
                        transfer.source, transfer.destination
                    )));
                    outcome.succeeded += 1;
                }
                Err(e) => {
                    self.log.record(Event::error(format!(
                        "Failed to tag {} as {}: {}",
                        transfer.source, transfer.destination, e
                    )));
                    diagnostics.warn(Warning::retag_failed(&transfer.service, e.to_string()));
                    outcome.failed += 1;
                }
            }
        }

        self.log
            .record(Event::info(format!("Retag summary: {outcome}")));
        outcome
    }

    /// Push every destination reference, retrying each per `retry`.
    pub async fn push(
        &self,
        plan: &TransferPlan,
        options: &PushOptions,
        retry: &RetryPolicy,
        diagnostics: &mut Diagnostics,
    ) -> PhaseOutcome {
        self.log.record(Event::info("Pushing images..."));

        let mut outcome = PhaseOutcome::default();
        for transfer in plan.iter() {
            match self.push_with_retry(&transfer.destination, options, retry).await {
                Ok(()) => outcome.succeeded += 1,
                Err(message) => {
                    diagnostics.warn(Warning::push_failed(&transfer.service, message));
                    outcome.failed += 1;
                }
            }
        }

        self.log
            .record(Event::info(format!("Push summary: {outcome}")));
        outcome
    }

    async fn push_with_retry(
        &self,
        reference: &ImageRef,
        options: &PushOptions,
        retry: &RetryPolicy,
    ) -> std::result::Result<(), String> {
        let max = retry.max_attempts();
        let mut attempt = 1;
        loop {
            self.log.record(Event::info(format!(
                "Pushing {reference} (attempt {attempt}/{max})"
            )));

            let err = match self.runtime.push_image(reference, options).await {
                Ok(()) => {
                    self.log
                        .record(Event::success(format!("Pushed {reference}")));
                    return Ok(());
                }
                Err(e) => e,
            };

            if !retry.should_retry(attempt) {
                let message = format!("Failed to push {reference} after {max} attempt(s): {err}");
                self.log.record(Event::error(message.clone()));
                return Err(message);
            }

            self.log.record(Event::warning(format!(
                "Push of {reference} failed (attempt {attempt}/{max}): {err}; retrying in {}s",
                retry.delay().as_secs_f64()
            )));
            self.delay.wait(retry.delay()).await;
            attempt += 1;
        }
    }

    /// Remove produced destination references and, per `mode`, the source
    /// images. Absent images are skipped; removal failures are warnings.
    pub async fn cleanup(
        &self,
        plan: &TransferPlan,
        mode: CleanupMode,
        diagnostics: &mut Diagnostics,
    ) -> CleanupOutcome {
        let mut outcome = CleanupOutcome::default();
        if mode == CleanupMode::Disabled {
            return outcome;
        }

        self.log.record(Event::info("Cleaning up local images..."));

        for transfer in plan.iter() {
            let mut targets = vec![&transfer.destination];
            if mode.removes_source() {
                targets.push(&transfer.source);
            }

            for reference in targets {
                match self.runtime.image_exists(reference).await {
                    Ok(true) => {}
                    Ok(false) => {
                        self.log.record(Event::info(format!(
                            "Not present, skipping {reference}"
                        )));
                        outcome.skipped += 1;
                        continue;
                    }
                    Err(e) => {
                        self.log.record(Event::warning(format!(
                            "Could not inspect {reference}, skipping: {e}"
                        )));
                        outcome.skipped += 1;
                        continue;
                    }
                }

                match self.runtime.remove_image(reference).await {
                    Ok(()) => {
                        self.log
                            .record(Event::success(format!("Removed {reference}")));
                        outcome.removed += 1;
                    }
                    Err(e) => {
                        self.log.record(Event::warning(format!(
                            "Failed to remove {reference}: {e}"
                        )));
                        diagnostics.warn(Warning::remove_failed(&transfer.service, e.to_string()));
                        outcome.failed += 1;
                    }
                }
            }
        }

        self.log
            .record(Event::info(format!("Cleanup summary: {outcome}")));
        outcome
    }

    fn fatal(&self, err: Error) -> Error {
        self.log.record(Event::error(err.to_string()));
        err
    }
}

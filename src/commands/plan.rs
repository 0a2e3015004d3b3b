// ABOUTME: Plan command implementation.
// ABOUTME: Prints each source to destination mapping without touching the runtime.

use retag_push::config::{Config, Overrides};
use retag_push::error::{Error, Result};
use retag_push::output::OutputMode;
use retag_push::transfer::TransferPlan;
use serde::Serialize;

#[derive(Serialize)]
struct PlannedTransfer {
    service: String,
    source: String,
    destination: String,
}

/// Print the transfer plan.
pub fn plan(config: Config, overrides: Overrides, mode: OutputMode) -> Result<i32> {
    let run_config = config.resolve(&overrides)?;
    if run_config.registry_prefix.trim().is_empty() {
        return Err(Error::MissingRegistryPrefix);
    }

    let plan = TransferPlan::build(&run_config, &config.services)?;
    for transfer in plan.iter() {
        match mode {
            OutputMode::Json => {
                let entry = PlannedTransfer {
                    service: transfer.service.to_string(),
                    source: transfer.source.to_string(),
                    destination: transfer.destination.to_string(),
                };
                if let Ok(json) = serde_json::to_string(&entry) {
                    println!("{json}");
                }
            }
            OutputMode::Normal | OutputMode::Quiet => {
                println!("{} -> {}", transfer.source, transfer.destination);
            }
        }
    }

    Ok(0)
}

// ABOUTME: Image transfer workflow: plan, retry policy, phases, and outcomes.
// ABOUTME: Moves locally built images to a registry under a new tag.

mod outcome;
mod pipeline;
mod plan;
mod retry;

pub use outcome::{CleanupOutcome, PhaseOutcome, RunReport};
pub use pipeline::{CleanupMode, Pipeline};
pub use plan::{ImageTransfer, TransferPlan};
pub use retry::{
    DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, Delay, NoDelay, RetryPolicy, TokioDelay,
};

// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand, ValueEnum};
use retag_push::config::Overrides;
use retag_push::output::OutputMode;
use retag_push::runtime::RuntimeType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retag-push")]
#[command(about = "Retag locally built container images and push them to a registry")]
#[command(version)]
pub struct Cli {
    /// Path to a retag-push.yml (default: discovered in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Console output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Normal, global = true)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Retag, push, and clean up every configured image
    Run(RunArgs),

    /// Print the source and destination reference of every image
    Plan(TargetArgs),

    /// Remove local destination (and source) images only
    Cleanup(CleanupArgs),

    /// Write a retag-push.yml holding the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct TargetArgs {
    /// Tag for destination images (overrides VERSION)
    #[arg(long)]
    pub tag: Option<String>,

    /// Destination registry prefix (overrides REPOSITORY_PREFIX)
    #[arg(long)]
    pub registry: Option<String>,

    /// Container runtime CLI to use
    #[arg(long)]
    pub runtime: Option<RuntimeType>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Keep source images during cleanup
    #[arg(long)]
    pub keep_source: bool,

    /// Skip the cleanup phase
    #[arg(long, conflicts_with = "keep_source")]
    pub no_cleanup: bool,

    /// Abort before pushing if any image fails to retag
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct CleanupArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Keep source images
    #[arg(long)]
    pub keep_source: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Normal,
    Quiet,
    Json,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Normal => OutputMode::Normal,
            OutputFormat::Quiet => OutputMode::Quiet,
            OutputFormat::Json => OutputMode::Json,
        }
    }
}

impl TargetArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            version: self.tag.clone(),
            registry_prefix: self.registry.clone(),
            runtime: self.runtime,
            ..Default::default()
        }
    }
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            keep_source: self.keep_source,
            no_cleanup: self.no_cleanup,
            strict: self.strict,
            ..self.target.overrides()
        }
    }
}

impl CleanupArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            keep_source: self.keep_source,
            ..self.target.overrides()
        }
    }
}

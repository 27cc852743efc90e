//! Command line interface for the extension publisher.
//!
//! This module provides argument parsing, logging setup and command
//! dispatch, with results on stdout and progress on stderr.

mod args;
pub mod commands;
mod output;
pub mod render;

pub use args::{
    Args, Command, ConnectionArgs, ExtensionId, GlobalOptions, ListVersionsArgs, ManifestArgs,
    NewManifestArgs, PromoteArgs, ReplicationStatusArgs, RuntimeConfig, UnpublishArgs, VersionArgs,
};
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(&args.global);

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    commands::execute(args.command, &config).await?;
    Ok(0)
}

/// Installs the `env_logger` backend. `RUST_LOG` overrides the level chosen
/// from `--verbose`/`--quiet`.
pub fn init_logging(global: &GlobalOptions) {
    let level = if global.verbose {
        "debug"
    } else if global.quiet {
        "warn"
    } else {
        "info"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .try_init();
}

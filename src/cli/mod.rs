//! cli
//!
//! Command-line interface layer for git-ff and git-recent.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and reject invalid flag combinations
//! - Delegate to command handlers
//! - Does NOT perform repository mutations directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. All ref updates flow through the
//! engine's classify-then-apply pipeline.

pub mod args;
pub mod commands;

pub use args::{Cli, Invocation, Mode, RecentCli, UsageError};

use std::process::ExitCode;

use crate::engine;
use anyhow::Result;

/// Run git-ff.
///
/// Flag combinations are validated before any repository access.
pub fn run(cli: Cli) -> Result<()> {
    let invocation = cli.validate()?;

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        progress: !cli.no_progress,
    };

    commands::dispatch(invocation, &ctx)
}

/// Run git-recent.
pub fn run_recent(cli: RecentCli) -> Result<()> {
    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        progress: false,
    };

    commands::recent(&ctx, &cli.filter())
}

/// Report a clap parse failure and pick the exit code.
///
/// Help and version requests succeed; every other parse error exits 1.
pub fn exit_for_parse_error(err: clap::Error) -> ExitCode {
    let _ = err.print();
    if err.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

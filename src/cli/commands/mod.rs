//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Opens the repository and loads configuration
//! 2. Calls the engine to resolve, select, classify and apply
//! 3. Formats and displays output
//!
//! Handlers do NOT perform repository mutations directly.

mod ff;
mod list;
mod recent;

pub use ff::fast_forward;
pub use list::list;
pub use recent::recent;

use std::path::PathBuf;

use crate::cli::args::{Invocation, Mode};
use crate::core::config::Config;
use crate::engine::{self, Context, SelectedBranches, Selection, Target};
use crate::git::Git;
use crate::ui::output::{self, Verbosity};
use anyhow::{Context as _, Result};

/// Dispatch a validated invocation to its handler.
pub fn dispatch(invocation: Invocation, ctx: &Context) -> Result<()> {
    match invocation.mode {
        Mode::List {
            selection,
            include_remotes,
            filter,
        } => list::list(ctx, &invocation.target, &selection, include_remotes, filter),
        Mode::Apply { selection } => ff::fast_forward(ctx, &invocation.target, &selection),
    }
}

/// Directory the command runs in.
fn working_dir(ctx: &Context) -> Result<PathBuf> {
    match &ctx.cwd {
        Some(cwd) => Ok(cwd.clone()),
        None => std::env::current_dir().context("Failed to determine current directory"),
    }
}

/// Open the repository and load its configuration.
fn open(ctx: &Context) -> Result<(Git, Config)> {
    let cwd = working_dir(ctx)?;
    let git = Git::open(&cwd).context("Failed to open repository")?;
    let config = Config::load(Some(git.git_dir())).context("Failed to load configuration")?;

    let verbosity = verbosity(ctx);
    if let Some(path) = config.global_config_loaded_from() {
        output::debug(format!("global config: {}", path.display()), verbosity);
    }
    if let Some(path) = config.repo_config_loaded_from() {
        output::debug(format!("repo config: {}", path.display()), verbosity);
    }

    Ok((git, config))
}

fn verbosity(ctx: &Context) -> Verbosity {
    Verbosity::from_flags(ctx.quiet, ctx.debug)
}

/// Resolve the target, logging how it matched.
fn resolve(git: &Git, spec: &str, verbosity: Verbosity) -> Result<Target> {
    let target = engine::resolve_target(git, spec)?;
    output::debug(
        format!("target '{}' resolved via {} to {}", spec, target.source, target.oid),
        verbosity,
    );
    Ok(target)
}

/// Select branches and warn about names that matched nothing.
fn select(
    git: &Git,
    selection: &Selection,
    include_remotes: bool,
    verbosity: Verbosity,
) -> Result<SelectedBranches> {
    let selected = engine::select_branches(git, selection, include_remotes)
        .context("Failed to enumerate branches")?;

    for name in &selected.missing {
        output::warn(format!("no such branch: {}", name), verbosity);
    }
    if selected.detached {
        output::warn("HEAD is not on a branch; nothing to fast-forward", verbosity);
    }
    output::debug(
        format!(
            "selected {} branch(es): {}",
            selected.branches.len(),
            selected
                .branches
                .iter()
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        verbosity,
    );

    Ok(selected)
}

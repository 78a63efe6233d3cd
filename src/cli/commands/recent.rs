//! recent command - List branches by last commit time

use super::{verbosity, working_dir};
use crate::engine::{self, Context, RecentFilter};
use crate::git::Git;
use crate::ui::output;
use crate::ui::report;
use anyhow::{Context as _, Result};

/// Print branches newest first, with the time of their tip commit.
pub fn recent(ctx: &Context, filter: &RecentFilter) -> Result<()> {
    let verbosity = verbosity(ctx);
    let cwd = working_dir(ctx)?;
    let git = Git::open(&cwd).context("Failed to open repository")?;

    output::debug(format!("listing {:?} branches", filter), verbosity);
    let branches = engine::recent_branches(&git, filter).context("Failed to read branches")?;

    for line in report::recent_rows(&branches) {
        output::print(line, verbosity);
    }

    Ok(())
}

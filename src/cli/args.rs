//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! Flag combinations clap cannot express are checked by [`Cli::validate`],
//! which runs before the repository is opened.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::engine::{RecentFilter, Selection};
use crate::ui::report::ListFilter;

/// Invalid flag combinations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("need a fast-forward target")]
    MissingTarget,

    #[error("--only and --not require --list")]
    FilterWithoutList,

    #[error("--only and --not cannot be used together")]
    OnlyWithNot,

    #[error("--remotes requires --list")]
    RemotesWithoutList,

    #[error("--all cannot be combined with explicit branches")]
    AllWithBranches,

    #[error("--all cannot be combined with --list")]
    AllWithList,
}

/// git-ff - Fast-forward branches to a target without rewriting history
#[derive(Parser, Debug)]
#[command(name = "git-ff")]
#[command(author, version, about, long_about = None)]
#[command(
    override_usage = "git-ff [OPTIONS] [BRANCHES]... <TARGET>",
    after_help = "\
WORKFLOW EXAMPLES:
    # Fast-forward the current branch to origin/main
    git ff origin/main

    # Fast-forward two branches to a tag
    git ff feature topic v1.2

    # Fast-forward every local branch that can be
    git ff --all origin/main

    # See which branches could be fast-forwarded
    git ff --list origin/main
    git ff --list --only origin/main

TARGET:
    A full object id, a local branch, a remote-tracking branch, or a tag
    naming a commit, tried in that order."
)]
pub struct Cli {
    /// Branches to update, followed by the target
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// List branches and their relation to the target instead of updating
    #[arg(short, long)]
    pub list: bool,

    /// With --list, print only branches that can be fast-forwarded
    #[arg(short, long)]
    pub only: bool,

    /// With --list, print only branches that cannot be fast-forwarded
    #[arg(short, long)]
    pub not: bool,

    /// With --list, include remote-tracking branches
    #[arg(short, long)]
    pub remotes: bool,

    /// Fast-forward every local branch
    #[arg(short, long)]
    pub all: bool,

    /// Run as if git-ff was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Never draw checkout progress
    #[arg(long)]
    pub no_progress: bool,
}

/// What a validated invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Report relations without changing anything.
    List {
        selection: Selection,
        include_remotes: bool,
        filter: ListFilter,
    },
    /// Update the selected branches.
    Apply { selection: Selection },
}

/// A validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// The target string as given.
    pub target: String,
    pub mode: Mode,
}

impl Cli {
    /// Parse command-line arguments, leaving error reporting to the caller.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Parser::try_parse()
    }

    /// Check flag combinations and split the positionals.
    ///
    /// The last positional is the target; the rest name branches.
    pub fn validate(&self) -> Result<Invocation, UsageError> {
        let Some((target, branches)) = self.args.split_last() else {
            return Err(UsageError::MissingTarget);
        };

        if self.only && self.not {
            return Err(UsageError::OnlyWithNot);
        }
        if !self.list && (self.only || self.not) {
            return Err(UsageError::FilterWithoutList);
        }
        if !self.list && self.remotes {
            return Err(UsageError::RemotesWithoutList);
        }
        if self.all && self.list {
            return Err(UsageError::AllWithList);
        }
        if self.all && !branches.is_empty() {
            return Err(UsageError::AllWithBranches);
        }

        let mode = if self.list {
            let filter = if self.only {
                ListFilter::OnlyFastForward
            } else if self.not {
                ListFilter::OnlyNonFastForward
            } else {
                ListFilter::All
            };
            let selection = if branches.is_empty() {
                Selection::All
            } else {
                Selection::Named(branches.to_vec())
            };
            Mode::List {
                selection,
                include_remotes: self.remotes,
                filter,
            }
        } else {
            let selection = if self.all {
                Selection::All
            } else if branches.is_empty() {
                Selection::Current
            } else {
                Selection::Named(branches.to_vec())
            };
            Mode::Apply { selection }
        };

        Ok(Invocation {
            target: target.clone(),
            mode,
        })
    }
}

/// git-recent - List branches by the time of their last commit
#[derive(Parser, Debug)]
#[command(name = "git-recent")]
#[command(author, version, about, long_about = None)]
pub struct RecentCli {
    /// Also show remote-tracking branches
    #[arg(short, long, conflicts_with = "remote")]
    pub all: bool,

    /// Only show remote-tracking branches of this remote
    #[arg(short, long, value_name = "REMOTE")]
    pub remote: Option<String>,

    /// Run as if git-recent was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl RecentCli {
    /// Parse command-line arguments, leaving error reporting to the caller.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Parser::try_parse()
    }

    /// The branch filter these flags select.
    pub fn filter(&self) -> RecentFilter {
        match (&self.remote, self.all) {
            (Some(remote), _) => RecentFilter::Remote(remote.clone()),
            (None, true) => RecentFilter::All,
            (None, false) => RecentFilter::Local,
        }
    }
}

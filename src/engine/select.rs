//! engine::select
//!
//! Branch selection: which branches a run evaluates.
//!
//! # Modes
//!
//! - [`Selection::Current`]: only the active local branch
//! - [`Selection::Named`]: exactly the named branches that exist
//! - [`Selection::All`]: every local branch
//!
//! Remote-tracking branches are only ever selected when the caller asks for
//! them, which the CLI restricts to list mode. Selected branches come back in
//! name order, local branches first.

use crate::core::types::BranchScope;
use crate::git::{BranchRef, Git, GitError};

/// Which branches to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The active local branch only.
    Current,
    /// An explicit set of branch names.
    Named(Vec<String>),
    /// Every local branch.
    All,
}

/// The outcome of branch selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedBranches {
    /// Branches to evaluate, in processing order
    pub branches: Vec<BranchRef>,
    /// Explicitly named branches that do not exist (skipped)
    pub missing: Vec<String>,
    /// Current-branch mode found HEAD detached or unborn
    pub detached: bool,
}

/// Select the branches to evaluate.
///
/// With `include_remotes`, remote-tracking branches are also candidates
/// for [`Selection::Named`] and [`Selection::All`].
///
/// A named branch that does not exist is recorded in
/// [`SelectedBranches::missing`] rather than failing the run.
pub fn select_branches(
    git: &Git,
    selection: &Selection,
    include_remotes: bool,
) -> Result<SelectedBranches, GitError> {
    match selection {
        Selection::Current => {
            let Some(name) = git.current_branch()? else {
                return Ok(SelectedBranches {
                    detached: true,
                    ..Default::default()
                });
            };
            let branches = git
                .find_branch(&name, BranchScope::Local)?
                .into_iter()
                .collect();
            Ok(SelectedBranches {
                branches,
                ..Default::default()
            })
        }
        Selection::All => Ok(SelectedBranches {
            branches: candidates(git, include_remotes)?,
            ..Default::default()
        }),
        Selection::Named(names) => {
            let branches: Vec<BranchRef> = candidates(git, include_remotes)?
                .into_iter()
                .filter(|b| names.iter().any(|n| n == b.name.as_str()))
                .collect();

            let mut missing: Vec<String> = Vec::new();
            for name in names {
                let found = branches.iter().any(|b| b.name.as_str() == name);
                if !found && !missing.contains(name) {
                    missing.push(name.clone());
                }
            }

            Ok(SelectedBranches {
                branches,
                missing,
                detached: false,
            })
        }
    }
}

fn candidates(git: &Git, include_remotes: bool) -> Result<Vec<BranchRef>, GitError> {
    let mut branches = git.list_branches(BranchScope::Local)?;
    if include_remotes {
        branches.extend(git.list_branches(BranchScope::Remote)?);
    }
    Ok(branches)
}

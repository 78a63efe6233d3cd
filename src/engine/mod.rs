//! engine
//!
//! The fast-forward decision-and-application engine.
//!
//! # Lifecycle
//!
//! ```text
//! Resolve target -> Select branches -> Classify each -> [Apply each]
//! ```
//!
//! The target is resolved once. Branches are then processed strictly one
//! at a time, in selection order. In list mode the classifications are only
//! reported; in apply mode each branch goes through the update applier.
//!
//! # Error Model
//!
//! - **Fatal** failures (unresolvable target, storage errors, merge-base
//!   failures, ref update failures) are returned as [`EngineError`] and stop
//!   the run; branches after the failing one are not processed.
//! - **Per-branch** results (not fast-forward, checkout conflict) are
//!   [`UpdateOutcome`] values and the run continues.
//!
//! Nothing is retried.

pub mod apply;
pub mod classify;
pub mod recent;
pub mod resolve;
pub mod select;

pub use apply::{apply_update, UpdateOutcome};
pub use classify::{classify, classify_all, classify_branch, Classification, ClassifiedBranch, Relation};
pub use recent::{recent_branches, RecentBranch, RecentFilter};
pub use resolve::{resolve_target, ResolveError, Target, TargetSource};
pub use select::{select_branches, SelectedBranches, Selection};

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::BranchName;
use crate::git::{BranchRef, CheckoutProgress, Git, GitError};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags and configuration.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Checkout progress may be rendered (`--no-progress` clears it).
    pub progress: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            progress: true,
        }
    }
}

/// Fatal errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The target could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Merge-base computation failed for a branch.
    #[error("can't compute merge base of {branch} and target: {source}")]
    MergeBase {
        branch: BranchName,
        #[source]
        source: GitError,
    },

    /// Updating a branch (checkout or ref move) failed.
    #[error("failed to fast-forward {branch}: {source}")]
    Update {
        branch: BranchName,
        #[source]
        source: GitError,
    },

    /// Git error.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// The result of applying the engine to one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchUpdate {
    pub branch: BranchRef,
    pub outcome: UpdateOutcome,
}

/// Receives events while branches are being updated.
///
/// Callbacks run on the calling thread, in processing order.
pub trait UpdateObserver {
    /// A checkout for `branch` processed another file.
    fn checkout_progress(&mut self, _branch: &BranchName, _progress: CheckoutProgress) {}

    /// `branch` reached its final outcome.
    fn branch_done(&mut self, _update: &BranchUpdate) {}
}

/// An observer that ignores every event.
impl UpdateObserver for () {}

/// Fast-forward each selected branch to the target.
///
/// Returns every per-branch outcome in processing order. A fatal failure
/// stops the run; updates already applied stay applied.
pub fn fast_forward(
    git: &Git,
    target: &Target,
    branches: &[BranchRef],
    observer: &mut dyn UpdateObserver,
) -> Result<Vec<BranchUpdate>, EngineError> {
    let mut updates = Vec::with_capacity(branches.len());

    for branch in branches {
        let classification = classify_branch(git, branch, &target.oid).map_err(|source| {
            EngineError::MergeBase {
                branch: branch.name.clone(),
                source,
            }
        })?;

        let mut on_progress =
            |progress: CheckoutProgress| observer.checkout_progress(&branch.name, progress);
        let outcome = apply_update(git, branch, &classification, target, &mut on_progress)
            .map_err(|source| EngineError::Update {
                branch: branch.name.clone(),
                source,
            })?;

        let update = BranchUpdate {
            branch: branch.clone(),
            outcome,
        };
        observer.branch_done(&update);
        updates.push(update);
    }

    Ok(updates)
}

/// Classify each selected branch against the target without changing anything.
pub fn list(
    git: &Git,
    target: &Target,
    branches: &[BranchRef],
) -> Result<Vec<ClassifiedBranch>, EngineError> {
    classify_all(git, branches, &target.oid).map_err(EngineError::from)
}

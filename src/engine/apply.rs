//! engine::apply
//!
//! The update applier: moves an eligible branch to the target.
//!
//! # Algorithm
//!
//! 1. A branch already on the target, or not eligible for a fast-forward,
//!    short-circuits without touching the repository.
//! 2. If the branch is the active branch, the target's tree is checked out
//!    first with the conflict-safe strategy. Any conflict aborts the whole
//!    checkout and the ref is left alone.
//! 3. The branch ref is moved with a CAS update conditioned on the tip that
//!    was classified, so an external change in between fails the update.
//!
//! # Invariants
//!
//! - The ref of the active branch never moves unless its working tree has
//!   been brought to the target
//! - A checkout conflict leaves both the ref and the working tree untouched
//! - A branch never moves to a commit that does not contain its old tip

use std::path::PathBuf;

use super::classify::Classification;
use super::resolve::Target;
use crate::core::types::Oid;
use crate::git::{BranchRef, CheckoutProgress, Git, GitError};

/// Per-branch result of an apply attempt.
///
/// Fatal failures are not an outcome: they are returned as errors and stop
/// the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The branch was moved.
    Applied {
        /// Tip before the update
        from: Oid,
        /// Tip after the update
        to: Oid,
    },
    /// The branch already pointed at the target.
    AlreadyUpToDate,
    /// The branch has diverged from the target and was skipped.
    NotFastForward,
    /// The active branch's checkout would overwrite local changes.
    CheckoutConflict {
        /// Paths with conflicting local modifications
        paths: Vec<PathBuf>,
    },
}

impl UpdateOutcome {
    /// Whether the branch ref was moved.
    pub fn is_applied(&self) -> bool {
        matches!(self, UpdateOutcome::Applied { .. })
    }
}

/// Reflog message recorded for a fast-forward.
pub fn reflog_message(target: &Target) -> String {
    format!("git-ff: fast-forward to {}", target.spec)
}

/// Apply the update for one classified branch.
///
/// `on_progress` receives checkout progress when the branch is the active
/// one; it is advisory only.
///
/// # Errors
///
/// Checkout failures other than conflicts and ref update failures
/// (including a CAS mismatch) are fatal.
pub fn apply_update(
    git: &Git,
    branch: &BranchRef,
    classification: &Classification,
    target: &Target,
    on_progress: &mut dyn FnMut(CheckoutProgress),
) -> Result<UpdateOutcome, GitError> {
    if classification.up_to_date {
        return Ok(UpdateOutcome::AlreadyUpToDate);
    }
    if !classification.fast_forward {
        return Ok(UpdateOutcome::NotFastForward);
    }

    if classification.is_current {
        let checkout = git.checkout_tree_safe(&target.oid, on_progress)?;
        if !checkout.is_clean() {
            return Ok(UpdateOutcome::CheckoutConflict {
                paths: checkout.conflicts,
            });
        }
    }

    git.update_ref_cas(
        branch.refname().as_str(),
        &target.oid,
        &branch.tip,
        &reflog_message(target),
    )?;

    Ok(UpdateOutcome::Applied {
        from: branch.tip.clone(),
        to: target.oid.clone(),
    })
}

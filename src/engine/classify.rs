//! engine::classify
//!
//! Fast-forward classification of a branch against the target.
//!
//! For a branch with tip `B`, target `T` and merge base `M`:
//!
//! - `up_to_date` is `B == T`
//! - `fast_forward` is `B == M`: every commit on the branch is already an
//!   ancestor of the target, so moving the branch adds history and discards
//!   none
//! - `is_current` is the active-branch flag, independent of ancestry
//!
//! Branches whose history does not meet the target's at all (no merge
//! base) are never fast-forward eligible.

use crate::core::types::Oid;
use crate::git::{BranchRef, Git, GitError};

/// Relationship of a branch to the target, as shown in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// The branch already points at the target.
    AlreadyOnTarget,
    /// The branch can be fast-forwarded to the target.
    FastForward,
    /// The branch has commits the target does not contain.
    NonFastForward,
}

/// Classification result for one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The branch tip is an ancestor of (or equal to) the target
    pub fast_forward: bool,
    /// The branch is the active branch
    pub is_current: bool,
    /// The branch tip equals the target
    pub up_to_date: bool,
}

impl Classification {
    /// Collapse the three flags into the relation shown in listings.
    pub fn relation(&self) -> Relation {
        if self.up_to_date {
            Relation::AlreadyOnTarget
        } else if self.fast_forward {
            Relation::FastForward
        } else {
            Relation::NonFastForward
        }
    }

    /// Whether applying would move the branch.
    pub fn needs_update(&self) -> bool {
        self.fast_forward && !self.up_to_date
    }
}

/// A branch together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBranch {
    pub branch: BranchRef,
    pub classification: Classification,
}

/// Classify a branch from its tip, the target and their merge base.
///
/// `merge_base` is `None` when the two share no history.
///
/// # Example
///
/// ```
/// use git_ff::core::types::Oid;
/// use git_ff::engine::classify::{classify, Relation};
///
/// let base = Oid::new("1111111111111111111111111111111111111111").unwrap();
/// let target = Oid::new("2222222222222222222222222222222222222222").unwrap();
///
/// let behind = classify(&base, &target, Some(&base), false);
/// assert_eq!(behind.relation(), Relation::FastForward);
/// ```
pub fn classify(tip: &Oid, target: &Oid, merge_base: Option<&Oid>, is_current: bool) -> Classification {
    Classification {
        fast_forward: merge_base == Some(tip),
        is_current,
        up_to_date: tip == target,
    }
}

/// Classify a branch against the target, querying the merge base.
///
/// # Errors
///
/// Fails if the merge base cannot be computed, e.g. because the target
/// object does not exist.
pub fn classify_branch(git: &Git, branch: &BranchRef, target: &Oid) -> Result<Classification, GitError> {
    let merge_base = if &branch.tip == target {
        Some(branch.tip.clone())
    } else {
        git.merge_base(&branch.tip, target)?
    };

    Ok(classify(&branch.tip, target, merge_base.as_ref(), branch.is_head))
}

/// Classify every branch in order, stopping at the first failure.
pub fn classify_all(
    git: &Git,
    branches: &[BranchRef],
    target: &Oid,
) -> Result<Vec<ClassifiedBranch>, GitError> {
    branches
        .iter()
        .map(|branch| -> Result<ClassifiedBranch, GitError> {
            Ok(ClassifiedBranch {
                classification: classify_branch(git, branch, target)?,
                branch: branch.clone(),
            })
        })
        .collect()
}

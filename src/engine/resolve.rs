//! engine::resolve
//!
//! Target resolution: turn the user's target string into exactly one commit.
//!
//! # Resolution Order
//!
//! The first rule that matches wins; once a rule matches there is no
//! fallback to later rules.
//!
//! 1. A full-length hexadecimal object id, accepted as-is (existence is
//!    checked by the operations that use it)
//! 2. A local branch with exactly that name
//! 3. A remote-tracking branch with exactly that name
//! 4. A tag with exactly that name, which must name a commit
//!
//! Failure is fatal for the whole invocation.

use thiserror::Error;

use crate::core::types::{BranchName, BranchScope, Oid};
use crate::git::{Git, GitError, TagLookup};

/// Errors from target resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Nothing matched the target string.
    #[error("can't resolve '{spec}': not a commit id, branch, or tag")]
    Unresolved {
        /// The target string as given
        spec: String,
    },

    /// A tag matched, but it does not name a commit.
    #[error("tag '{tag}' doesn't point to a commit (it points to a {kind})")]
    TagNotCommit {
        /// The tag name
        tag: String,
        /// Kind of object the tag points to
        kind: String,
    },

    /// The repository could not be queried.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// How a target string was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    /// Literal object id
    ObjectId,
    /// Tip of a local branch
    LocalBranch(BranchName),
    /// Tip of a remote-tracking branch
    RemoteBranch(BranchName),
    /// Commit named by a tag
    Tag(String),
}

impl std::fmt::Display for TargetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetSource::ObjectId => write!(f, "object id"),
            TargetSource::LocalBranch(name) => write!(f, "local branch {}", name),
            TargetSource::RemoteBranch(name) => write!(f, "remote-tracking branch {}", name),
            TargetSource::Tag(name) => write!(f, "tag {}", name),
        }
    }
}

/// A resolved target commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// The target string as the user typed it (used in messages)
    pub spec: String,
    /// The commit the target resolved to
    pub oid: Oid,
    /// Which rule matched
    pub source: TargetSource,
}

/// Resolve a target string to a commit.
///
/// # Errors
///
/// - [`ResolveError::Unresolved`] if no rule matches
/// - [`ResolveError::TagNotCommit`] if the matching tag names a tree, blob
///   or another tag
/// - [`ResolveError::Git`] if a lookup fails
pub fn resolve_target(git: &Git, spec: &str) -> Result<Target, ResolveError> {
    let target = |oid, source| Target {
        spec: spec.to_string(),
        oid,
        source,
    };

    if let Some(oid) = Git::parse_object_id(spec) {
        return Ok(target(oid, TargetSource::ObjectId));
    }

    // Strings Git would reject as branch names can still be tag names
    if let Ok(name) = BranchName::new(spec) {
        if let Some(branch) = git.find_branch(&name, BranchScope::Local)? {
            return Ok(target(branch.tip, TargetSource::LocalBranch(name)));
        }
        if let Some(branch) = git.find_branch(&name, BranchScope::Remote)? {
            return Ok(target(branch.tip, TargetSource::RemoteBranch(name)));
        }
    }

    match git.find_tag(spec)? {
        TagLookup::Commit(oid) => Ok(target(oid, TargetSource::Tag(spec.to_string()))),
        TagLookup::NotACommit { kind } => Err(ResolveError::TagNotCommit {
            tag: spec.to_string(),
            kind,
        }),
        TagLookup::NotFound => Err(ResolveError::Unresolved {
            spec: spec.to_string(),
        }),
    }
}

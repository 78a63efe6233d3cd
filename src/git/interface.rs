//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module provides the **single doorway** to all Git operations in
//! git-ff. All repository reads and writes flow through [`Git`], which
//! returns strong types and normalizes libgit2 errors into typed failure
//! categories.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//! - [`GitError::ObjectNotFound`]: Requested object does not exist
//! - [`GitError::CasFailed`]: Compare-and-swap precondition failed
//!
//! # Example
//!
//! ```ignore
//! use git_ff::core::types::BranchScope;
//! use git_ff::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! for branch in git.list_branches(BranchScope::Local)? {
//!     println!("{} is at {}", branch.name, branch.tip.short(7));
//! }
//! ```

use std::path::{Path, PathBuf};

use git2::build::CheckoutBuilder;
use git2::{BranchType, CheckoutNotificationType, ErrorClass, ErrorCode, ObjectType};
use thiserror::Error;

use crate::core::types::{BranchName, BranchScope, Oid, RefName, TypeError};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Compare-and-swap precondition failed.
    ///
    /// The ref changed between the moment it was read and the moment it
    /// was updated. The update was not applied.
    #[error("CAS failed for {refname}: expected {expected}, found {actual}")]
    CasFailed {
        /// The ref being updated
        refname: String,
        /// The expected old value
        expected: String,
        /// The actual current value
        actual: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Invalid object id format.
    #[error("invalid object id: {oid}")]
    InvalidOid {
        /// The invalid OID string
        oid: String,
    },

    /// Invalid ref name format.
    #[error("invalid ref name: {message}")]
    InvalidRefName {
        /// Description of the problem
        message: String,
    },

    /// Permission or filesystem error.
    #[error("repository access error: {message}")]
    AccessError {
        /// Description of the error
        message: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            ErrorCode::NotFound => {
                if context.starts_with("refs/") || context.contains("ref") {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            ErrorCode::InvalidSpec => GitError::InvalidOid {
                oid: context.to_string(),
            },
            ErrorCode::Locked => GitError::AccessError {
                message: format!("repository is locked: {}", err.message()),
            },
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }

    fn internal(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidOid(msg) => GitError::InvalidOid { oid: msg },
            TypeError::InvalidBranchName(msg) => GitError::InvalidRefName { message: msg },
        }
    }
}

/// A branch together with its tip, as read from the ref store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Short branch name (`main`, `origin/main`)
    pub name: BranchName,
    /// Namespace the branch lives in
    pub scope: BranchScope,
    /// The commit the branch points to
    pub tip: Oid,
    /// Whether HEAD points at this branch (always false for remote-tracking)
    pub is_head: bool,
}

impl BranchRef {
    /// The full ref name of this branch.
    pub fn refname(&self) -> RefName {
        RefName::for_branch(&self.name, self.scope)
    }
}

/// Result of looking up a tag by its exact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLookup {
    /// No tag has this name.
    NotFound,
    /// The tag names a commit (directly, or through one annotation).
    Commit(Oid),
    /// The tag names something that is not a commit.
    NotACommit {
        /// Kind of the object the tag points at ("tree", "blob", "tag")
        kind: String,
    },
}

/// Progress of a running checkout, reported after each processed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutProgress {
    /// Files processed so far
    pub completed: usize,
    /// Files the checkout will process in total
    pub total: usize,
}

impl CheckoutProgress {
    /// Completion percentage, 0 to 100.
    ///
    /// An empty checkout counts as complete.
    ///
    /// # Example
    ///
    /// ```
    /// use git_ff::git::CheckoutProgress;
    ///
    /// assert_eq!(CheckoutProgress { completed: 1, total: 4 }.percent(), 25);
    /// assert_eq!(CheckoutProgress { completed: 0, total: 0 }.percent(), 100);
    /// ```
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.completed.min(self.total) * 100 / self.total
        }
    }
}

/// Result of a conflict-safe checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutOutcome {
    /// Paths whose local modifications the checkout would have overwritten.
    ///
    /// When non-empty, the checkout was aborted and nothing was written.
    pub conflicts: Vec<PathBuf>,
}

impl CheckoutOutcome {
    /// Check if the checkout was applied without conflicts.
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// The Git interface.
///
/// This is the **single point of interaction** with Git. No other module
/// imports `git2` directly.
///
/// Owning a `Git` value is owning the repository handle and the libgit2
/// resources behind it: they are acquired in [`Git::open`] and released when
/// the value is dropped, on every exit path.
///
/// # CAS Semantics
///
/// Ref mutations use compare-and-swap semantics: an update only succeeds if
/// the ref still holds the value observed before the update was decided.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Get the path of the .git directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Get the path of the working directory.
    pub fn work_dir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Ref Resolution
    // =========================================================================

    /// Parse a literal object id.
    ///
    /// Accepts full-length hexadecimal ids only. The object is not looked
    /// up; whether it exists is left to the operations that use it.
    ///
    /// # Example
    ///
    /// ```
    /// use git_ff::git::Git;
    ///
    /// assert!(Git::parse_object_id("abc123def4567890abc123def4567890abc12345").is_some());
    /// assert!(Git::parse_object_id("abc123d").is_none());
    /// assert!(Git::parse_object_id("main").is_none());
    /// ```
    pub fn parse_object_id(spec: &str) -> Option<Oid> {
        Oid::new(spec).ok()
    }

    /// Get the active branch name, if on a branch.
    ///
    /// Returns `None` if HEAD is detached or unborn.
    pub fn current_branch(&self) -> Result<Option<BranchName>, GitError> {
        let head = match self.repo.head() {
            Ok(h) => h,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };

        if head.is_branch() {
            if let Some(name) = head.shorthand() {
                return Ok(Some(BranchName::new(name)?));
            }
        }

        Ok(None)
    }

    /// Look up a branch by exact name in the given scope.
    ///
    /// A symbolic remote-tracking ref (such as `origin/HEAD`) is followed to
    /// the branch it names. Returns `None` if no such branch exists.
    pub fn find_branch(
        &self,
        name: &BranchName,
        scope: BranchScope,
    ) -> Result<Option<BranchRef>, GitError> {
        let refname = RefName::for_branch(name, scope);
        let branch = match self.repo.find_branch(name.as_str(), branch_type(scope)) {
            Ok(b) => b,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(GitError::from_git2(e, refname.as_str())),
        };

        let resolved = branch
            .get()
            .resolve()
            .map_err(|e| GitError::from_git2(e, refname.as_str()))?;
        let tip = match resolved.target() {
            Some(oid) => from_git2_oid(oid)?,
            None => return Ok(None),
        };

        Ok(Some(BranchRef {
            name: name.clone(),
            scope,
            tip,
            is_head: scope == BranchScope::Local && branch.is_head(),
        }))
    }

    /// Look up a tag by exact name, visiting every tag in the repository.
    ///
    /// Lightweight tags resolve to the commit they point at. Annotated tags
    /// are unwrapped exactly once: if the annotation's target is not a
    /// commit, the lookup reports [`TagLookup::NotACommit`].
    pub fn find_tag(&self, name: &str) -> Result<TagLookup, GitError> {
        let wanted = format!("refs/tags/{}", name);
        let mut found = None;

        self.repo
            .tag_foreach(|oid, refname| {
                if found.is_none() && refname == wanted.as_bytes() {
                    found = Some(oid);
                }
                true
            })
            .map_err(GitError::internal)?;

        let Some(oid) = found else {
            return Ok(TagLookup::NotFound);
        };

        let object = self
            .repo
            .find_object(oid, None)
            .map_err(|e| GitError::from_git2(e, &oid.to_string()))?;

        match object.kind() {
            Some(ObjectType::Commit) => Ok(TagLookup::Commit(from_git2_oid(oid)?)),
            Some(ObjectType::Tag) => {
                let tag = object.as_tag().ok_or_else(|| GitError::Internal {
                    message: format!("tag object {} could not be read", oid),
                })?;
                match tag.target_type() {
                    Some(ObjectType::Commit) => Ok(TagLookup::Commit(from_git2_oid(tag.target_id())?)),
                    other => Ok(TagLookup::NotACommit {
                        kind: object_kind_name(other),
                    }),
                }
            }
            other => Ok(TagLookup::NotACommit {
                kind: object_kind_name(other),
            }),
        }
    }

    // =========================================================================
    // Branch Enumeration
    // =========================================================================

    /// List all branches in a scope, sorted by name.
    ///
    /// Symbolic refs (such as `origin/HEAD`) and branches whose names Git
    /// would not accept are skipped.
    pub fn list_branches(&self, scope: BranchScope) -> Result<Vec<BranchRef>, GitError> {
        let branches = self
            .repo
            .branches(Some(branch_type(scope)))
            .map_err(GitError::internal)?;

        let mut result = Vec::new();
        for branch in branches {
            let (branch, _) = branch.map_err(GitError::internal)?;

            let name = match branch.name().ok().flatten().map(BranchName::new) {
                Some(Ok(name)) => name,
                _ => continue,
            };
            let Some(target) = branch.get().target() else {
                continue;
            };

            result.push(BranchRef {
                name,
                scope,
                tip: from_git2_oid(target)?,
                is_head: scope == BranchScope::Local && branch.is_head(),
            });
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    // =========================================================================
    // CAS Ref Operations
    // =========================================================================

    /// Update a ref with compare-and-swap semantics.
    ///
    /// The ref store only applies the update if the ref still points at
    /// `expected_old`; the check and the write happen atomically under the
    /// ref lock.
    ///
    /// # Errors
    ///
    /// - [`GitError::CasFailed`] if the current value doesn't match expected
    /// - [`GitError::RefNotFound`] if the ref doesn't exist
    pub fn update_ref_cas(
        &self,
        refname: &str,
        new_oid: &Oid,
        expected_old: &Oid,
        message: &str,
    ) -> Result<(), GitError> {
        let new = to_git2_oid(new_oid)?;
        let old = to_git2_oid(expected_old)?;

        match self.repo.reference_matching(refname, new, true, old, message) {
            Ok(_) => Ok(()),
            Err(e) if e.code() == ErrorCode::Modified => {
                let actual = self
                    .try_resolve_ref_raw(refname)?
                    .unwrap_or_else(|| "<none>".to_string());
                Err(GitError::CasFailed {
                    refname: refname.to_string(),
                    expected: expected_old.to_string(),
                    actual,
                })
            }
            Err(e) => Err(GitError::from_git2(e, refname)),
        }
    }

    /// Try to resolve a ref to its raw OID string (without validation).
    fn try_resolve_ref_raw(&self, refname: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_reference(refname) {
            Ok(reference) => {
                let resolved = reference.resolve().unwrap_or(reference);
                let oid = resolved.target().ok_or_else(|| GitError::Internal {
                    message: format!("ref {} has no target", refname),
                })?;
                Ok(Some(oid.to_string()))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::from_git2(e, refname)),
        }
    }

    // =========================================================================
    // Ancestry Queries
    // =========================================================================

    /// Find the merge base (nearest common ancestor) of two commits.
    ///
    /// Returns `None` if the commits share no history.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if either commit doesn't exist
    pub fn merge_base(&self, oid1: &Oid, oid2: &Oid) -> Result<Option<Oid>, GitError> {
        let git_oid1 = to_git2_oid(oid1)?;
        let git_oid2 = to_git2_oid(oid2)?;

        match self.repo.merge_base(git_oid1, git_oid2) {
            Ok(oid) => Ok(Some(from_git2_oid(oid)?)),
            Err(e) if e.code() == ErrorCode::NotFound && e.class() == ErrorClass::Merge => {
                Ok(None)
            }
            Err(e) if e.code() == ErrorCode::NotFound => Err(GitError::ObjectNotFound {
                oid: format!("{} or {}", oid1, oid2),
            }),
            Err(e) => Err(GitError::internal(e)),
        }
    }

    // =========================================================================
    // Working Tree
    // =========================================================================

    /// Check out the tree of a commit into the working directory, safely.
    ///
    /// Uses the conflict-safe strategy: a file with local modifications
    /// that the checkout would need to overwrite is reported as a conflict
    /// instead. Every conflicting path is collected; if there is at least
    /// one, the checkout is aborted before any file is written and the
    /// returned outcome lists the paths.
    ///
    /// `on_progress` is called after each processed file. HEAD is not
    /// touched.
    pub fn checkout_tree_safe(
        &self,
        oid: &Oid,
        on_progress: &mut dyn FnMut(CheckoutProgress),
    ) -> Result<CheckoutOutcome, GitError> {
        self.work_dir()?;

        let commit = self
            .repo
            .find_commit(to_git2_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        let mut conflicts = Vec::new();
        let result = {
            let mut builder = CheckoutBuilder::new();
            builder.safe().notify_on(CheckoutNotificationType::CONFLICT);
            builder.notify(|_why, path, _baseline, _target, _workdir| {
                if let Some(path) = path {
                    conflicts.push(path.to_path_buf());
                }
                true
            });
            builder.progress(|_path, completed, total| {
                on_progress(CheckoutProgress { completed, total });
            });

            self.repo
                .checkout_tree(commit.as_object(), Some(&mut builder))
        };

        match result {
            _ if !conflicts.is_empty() => Ok(CheckoutOutcome { conflicts }),
            Ok(()) => Ok(CheckoutOutcome::default()),
            Err(e) => Err(GitError::from_git2(e, oid.as_str())),
        }
    }

    // =========================================================================
    // Commit Information
    // =========================================================================

    /// Get the committer timestamp of a commit.
    ///
    /// # Errors
    ///
    /// - [`GitError::ObjectNotFound`] if the commit doesn't exist
    pub fn commit_time(&self, oid: &Oid) -> Result<chrono::DateTime<chrono::Utc>, GitError> {
        let commit = self
            .repo
            .find_commit(to_git2_oid(oid)?)
            .map_err(|e| GitError::from_git2(e, oid.as_str()))?;

        Ok(chrono::DateTime::from_timestamp(commit.time().seconds(), 0)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH))
    }
}

fn branch_type(scope: BranchScope) -> BranchType {
    match scope {
        BranchScope::Local => BranchType::Local,
        BranchScope::Remote => BranchType::Remote,
    }
}

fn object_kind_name(kind: Option<ObjectType>) -> String {
    kind.map(|k| k.str()).unwrap_or("unknown object").to_string()
}

fn to_git2_oid(oid: &Oid) -> Result<git2::Oid, GitError> {
    git2::Oid::from_str(oid.as_str()).map_err(|e| GitError::from_git2(e, oid.as_str()))
}

fn from_git2_oid(oid: git2::Oid) -> Result<Oid, GitError> {
    Ok(Oid::new(oid.to_string())?)
}

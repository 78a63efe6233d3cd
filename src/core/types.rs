//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name (local or remote-tracking)
//! - [`BranchScope`] - Which ref namespace a branch lives in
//! - [`Oid`] - Git object identifier (SHA)
//! - [`RefName`] - Validated Git reference name
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the engine only ever handles identifiers that
//! Git itself would accept.
//!
//! # Examples
//!
//! ```
//! use git_ff::core::types::{BranchName, BranchScope, Oid, RefName};
//!
//! let branch = BranchName::new("feature/my-branch").unwrap();
//! let oid = Oid::new("abc123def4567890abc123def4567890abc12345").unwrap();
//! let refname = RefName::for_branch(&branch, BranchScope::Local);
//! assert_eq!(refname.as_str(), "refs/heads/feature/my-branch");
//!
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(Oid::new("not-a-sha").is_err());
//! # let _ = oid;
//! ```

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidOid(String),
}

/// Characters Git never allows anywhere in a ref name.
const INVALID_REF_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];

/// Apply the rules of `git check-ref-format` shared by branch and ref names.
///
/// Returns a description of the first violated rule.
fn check_ref_format(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("cannot be empty".into());
    }
    if name.starts_with('/') {
        return Err("cannot start with '/'".into());
    }
    if name.ends_with('/') {
        return Err("cannot end with '/'".into());
    }
    if name.ends_with('.') {
        return Err("cannot end with '.'".into());
    }

    for seq in ["..", "@{", "//"] {
        if name.contains(seq) {
            return Err(format!("cannot contain '{seq}'"));
        }
    }

    if let Some(c) = name.chars().find(|c| INVALID_REF_CHARS.contains(c)) {
        return Err(format!("cannot contain '{c}'"));
    }
    if name.chars().any(|c| c.is_ascii_control()) {
        return Err("cannot contain control characters".into());
    }

    for component in name.split('/') {
        if component.starts_with('.') {
            return Err("path component cannot start with '.'".into());
        }
        if component.ends_with(".lock") {
            return Err("path component cannot end with '.lock'".into());
        }
    }

    Ok(())
}

/// A validated Git branch name.
///
/// Holds the short name as Git prints it: `main` for a local branch,
/// `origin/main` for a remote-tracking one. Besides the generic ref format
/// rules, a branch name cannot start with `-` and cannot be exactly `@`.
///
/// # Example
///
/// ```
/// use git_ff::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("-flag").is_err());
/// assert!(BranchName::new("branch.lock").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();

        if name == "@" {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be '@' (reserved)".into(),
            ));
        }
        if name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '-'".into(),
            ));
        }
        check_ref_format(&name)
            .map_err(|rule| TypeError::InvalidBranchName(format!("branch name {rule}")))?;

        Ok(Self(name))
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this (remote-tracking) branch belongs to `remote`.
    ///
    /// # Example
    ///
    /// ```
    /// use git_ff::core::types::BranchName;
    ///
    /// let name = BranchName::new("origin/main").unwrap();
    /// assert!(name.is_on_remote("origin"));
    /// assert!(!name.is_on_remote("orig"));
    /// ```
    pub fn is_on_remote(&self, remote: &str) -> bool {
        self.0
            .strip_prefix(remote)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Namespace a branch is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchScope {
    /// `refs/heads/*`
    Local,
    /// `refs/remotes/*`
    Remote,
}

impl BranchScope {
    /// The ref prefix of this namespace, including the trailing slash.
    pub fn ref_prefix(self) -> &'static str {
        match self {
            BranchScope::Local => "refs/heads/",
            BranchScope::Remote => "refs/remotes/",
        }
    }
}

impl std::fmt::Display for BranchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BranchScope::Local => write!(f, "local"),
            BranchScope::Remote => write!(f, "remote-tracking"),
        }
    }
}

/// A Git object identifier (SHA-1).
///
/// Only the full-length hexadecimal form is accepted; abbreviated ids are
/// not a valid `Oid`. OIDs are normalized to lowercase for consistency.
///
/// # Example
///
/// ```
/// use git_ff::core::types::Oid;
///
/// let oid = Oid::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
/// assert_eq!(oid.as_str(), "abc123def4567890abc123def4567890abc12345");
/// assert_eq!(oid.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid(String);

impl Oid {
    /// Create a new validated object id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOid` if the string is not a full-length hex OID.
    pub fn new(oid: impl Into<String>) -> Result<Self, TypeError> {
        let oid = oid.into().to_ascii_lowercase();

        // The linked libgit2 only handles SHA-1 ids
        if oid.len() != 40 {
            return Err(TypeError::InvalidOid(format!(
                "expected 40 hex characters, got {}",
                oid.len()
            )));
        }
        if !oid.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidOid(
                "object id must be hexadecimal".into(),
            ));
        }

        Ok(Self(oid))
    }

    /// Get an abbreviated form of the OID.
    ///
    /// Returns the first `len` characters, or the full OID if `len` exceeds it.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    /// Get the object id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Oid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated Git reference name.
///
/// # Example
///
/// ```
/// use git_ff::core::types::{BranchName, BranchScope, RefName};
///
/// let branch = BranchName::new("origin/main").unwrap();
/// let refname = RefName::for_branch(&branch, BranchScope::Remote);
/// assert_eq!(refname.as_str(), "refs/remotes/origin/main");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefName(String);

impl RefName {
    /// Create the full ref name of a branch in the given scope.
    pub fn for_branch(branch: &BranchName, scope: BranchScope) -> Self {
        // Branch names are validated and both prefixes are valid refname components
        Self(format!("{}{}", scope.ref_prefix(), branch.as_str()))
    }

    /// Get the ref name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

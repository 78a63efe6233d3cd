//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. All repository reads and writes
//! flow through this interface. No other module should import `git2`, and
//! nothing shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Branch and tag lookup, branch enumeration
//! - Ancestry queries (merge-base)
//! - Conflict-safe checkout with progress reporting
//! - CAS ref updates
//!
//! # Invariants
//!
//! - All ref updates use CAS (compare-and-swap) semantics
//! - The engine only ever holds object ids; the commit graph stays in the
//!   object database and is queried through this interface
//! - All operations return strong types (Oid, BranchName, RefName)

mod interface;

pub use interface::{
    BranchRef, CheckoutOutcome, CheckoutProgress, Git, GitError, TagLookup,
};

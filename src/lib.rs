//! git-ff - Fast-forward branches to a target commit
//!
//! `git-ff` moves one or more branches forward to a target commit, but only
//! when the move is a pure fast-forward: no commit reachable from the old tip
//! is ever discarded. When the branch being moved is the active branch, the
//! working tree is checked out to the target first, and the ref only moves if
//! that checkout succeeds without conflicts.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Target resolution, branch selection, classification, update
//! - [`core`] - Domain types and configuration
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - Output formatting, reports and checkout progress
//!
//! # Correctness Invariants
//!
//! 1. A branch tip only ever moves to a descendant of (or equal to) its old tip
//! 2. The active branch's ref and working tree move together or not at all
//! 3. Every ref update is conditioned on the previously observed tip

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod ui;

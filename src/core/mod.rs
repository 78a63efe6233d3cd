//! core
//!
//! Core domain types and configuration for git-ff.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, BranchScope, Oid, RefName
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Config schemas are strict: unknown keys are rejected

pub mod config;
pub mod types;

//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing
//! - [`report`] - Listing and apply-result layouts
//! - [`progress`] - Checkout progress line
//!
//! # Design
//!
//! All output goes through this module so that quiet and debug modes are
//! honored consistently.

pub mod output;
pub mod progress;
pub mod report;

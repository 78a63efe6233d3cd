//! ui::report
//!
//! Rendering of list rows, apply results and recency rows.
//!
//! Everything here returns strings; printing is left to the caller so the
//! layouts can be tested directly.

use std::fmt::Write as _;

use chrono::{DateTime, Local};

use crate::engine::{BranchUpdate, ClassifiedBranch, RecentBranch, Relation, UpdateOutcome};

/// Which rows a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    /// Every branch, with its relation to the target.
    #[default]
    All,
    /// Names of fast-forward eligible branches (including those already on
    /// the target).
    OnlyFastForward,
    /// Names of branches that cannot be fast-forwarded.
    OnlyNonFastForward,
}

impl ListFilter {
    fn keeps(self, row: &ClassifiedBranch) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::OnlyFastForward => row.classification.fast_forward,
            ListFilter::OnlyNonFastForward => !row.classification.fast_forward,
        }
    }
}

fn marker(is_head: bool) -> &'static str {
    if is_head {
        "* "
    } else {
        "  "
    }
}

/// Render list-mode rows.
///
/// With [`ListFilter::All`] each row is the active-branch marker, the name
/// padded to the longest name plus two, and the relation to `target`. The
/// filtered listings print bare names, one per line.
pub fn list_rows(rows: &[ClassifiedBranch], target: &str, filter: ListFilter) -> Vec<String> {
    let width = rows
        .iter()
        .map(|r| r.branch.name.as_str().chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    rows.iter()
        .filter(|row| filter.keeps(row))
        .map(|row| {
            let name = row.branch.name.as_str();
            if filter != ListFilter::All {
                return name.to_string();
            }
            let relation = match row.classification.relation() {
                Relation::AlreadyOnTarget => "already on",
                Relation::FastForward => "fast-forward to",
                Relation::NonFastForward => "non-fast-forward to",
            };
            format!(
                "{}{:<width$}{} {}",
                marker(row.branch.is_head),
                name,
                relation,
                target,
                width = width
            )
        })
        .collect()
}

/// A rendered apply result, split by the stream it belongs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyLine {
    /// Progress report for stdout.
    Out(String),
    /// Skipped-branch report for stderr.
    Err(String),
}

/// Render the result of one branch update.
///
/// Object ids in the `Applied` line are shortened to `abbrev` digits.
pub fn apply_lines(update: &BranchUpdate, target: &str, abbrev: usize) -> Vec<ApplyLine> {
    let name = update.branch.name.as_str();
    match &update.outcome {
        UpdateOutcome::Applied { from, to } => vec![ApplyLine::Out(format!(
            "fast-forwarded {} to {} ({}..{})",
            name,
            target,
            from.short(abbrev),
            to.short(abbrev)
        ))],
        UpdateOutcome::AlreadyUpToDate => {
            vec![ApplyLine::Out(format!("branch {} already on {}", name, target))]
        }
        UpdateOutcome::NotFastForward => {
            vec![ApplyLine::Err(format!("not possible to fast-forward {}", name))]
        }
        UpdateOutcome::CheckoutConflict { paths } => {
            let mut lines = Vec::with_capacity(paths.len() + 1);
            lines.push(ApplyLine::Err(format!(
                "cannot fast-forward {}, checkout conflict",
                name
            )));
            lines.extend(
                paths
                    .iter()
                    .map(|p| ApplyLine::Err(format!("  {}", p.display()))),
            );
            lines
        }
    }
}

/// Render recency rows: marker, padded name, then the local commit time.
pub fn recent_rows(branches: &[RecentBranch]) -> Vec<String> {
    let width = branches
        .iter()
        .map(|b| b.name.as_str().chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    branches
        .iter()
        .map(|b| {
            let mut row = String::new();
            let local: DateTime<Local> = b.last_commit.with_timezone(&Local);
            let _ = write!(
                row,
                "{}{:<width$}({})",
                marker(b.is_head),
                b.name.as_str(),
                local.format("%Y-%m-%d %H:%M:%S"),
                width = width
            );
            row
        })
        .collect()
}

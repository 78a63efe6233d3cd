//! engine::recent
//!
//! Branch recency listing: branches ordered by the time of their tip commit.
//!
//! This is a plain sort over commit timestamps; no ancestry is involved.

use chrono::{DateTime, Utc};

use crate::core::types::{BranchName, BranchScope};
use crate::git::{Git, GitError};

/// Which branches to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentFilter {
    /// Local branches only.
    Local,
    /// Local and remote-tracking branches.
    All,
    /// Remote-tracking branches of one remote.
    Remote(String),
}

/// A branch and the time of its tip commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentBranch {
    pub name: BranchName,
    pub is_head: bool,
    pub last_commit: DateTime<Utc>,
}

/// List branches, most recently committed first.
///
/// Branches with equal timestamps keep name order.
pub fn recent_branches(git: &Git, filter: &RecentFilter) -> Result<Vec<RecentBranch>, GitError> {
    let branches = match filter {
        RecentFilter::Local => git.list_branches(BranchScope::Local)?,
        RecentFilter::All => {
            let mut all = git.list_branches(BranchScope::Local)?;
            all.extend(git.list_branches(BranchScope::Remote)?);
            all
        }
        RecentFilter::Remote(remote) => git
            .list_branches(BranchScope::Remote)?
            .into_iter()
            .filter(|b| b.name.is_on_remote(remote))
            .collect(),
    };

    let mut result = branches
        .into_iter()
        .map(|b| -> Result<RecentBranch, GitError> {
            Ok(RecentBranch {
                last_commit: git.commit_time(&b.tip)?,
                name: b.name,
                is_head: b.is_head,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    sort_newest_first(&mut result);
    Ok(result)
}

fn sort_newest_first(branches: &mut [RecentBranch]) {
    // Stable sort keeps name order among equal timestamps
    branches.sort_by(|a, b| b.last_commit.cmp(&a.last_commit));
}

//! list command - Show how each branch relates to the target

use super::{open, resolve, select, verbosity};
use crate::engine::{self, Context, Selection};
use crate::ui::output;
use crate::ui::report::{self, ListFilter};
use anyhow::Result;

/// List the selected branches and whether each could be fast-forwarded.
///
/// Nothing in the repository is changed.
pub fn list(
    ctx: &Context,
    target: &str,
    selection: &Selection,
    include_remotes: bool,
    filter: ListFilter,
) -> Result<()> {
    let verbosity = verbosity(ctx);
    let (git, _config) = open(ctx)?;

    let target = resolve(&git, target, verbosity)?;
    let selected = select(&git, selection, include_remotes, verbosity)?;

    let rows = engine::list(&git, &target, &selected.branches)?;
    for row in &rows {
        output::debug(
            format!("{}: {:?}", row.branch.name, row.classification.relation()),
            verbosity,
        );
    }

    for line in report::list_rows(&rows, &target.spec, filter) {
        output::print(line, verbosity);
    }

    Ok(())
}

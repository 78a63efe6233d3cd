//! fast-forward command - Move selected branches to the target

use super::{open, resolve, select, verbosity};
use crate::core::types::BranchName;
use crate::engine::{self, BranchUpdate, Context, Selection, UpdateObserver, UpdateOutcome};
use crate::git::CheckoutProgress;
use crate::ui::output::{self, Verbosity};
use crate::ui::progress::ProgressRenderer;
use crate::ui::report::{self, ApplyLine};
use anyhow::Result;

/// Prints each branch result as soon as the engine reports it.
struct Printer<'a> {
    target: &'a str,
    abbrev: usize,
    verbosity: Verbosity,
    progress: ProgressRenderer,
}

impl UpdateObserver for Printer<'_> {
    fn checkout_progress(&mut self, _branch: &BranchName, progress: CheckoutProgress) {
        self.progress.update(progress);
    }

    fn branch_done(&mut self, update: &BranchUpdate) {
        self.progress.finish();

        if let UpdateOutcome::Applied { from, to } = &update.outcome {
            output::debug(
                format!("{}: merge base {} is the old tip, moved to {}", update.branch.name, from, to),
                self.verbosity,
            );
        }

        for line in report::apply_lines(update, self.target, self.abbrev) {
            match line {
                ApplyLine::Out(line) => output::print(line, self.verbosity),
                ApplyLine::Err(line) => output::print_err(line, self.verbosity),
            }
        }
    }
}

/// Fast-forward the selected local branches to `target`.
///
/// Branches that cannot be fast-forwarded, or whose checkout conflicts with
/// local changes, are reported and skipped. Any other failure stops the run.
pub fn fast_forward(ctx: &Context, target: &str, selection: &Selection) -> Result<()> {
    let verbosity = verbosity(ctx);
    let (git, config) = open(ctx)?;

    let target = resolve(&git, target, verbosity)?;
    let selected = select(&git, selection, false, verbosity)?;

    let mut printer = Printer {
        target: &target.spec,
        abbrev: config.abbrev(),
        verbosity,
        progress: ProgressRenderer::new(ctx.progress && config.progress() && !ctx.quiet),
    };

    let updates = match engine::fast_forward(&git, &target, &selected.branches, &mut printer) {
        Ok(updates) => updates,
        Err(err) => {
            // A checkout may have failed mid-line
            printer.progress.finish();
            return Err(err.into());
        }
    };

    let applied = updates.iter().filter(|u| u.outcome.is_applied()).count();
    output::debug(
        format!("{} of {} branch(es) fast-forwarded", applied, updates.len()),
        verbosity,
    );

    Ok(())
}

//! ui::progress
//!
//! Checkout progress on stderr.
//!
//! The line is redrawn in place with a carriage return and finished with a
//! newline once the checkout reports its last file. Nothing is drawn unless
//! stderr is a terminal.

use std::io::{self, IsTerminal, Write};

use crate::git::CheckoutProgress;

/// Format one progress line (without the leading carriage return).
pub fn progress_line(progress: CheckoutProgress) -> String {
    format!(
        "Checking out files: {}% ({}/{})",
        progress.percent(),
        progress.completed,
        progress.total
    )
}

/// Draws checkout progress for one branch at a time.
#[derive(Debug)]
pub struct ProgressRenderer {
    enabled: bool,
    drawn: bool,
}

impl ProgressRenderer {
    /// Create a renderer that draws only when `wanted` and stderr is a
    /// terminal.
    pub fn new(wanted: bool) -> Self {
        Self::with_enabled(wanted && io::stderr().is_terminal())
    }

    fn with_enabled(enabled: bool) -> Self {
        Self {
            enabled,
            drawn: false,
        }
    }

    /// Whether anything will be drawn.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Redraw the progress line.
    pub fn update(&mut self, progress: CheckoutProgress) {
        if !self.enabled || progress.total == 0 {
            return;
        }
        let mut err = io::stderr().lock();
        let _ = write!(err, "\r{}", progress_line(progress));
        let _ = err.flush();
        self.drawn = true;

        if progress.completed >= progress.total {
            self.finish();
        }
    }

    /// Terminate a partially drawn line so later output starts cleanly.
    pub fn finish(&mut self) {
        if self.drawn {
            let _ = writeln!(io::stderr());
            self.drawn = false;
        }
    }
}

impl Drop for ProgressRenderer {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        let line = progress_line(CheckoutProgress {
            completed: 3,
            total: 12,
        });
        assert_eq!(line, "Checking out files: 25% (3/12)");
    }

    #[test]
    fn complete_line() {
        let line = progress_line(CheckoutProgress {
            completed: 7,
            total: 7,
        });
        assert_eq!(line, "Checking out files: 100% (7/7)");
    }

    #[test]
    fn disabled_renderer_draws_nothing() {
        let mut renderer = ProgressRenderer::with_enabled(false);
        renderer.update(CheckoutProgress {
            completed: 1,
            total: 2,
        });
        assert!(!renderer.drawn);
        assert!(!renderer.is_enabled());
    }

    #[test]
    fn finish_terminates_partial_line() {
        let mut renderer = ProgressRenderer::with_enabled(true);
        renderer.update(CheckoutProgress {
            completed: 1,
            total: 4,
        });
        assert!(renderer.drawn);

        renderer.finish();
        assert!(!renderer.drawn);

        // Nothing left to terminate
        renderer.finish();
        assert!(!renderer.drawn);
    }

    #[test]
    fn last_file_finishes_line() {
        let mut renderer = ProgressRenderer::with_enabled(true);
        renderer.update(CheckoutProgress {
            completed: 4,
            total: 4,
        });
        assert!(!renderer.drawn);
    }

    #[test]
    fn not_wanted_is_disabled() {
        assert!(!ProgressRenderer::new(false).is_enabled());
    }
}

use std::process::ExitCode;

use git_ff::cli::{self, RecentCli};
use git_ff::ui::output;

fn main() -> ExitCode {
    let cli = match RecentCli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => return cli::exit_for_parse_error(err),
    };

    match cli::run_recent(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

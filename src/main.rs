use std::process::ExitCode;

use git_ff::cli::{self, Cli};
use git_ff::ui::output;

fn main() -> ExitCode {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(err) => return cli::exit_for_parse_error(err),
    };

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

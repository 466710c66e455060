//! Subcommand handlers. `main` parses arguments and logging, then hands over here.

pub mod compare;
pub mod plot;
pub mod select;

use crate::args::{Args, Command};

/// What: Run the subcommand named on the command line.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` when the subcommand finished; stage failures inside `plot` and
///   `compare` are logged and do not fail the run.
///
/// # Errors
/// - Selection errors (config, index, JSON output, seeds, downloads).
/// - `compare` table write errors.
pub async fn run(args: &Args) -> crate::Result<()> {
    match &args.command {
        Command::Select(opts) => select::run(opts).await.map(|_| ()),
        Command::FormatIndex(opts) => select::format_index(opts),
        Command::Plot(opts) => {
            plot::run(&opts.directory);
            Ok(())
        }
        Command::Compare(opts) => compare::run(&opts.directory),
    }
}

//! Command-line argument definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// droid-study - sample Android apps from an F-Droid index and chart their test coverage
#[derive(Parser, Debug)]
#[command(name = "droid-study")]
#[command(version)]
#[command(about = "Sample Android apps from an F-Droid index and chart their test coverage", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Filter the app index, sample one app per category and download the sample
    Select(SelectArgs),
    /// Rewrite the app index with four-space indentation
    FormatIndex(FormatIndexArgs),
    /// Chart the coverage logs of one app results directory
    Plot(DirectoryArgs),
    /// Compare apps of a results tree in bar charts and LaTeX tables
    Compare(DirectoryArgs),
}

/// Flags of `select`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Selector config file (default: ~/.config/droid-study/selector.conf)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// App index JSON file
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Directory for the JSON artifacts
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory for downloaded APKs
    #[arg(long)]
    pub apk_dir: Option<PathBuf>,

    /// Write the selection without downloading APKs
    #[arg(long)]
    pub no_download: bool,
}

/// Flags of `format-index`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FormatIndexArgs {
    /// Selector config file used to locate the index
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// App index JSON file (overrides the config)
    #[arg(long)]
    pub index: Option<PathBuf>,
}

/// Flags of `plot` and `compare`.
#[derive(clap::Args, Debug, Clone)]
pub struct DirectoryArgs {
    /// The test results directory
    #[arg(short, long)]
    pub directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    /// What: The clap definition is internally consistent.
    ///
    /// Inputs:
    /// - Derived command.
    ///
    /// Output:
    /// - `debug_assert` passes.
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    /// What: Global flags parse after the subcommand and select flags map to fields.
    ///
    /// Inputs:
    /// - `select --index i.json --no-download -v`.
    ///
    /// Output:
    /// - `Command::Select` with index set, downloads off, verbose on.
    fn args_parse_select() {
        let args = Args::try_parse_from(["droid-study", "select", "--index", "i.json", "--no-download", "-v"])
            .expect("parse");
        assert!(args.verbose);
        let Command::Select(opts) = args.command else {
            panic!("expected select");
        };
        assert_eq!(opts.index, Some(PathBuf::from("i.json")));
        assert!(opts.no_download);
        assert!(opts.apk_dir.is_none());
    }

    #[test]
    /// What: `plot` and `compare` require a directory.
    ///
    /// Inputs:
    /// - `plot -d results/App_1`, `compare --directory results`, bare `compare`.
    ///
    /// Output:
    /// - First two parse; the bare form is rejected.
    fn args_parse_directory_commands() {
        let args = Args::try_parse_from(["droid-study", "plot", "-d", "results/App_1"]).expect("parse");
        assert!(matches!(args.command, Command::Plot(ref d) if d.directory == PathBuf::from("results/App_1")));
        let args = Args::try_parse_from(["droid-study", "--log-level", "warn", "compare", "--directory", "results"])
            .expect("parse");
        assert_eq!(args.log_level, "warn");
        assert!(matches!(args.command, Command::Compare(_)));
        assert!(Args::try_parse_from(["droid-study", "compare"]).is_err());
    }
}

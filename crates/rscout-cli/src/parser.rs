//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the R installation scout.
///
/// This is the top-level parser that handles global options and
/// dispatches to subcommands.
#[derive(Parser)]
#[command(name = "rscout")]
#[command(about = "Find and select installed R runtimes")]
#[command(version)]
pub struct Cli {
    /// Discover through a package manager prefix instead of treating
    /// the registry as the preferred source
    #[arg(long = "package-manager", global = true)]
    pub package_manager: bool,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["rscout", "--verbose", "--package-manager", "list"]);
        assert!(cli.verbose);
        assert!(cli.package_manager);
    }
}

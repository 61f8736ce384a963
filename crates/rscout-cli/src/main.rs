//! CLI entry point - the composition root.
//!
//! Parses arguments, initializes logging, wires the platform ports,
//! and dispatches to the matching handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rscout_cli::{Cli, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = bootstrap(cli.package_manager);

    match cli.command.unwrap_or(Commands::List { json: false }) {
        Commands::List { json } => handlers::list::execute(&ctx, json),
        Commands::Detect {
            arch,
            preferred_only,
        } => handlers::detect::execute(&ctx, arch, preferred_only),
        Commands::Resolve { choose } => handlers::resolve::execute(&ctx, choose),
        Commands::Inspect { path } => handlers::inspect::execute(&ctx, &path),
    }
}

//! rscout command-line interface.
//!
//! The binary wires the platform ports together in [`bootstrap`] and
//! dispatches to thin handlers; all discovery and resolution logic
//! lives in `rscout-core`.

pub mod bootstrap;
pub mod chooser;
pub mod commands;
pub mod handlers;
pub mod parser;
pub mod prefs;

pub use bootstrap::{CliContext, bootstrap};
pub use chooser::ConsoleChooser;
pub use commands::{ArchArg, Commands};
pub use parser::Cli;
pub use prefs::FilePreferences;

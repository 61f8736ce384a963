//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use rscout_core::Arch;

/// Available commands for the R installation scout.
#[derive(Subcommand)]
pub enum Commands {
    /// List every valid installation, best first
    List {
        /// Emit machine-readable JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Automatically detect the best installation
    Detect {
        /// Architecture to detect for
        #[arg(long, value_enum, default_value_t = ArchArg::X64)]
        arch: ArchArg,
        /// Only consult the registry-preferred entry
        #[arg(long)]
        preferred_only: bool,
    },

    /// Resolve the installation to use, prompting when needed
    Resolve {
        /// Always prompt, even when a stored or detected choice exists
        #[arg(long)]
        choose: bool,
    },

    /// Inspect a directory for an installation
    Inspect {
        /// Bin or home directory to probe
        path: PathBuf,
    },
}

/// Architectures selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArchArg {
    X64,
    X86,
}

impl From<ArchArg> for Arch {
    fn from(arg: ArchArg) -> Self {
        match arg {
            ArchArg::X64 => Arch::X64,
            ArchArg::X86 => Arch::X86,
        }
    }
}

//! Detect command handler.
//!
//! Runs automatic detection and prints the winning installation.

use anyhow::{Result, bail};
use rscout_core::auto_detect;

use crate::bootstrap::CliContext;
use crate::commands::ArchArg;

pub fn execute(ctx: &CliContext, arch: ArchArg, preferred_only: bool) -> Result<()> {
    let discovery = ctx.discovery();

    let Some(found) = auto_detect(&discovery, arch.into(), preferred_only) else {
        if preferred_only {
            bail!("no registry-preferred R installation");
        }
        bail!("no suitable R installation found");
    };

    println!("{} ({})", found.description(), found.version());
    println!("bin: {}", found.bin_dir().display());
    Ok(())
}

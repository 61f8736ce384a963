//! List command handler.
//!
//! Displays every valid installation in ranked order.

use anyhow::Result;
use rscout_core::all_candidates;
use serde_json::json;

use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext, json_output: bool) -> Result<()> {
    let discovery = ctx.discovery();
    let installs = all_candidates(&discovery, Vec::new());

    if json_output {
        let records: Vec<_> = installs
            .iter()
            .map(|install| {
                json!({
                    "bin_dir": install.bin_dir(),
                    "home_dir": install.home_dir(),
                    "version": install.version().to_string(),
                    "arch": install.arch().to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if installs.is_empty() {
        println!("No R installations found.");
        return Ok(());
    }

    println!("Found {} R installation(s):\n", installs.len());
    for (index, install) in installs.iter().enumerate() {
        println!(
            "{:>2}. {} ({})",
            index + 1,
            install.description(),
            install.version()
        );
        println!("      bin: {}", install.bin_dir().display());
    }

    Ok(())
}

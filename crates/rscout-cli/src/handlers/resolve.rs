//! Resolve command handler.
//!
//! Runs the full resolution policy against the persisted preferences,
//! prompting on the terminal when automatic resolution fails or the
//! user asked to choose.

use anyhow::{Context, Result, bail};
use rscout_core::ResolutionOutcome;
use rscout_core::ports::PreferenceStore;

use crate::bootstrap::CliContext;
use crate::chooser::ConsoleChooser;
use crate::prefs::FilePreferences;

pub fn execute(ctx: &CliContext, choose: bool) -> Result<()> {
    let path = FilePreferences::default_path()
        .context("no config directory available for preferences")?;
    let mut prefs = FilePreferences::load(path);
    let mut chooser = ConsoleChooser::stdio();

    let discovery = ctx.discovery();
    let previous = prefs.bin_dir();
    let outcome = rscout_core::resolve(&discovery, &mut prefs, &mut chooser, choose, &previous);

    match outcome {
        ResolutionOutcome::Resolved(bin_dir) => {
            if bin_dir.as_os_str().is_empty() {
                println!("Resolved: system default");
            } else {
                println!("Resolved: {}", bin_dir.display());
            }
            Ok(())
        }
        ResolutionOutcome::RestartRequired => {
            println!("Selection saved. Restart for the new rendering mode to take effect.");
            Ok(())
        }
        ResolutionOutcome::Abandoned => bail!("no R installation selected"),
    }
}

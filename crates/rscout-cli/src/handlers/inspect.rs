//! Inspect command handler.
//!
//! Probes one directory the way the resolver would and reports what it
//! sees, including why an installation is unusable.

use std::path::Path;

use anyhow::{Result, bail};
use rscout_core::Validity;
use rscout_core::discover::installs_in_dir;

use crate::bootstrap::CliContext;

pub fn execute(ctx: &CliContext, path: &Path) -> Result<()> {
    let discovery = ctx.discovery();
    let installs = installs_in_dir(path, &discovery);

    if installs.is_empty() {
        bail!("no R installation at {}", path.display());
    }

    for install in installs {
        let validity = match install.validate(discovery.profile) {
            Validity::Ok => "ok".to_string(),
            Validity::NotFound => "not found".to_string(),
            Validity::VersionTooOld => format!(
                "version {} is below the required {}.{}",
                install.version(),
                discovery.profile.min_version_major,
                discovery.profile.min_version_minor
            ),
        };

        println!("{}", install.description());
        println!("  bin:      {}", install.bin_dir().display());
        println!("  home:     {}", install.home_dir().display());
        println!("  version:  {}", install.version());
        println!("  arch:     {}", install.arch());
        println!("  validity: {validity}");
    }

    Ok(())
}

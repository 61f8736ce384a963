//! Interactive chooser bridge.
//!
//! Invoked only when automatic resolution is inconclusive. The chooser
//! owns selection validation: it must not accept an unusable
//! installation, and the resolver trusts that contract rather than
//! re-validating an accepted pick.

use std::path::PathBuf;

use crate::RuntimeInstall;

/// Outcome of one chooser invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// The user accepted a selection. An empty `bin_dir` means "use the
    /// system default".
    Accepted {
        bin_dir: PathBuf,
        rendering_mode: String,
    },
    /// The user dismissed the chooser without selecting.
    Abandoned,
}

/// Blocking chooser presented to the user.
pub trait InstallChooser {
    /// Present `candidates` (ranked, valid, deduplicated) with
    /// `current` preselected and block until the user answers.
    fn choose(
        &mut self,
        candidates: &[RuntimeInstall],
        current: &RuntimeInstall,
        rendering_mode: &str,
    ) -> Choice;
}

//! Persisted user preference port.
//!
//! The resolver issues the writes; storage format and location belong
//! to the implementing adapter.

use std::path::{Path, PathBuf};

/// Key-value store for the user's resolution choices.
pub trait PreferenceStore {
    /// Previously chosen bin directory. Empty means the user never
    /// chose, or asked for autodetection.
    fn bin_dir(&self) -> PathBuf;

    fn set_bin_dir(&mut self, dir: &Path);

    /// Auxiliary desktop rendering mode carried through the chooser.
    fn rendering_mode(&self) -> String;

    fn set_rendering_mode(&mut self, mode: &str);
}

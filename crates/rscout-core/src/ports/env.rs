//! Host environment access port.

use std::path::PathBuf;

/// Read-only view of the process environment.
pub trait EnvironmentPort: Send + Sync {
    /// Value of an environment variable. Unset, empty, and non-Unicode
    /// values all read as `None`.
    fn var(&self, name: &str) -> Option<String>;

    /// Path of the running executable, when the platform exposes it.
    fn current_exe(&self) -> Option<PathBuf>;
}

/// Production implementation backed by `std::env`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnvironment;

impl EnvironmentPort for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }

    fn current_exe(&self) -> Option<PathBuf> {
        std::env::current_exe().ok()
    }
}

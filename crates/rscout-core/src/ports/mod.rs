//! Capability traits the discovery engine depends on.
//!
//! Core owns the traits and stays pure; I/O-heavy implementations live
//! in adapters (`win32` for the real registry and version resources,
//! the CLI for preferences and the chooser, `testing` for fakes).

mod chooser;
mod env;
mod preferences;
mod registry;
mod version_info;

pub use chooser::{Choice, InstallChooser};
pub use env::{EnvironmentPort, SystemEnvironment};
pub use preferences::PreferenceStore;
pub use registry::{
    NullRegistry, RegistryError, RegistryKey, RegistryPort, RegistryScope, RegistryView,
};
pub use version_info::{NullVersionInfo, VersionInfoPort};

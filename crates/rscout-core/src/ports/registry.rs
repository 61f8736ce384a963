//! Structured registry access port.
//!
//! Models the slice of the Windows registry the enumerators consult: a
//! named key tree with string values, opened per WOW64 view. A missing
//! key is an expected condition and is kept distinct from an access
//! failure so callers can stay silent about the former and log the
//! latter.

use thiserror::Error;

use crate::Arch;

/// Registry root to open a key under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryScope {
    CurrentUser,
    LocalMachine,
}

/// WOW64 registry view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryView {
    Bits32,
    Bits64,
}

impl RegistryView {
    /// View matching an architecture. Architectures without a registry
    /// view of their own map to `None`.
    pub const fn for_arch(arch: Arch) -> Option<Self> {
        match arch {
            Arch::X86 => Some(Self::Bits32),
            Arch::X64 => Some(Self::Bits64),
            Arch::None | Arch::Unknown => None,
        }
    }
}

/// Errors surfaced by registry implementations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The key does not exist. Expected; never logged.
    #[error("registry key not found")]
    NotFound,

    /// Permission or I/O failure opening or reading a key.
    #[error("registry access failed: {0}")]
    Access(String),
}

/// An open registry key.
pub trait RegistryKey {
    /// Names of the immediate subkeys.
    fn subkey_names(&self) -> Result<Vec<String>, RegistryError>;

    /// String value stored under `name`, or `default` when the value is
    /// absent or not a string.
    fn string_value(&self, name: &str, default: &str) -> String;

    /// Open an immediate subkey under the same view.
    fn open_subkey(&self, name: &str) -> Result<Box<dyn RegistryKey>, RegistryError>;
}

/// Opens registry keys.
pub trait RegistryPort: Send + Sync {
    fn open_key(
        &self,
        scope: RegistryScope,
        path: &str,
        view: RegistryView,
    ) -> Result<Box<dyn RegistryKey>, RegistryError>;
}

/// Registry port for hosts without a system registry; every key is
/// absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRegistry;

impl RegistryPort for NullRegistry {
    fn open_key(
        &self,
        _scope: RegistryScope,
        _path: &str,
        _view: RegistryView,
    ) -> Result<Box<dyn RegistryKey>, RegistryError> {
        Err(RegistryError::NotFound)
    }
}

//! Embedded version metadata port.

use std::path::Path;

use crate::PackedVersion;

/// Reads the packed file version embedded in a binary.
///
/// Only the packing and comparison contract is core; how the value is
/// retrieved (a VERSIONINFO resource on Windows) is an adapter concern.
pub trait VersionInfoPort: Send + Sync {
    /// Packed file version of a binary. Missing files and files without
    /// version metadata both read as [`PackedVersion::ZERO`].
    fn file_version(&self, path: &Path) -> PackedVersion;
}

/// Port for hosts without a version resource reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVersionInfo;

impl VersionInfoPort for NullVersionInfo {
    fn file_version(&self, _path: &Path) -> PackedVersion {
        PackedVersion::ZERO
    }
}

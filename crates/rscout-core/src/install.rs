//! One discovered runtime installation.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::context::DiscoveryContext;
use crate::{Arch, DiscoveryProfile, PackedVersion, pe};

/// Result of validating a candidate against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Ok,
    /// Missing bin dir, underivable home dir, or missing runtime
    /// library.
    NotFound,
    /// Library present but below the profile's minimum version.
    VersionTooOld,
}

/// A candidate installation, keyed by its bin directory.
///
/// Records are built once per enumeration hit and never mutated;
/// metadata is recomputed on a fresh probe, never merged between
/// records. Equality is case-insensitive bin-dir comparison only —
/// two records for the same bin dir are the same installation even if
/// their metadata differs.
#[derive(Debug, Clone)]
pub struct RuntimeInstall {
    bin_dir: PathBuf,
    home_dir: PathBuf,
    version: PackedVersion,
    arch: Arch,
}

impl RuntimeInstall {
    /// The empty record: no bin dir, no metadata, never valid.
    pub fn empty() -> Self {
        Self {
            bin_dir: PathBuf::new(),
            home_dir: PathBuf::new(),
            version: PackedVersion::ZERO,
            arch: Arch::None,
        }
    }

    /// Probe a bin directory, reading the library's architecture and
    /// embedded version eagerly. Works on nonexistent paths; the
    /// result is simply never valid.
    pub fn probe(bin_dir: impl Into<PathBuf>, ctx: &DiscoveryContext<'_>) -> Self {
        let bin_dir = bin_dir.into();
        let home_dir = bin_dir_to_home_dir(&bin_dir);

        let (version, arch) = if bin_dir.as_os_str().is_empty() {
            (PackedVersion::ZERO, Arch::None)
        } else {
            let library = bin_dir.join(&ctx.profile.library_name);
            (ctx.version_info.file_version(&library), pe::read_arch(&library))
        };

        Self {
            bin_dir,
            home_dir,
            version,
            arch,
        }
    }

    /// Build a record from already-known fields, bypassing the probe.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn synthetic(
        bin_dir: impl Into<PathBuf>,
        home_dir: impl Into<PathBuf>,
        version: PackedVersion,
        arch: Arch,
    ) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            home_dir: home_dir.into(),
            version,
            arch,
        }
    }

    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn version(&self) -> PackedVersion {
        self.version
    }

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn is_empty(&self) -> bool {
        self.bin_dir.as_os_str().is_empty()
    }

    /// Validate against the profile's library name and version floor.
    pub fn validate(&self, profile: &DiscoveryProfile) -> Validity {
        if self.is_empty() || self.home_dir.as_os_str().is_empty() {
            return Validity::NotFound;
        }
        if !self.bin_dir.join(&profile.library_name).is_file() {
            return Validity::NotFound;
        }
        if !self
            .version
            .meets_minimum(profile.min_version_major, profile.min_version_minor)
        {
            return Validity::VersionTooOld;
        }
        Validity::Ok
    }

    pub fn is_valid(&self, profile: &DiscoveryProfile) -> bool {
        self.validate(profile) == Validity::Ok
    }

    /// Human-readable line for the chooser, e.g. `[64-bit] C:\R\R-4.2`.
    pub fn description(&self) -> String {
        match self.arch.display_label() {
            Some(label) => format!("{} {}", label, self.home_dir.display()),
            None => self.home_dir.display().to_string(),
        }
    }

    /// Ranking used to order candidates: version descending, then home
    /// dir case-insensitively ascending, then 64-bit before other
    /// architectures, then bin dir case-insensitively ascending.
    ///
    /// This is a free comparator rather than an `Ord` impl because it
    /// is inconsistent with equality, which looks at the bin dir only.
    pub fn ranking(&self, other: &Self) -> Ordering {
        other
            .version
            .cmp(&self.version)
            .then_with(|| fold_path(&self.home_dir).cmp(&fold_path(&other.home_dir)))
            .then_with(|| self.arch.sort_rank().cmp(&other.arch.sort_rank()))
            .then_with(|| fold_path(&self.bin_dir).cmp(&fold_path(&other.bin_dir)))
    }
}

impl PartialEq for RuntimeInstall {
    /// Same installation: case-insensitive bin-dir equality, nothing
    /// else.
    fn eq(&self, other: &Self) -> bool {
        fold_path(&self.bin_dir) == fold_path(&other.bin_dir)
    }
}

impl Eq for RuntimeInstall {}

/// Best-guess home directory for a bin directory. Tried even when the
/// bin dir does not exist; empty when the shape is not recognized or
/// the path is relative.
pub fn bin_dir_to_home_dir(bin_dir: &Path) -> PathBuf {
    if bin_dir.as_os_str().is_empty() || !bin_dir.is_absolute() {
        return PathBuf::new();
    }

    let mut dir = bin_dir;

    // bin/x64 and bin/i386 layouts: step up to the bin dir first.
    if !has_dir_name(dir, "bin") {
        match dir.parent() {
            Some(parent) => dir = parent,
            None => return PathBuf::new(),
        }
    }

    // The parent of the bin dir is the home dir.
    if has_dir_name(dir, "bin") {
        if let Some(parent) = dir.parent() {
            return parent.to_path_buf();
        }
    }

    PathBuf::new()
}

pub(crate) fn has_dir_name(dir: &Path, name: &str) -> bool {
    dir.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.eq_ignore_ascii_case(name))
}

/// Case-folded path text for comparisons and dedup keys.
fn fold_path(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install(bin: &str, home: &str, version: u32, arch: Arch) -> RuntimeInstall {
        RuntimeInstall::synthetic(bin, home, PackedVersion::new(version), arch)
    }

    #[test]
    fn home_dir_derivation_strips_bin_and_arch_child() {
        assert_eq!(
            bin_dir_to_home_dir(Path::new("/opt/R/R-4.2/bin")),
            PathBuf::from("/opt/R/R-4.2")
        );
        assert_eq!(
            bin_dir_to_home_dir(Path::new("/opt/R/R-4.2/bin/x64")),
            PathBuf::from("/opt/R/R-4.2")
        );
        assert_eq!(
            bin_dir_to_home_dir(Path::new("/opt/R/R-4.2/bin/i386")),
            PathBuf::from("/opt/R/R-4.2")
        );
    }

    #[test]
    fn home_dir_derivation_rejects_unrecognized_shapes() {
        // No bin component anywhere in the last two segments.
        assert_eq!(
            bin_dir_to_home_dir(Path::new("/opt/R/R-4.2/lib")),
            PathBuf::new()
        );
        assert_eq!(bin_dir_to_home_dir(Path::new("relative/bin")), PathBuf::new());
        assert_eq!(bin_dir_to_home_dir(Path::new("")), PathBuf::new());
    }

    #[test]
    fn empty_record_is_never_valid() {
        let profile = DiscoveryProfile::default();
        assert_eq!(
            RuntimeInstall::empty().validate(&profile),
            Validity::NotFound
        );
    }

    #[test]
    fn equality_is_case_insensitive_bin_dir_only() {
        let a = install("C:/R/R-4.2/bin/x64", "C:/R/R-4.2", 0x0004_0002, Arch::X64);
        let b = install("c:/r/r-4.2/BIN/X64", "ignored", 0, Arch::None);
        assert_eq!(a, b);

        let c = install("C:/R/R-4.3/bin/x64", "C:/R/R-4.2", 0x0004_0002, Arch::X64);
        assert_ne!(a, c);
    }

    #[test]
    fn ranking_orders_version_descending_first() {
        let newer = install("/b/bin", "/b", 0x0004_0003, Arch::X86);
        let older = install("/a/bin", "/a", 0x0004_0002, Arch::X64);
        assert_eq!(newer.ranking(&older), Ordering::Less);
        assert_eq!(older.ranking(&newer), Ordering::Greater);
    }

    #[test]
    fn ranking_breaks_version_ties_by_home_then_arch_then_bin() {
        let v = 0x0004_0002;
        let by_home_a = install("/aaa/bin", "/aaa", v, Arch::X64);
        let by_home_b = install("/bbb/bin", "/bbb", v, Arch::X64);
        assert_eq!(by_home_a.ranking(&by_home_b), Ordering::Less);

        // Same home: 64-bit ranks first.
        let x64 = install("/r/bin/x64", "/r", v, Arch::X64);
        let x86 = install("/r/bin/i386", "/r", v, Arch::X86);
        assert_eq!(x64.ranking(&x86), Ordering::Less);

        // Same home and arch: bin dir breaks the tie.
        let bin_a = install("/r/bin/a", "/r", v, Arch::X64);
        let bin_b = install("/r/bin/b", "/r", v, Arch::X64);
        assert_eq!(bin_a.ranking(&bin_b), Ordering::Less);
    }

    #[test]
    fn ranking_is_case_insensitive_on_home_dir() {
        let v = 0x0004_0002;
        let upper = install("/x/bin", "/AAA", v, Arch::X64);
        let lower = install("/y/bin", "/aab", v, Arch::X64);
        assert_eq!(upper.ranking(&lower), Ordering::Less);
    }

    #[test]
    fn sorted_duplicates_dedupe_to_one_entry() {
        let v = 0x0004_0002;
        let mut list = vec![
            install("C:/R/bin/x64", "C:/R", v, Arch::X64),
            install("c:/r/BIN/x64", "c:/r", v, Arch::X64),
            install("C:/R/R-4.1/bin/x64", "C:/R/R-4.1", 0x0004_0001, Arch::X64),
        ];
        list.sort_by(RuntimeInstall::ranking);
        list.dedup();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn description_includes_arch_label() {
        let rec = install("/opt/R/R-4.2/bin/x64", "/opt/R/R-4.2", 0x0004_0002, Arch::X64);
        assert_eq!(rec.description(), "[64-bit] /opt/R/R-4.2");

        let unknown = install("/opt/R/R-4.2/bin", "/opt/R/R-4.2", 0, Arch::Unknown);
        assert_eq!(unknown.description(), "/opt/R/R-4.2");
    }
}

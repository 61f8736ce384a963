//! Resolution policy: merge, rank, and select one installation.
//!
//! Every probe below `resolve` degrades failures to empty or invalid
//! results. The only terminal outcome is the user abandoning the
//! chooser; callers decide whether that is fatal.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::context::DiscoveryContext;
use crate::discover::{
    EnvHomeEnumerator, Enumerator, PackageManagerEnumerator, ProgramDirsEnumerator,
    RegistryEnumerator, installs_from_home,
};
use crate::ports::{Choice, InstallChooser, PreferenceStore, RegistryError, RegistryScope, RegistryView};
use crate::{Arch, RuntimeInstall};

/// Final answer of a resolution call. Not persisted here; the caller
/// owns the preference store this subsystem writes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// A usable bin directory. Empty means "use the system default".
    Resolved(PathBuf),
    /// The rendering mode changed; the host application must restart
    /// before a new choice takes effect.
    RestartRequired,
    /// No usable installation and the user declined to choose.
    Abandoned,
}

/// All valid installations, ranked and deduplicated.
///
/// Callers may seed the list with records they already know about,
/// valid or not. Sources are concatenated in a fixed order, invalid
/// records dropped, the rest sorted under the ranking comparator,
/// case-insensitive bin-dir duplicates collapsed to the first entry,
/// and finally everything not matching the host architecture removed.
pub fn all_candidates(
    ctx: &DiscoveryContext<'_>,
    seed: Vec<RuntimeInstall>,
) -> Vec<RuntimeInstall> {
    let mut found = seed;

    found.extend(EnvHomeEnumerator.enumerate(ctx));
    if ctx.profile.package_manager_mode {
        found.extend(PackageManagerEnumerator.enumerate(ctx));
    }
    for scope in [RegistryScope::CurrentUser, RegistryScope::LocalMachine] {
        found.extend(
            RegistryEnumerator {
                scope,
                arch: Arch::X64,
            }
            .enumerate(ctx),
        );
    }
    found.extend(ProgramDirsEnumerator.enumerate(ctx));

    found.retain(|install| install.is_valid(ctx.profile));
    found.sort_by(RuntimeInstall::ranking);
    found.dedup();
    found.retain(|install| install.arch() == Arch::HOST_SUPPORTED);
    found
}

/// The registry's own idea of the preferred installation: the install
/// path stored directly on the base key, under one scope and one
/// architecture view.
///
/// Deliberate asymmetry with [`all_candidates`]: a preferred hit is
/// checked for validity and architecture but never goes through the
/// ranked candidate filter.
pub fn preferred_from_registry(
    ctx: &DiscoveryContext<'_>,
    scope: RegistryScope,
    arch: Arch,
) -> Option<RuntimeInstall> {
    let view = RegistryView::for_arch(arch)?;

    let key = match ctx
        .registry
        .open_key(scope, &ctx.profile.registry_key_path, view)
    {
        Ok(key) => key,
        Err(RegistryError::NotFound) => return None,
        Err(err) => {
            tracing::warn!(scope = ?scope, key = %ctx.profile.registry_key_path, %err,
                           "failed to read preferred install from registry");
            return None;
        }
    };

    let install_path = key.string_value(&ctx.profile.install_path_value, "");
    if install_path.is_empty() {
        return None;
    }

    let mut probed = Vec::new();
    installs_from_home(Path::new(&install_path), ctx, &mut probed);
    probed
        .into_iter()
        .find(|install| install.is_valid(ctx.profile) && install.arch() == arch)
}

/// Automatic detection. The registry-preferred entry is authoritative
/// over the filesystem scan; `preferred_only` stops after the registry
/// lookup.
pub fn auto_detect(
    ctx: &DiscoveryContext<'_>,
    arch: Arch,
    preferred_only: bool,
) -> Option<RuntimeInstall> {
    // Package manager builds don't consider a registry-registered R
    // to be the preferred version; its enumerator runs as part of the
    // full scan instead.
    if !ctx.profile.package_manager_mode {
        for scope in [RegistryScope::CurrentUser, RegistryScope::LocalMachine] {
            if let Some(preferred) = preferred_from_registry(ctx, scope, arch) {
                debug!(bin_dir = %preferred.bin_dir().display(), "registry-preferred install");
                return Some(preferred);
            }
        }
    }

    if preferred_only {
        return None;
    }

    // The list is already ranked, so the first match is the best one.
    all_candidates(ctx, Vec::new())
        .into_iter()
        .find(|install| install.arch() == arch)
}

/// Passes `resolve` may take beyond the first: exactly one, re-entered
/// only after an accepted chooser selection.
const MAX_EXTRA_PASSES: u32 = 1;

/// Select the installation to launch against.
///
/// Tries the previous choice, then autodetection, and falls back to
/// the interactive chooser only when forced or when both fail. A stale
/// previous choice is silently discarded. After an accepted selection
/// the policy re-enters itself exactly once with the freshly persisted
/// choice; the chooser's validation guarantees that pass resolves.
pub fn resolve(
    ctx: &DiscoveryContext<'_>,
    prefs: &mut dyn PreferenceStore,
    chooser: &mut dyn InstallChooser,
    force_interactive: bool,
    previous_choice: &Path,
) -> ResolutionOutcome {
    let mut force = force_interactive;
    let mut choice = previous_choice.to_path_buf();
    let mut extra_passes = 0;

    loop {
        let mut current = RuntimeInstall::empty();
        if !choice.as_os_str().is_empty() {
            let record = RuntimeInstall::probe(choice.clone(), ctx);
            // A stored choice with an unsupported architecture is
            // treated as no choice at all.
            if record.arch() == Arch::HOST_SUPPORTED {
                current = record;
            }
        }

        if !force {
            if !current.is_empty() {
                if current.is_valid(ctx.profile) {
                    return ResolutionOutcome::Resolved(current.bin_dir().to_path_buf());
                }
                debug!(bin_dir = %current.bin_dir().display(),
                       "stored choice is no longer valid, falling back");
            } else if let Some(found) = auto_detect(ctx, Arch::HOST_SUPPORTED, false) {
                return ResolutionOutcome::Resolved(found.bin_dir().to_path_buf());
            }
        }

        if extra_passes >= MAX_EXTRA_PASSES {
            // The chooser accepted a selection that then failed to
            // validate. Its contract makes this unreachable.
            debug_assert!(false, "accepted installation did not validate on re-entry");
            error!("accepted installation did not validate on re-entry");
            return ResolutionOutcome::Abandoned;
        }

        let candidates = all_candidates(ctx, vec![current.clone()]);
        let prior_mode = prefs.rendering_mode();
        match chooser.choose(&candidates, &current, &prior_mode) {
            Choice::Abandoned => return ResolutionOutcome::Abandoned,
            Choice::Accepted {
                bin_dir,
                rendering_mode,
            } => {
                prefs.set_bin_dir(&bin_dir);
                prefs.set_rendering_mode(&rendering_mode);

                if rendering_mode != prior_mode {
                    return ResolutionOutcome::RestartRequired;
                }

                // The accepted choice must validate on the next pass.
                force = false;
                choice = bin_dir;
                extra_passes += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FakeEnvironment, FakeRegistry, FakeVersionInfo, MemoryPreferences, ScriptedChooser,
        write_pe_stub,
    };
    use crate::{DiscoveryProfile, PackedVersion};
    use tempfile::tempdir;

    const MACHINE_AMD64: u16 = 0x8664;

    fn make_home(root: &Path, name: &str, versions: &mut FakeVersionInfo) -> PathBuf {
        let home = root.join(name);
        let bin = home.join("bin").join("x64");
        std::fs::create_dir_all(&bin).unwrap();
        let library = bin.join("R.dll");
        write_pe_stub(&library, MACHINE_AMD64);
        versions.set_version(&library, PackedVersion::from_parts(4, 2));
        home
    }

    #[test]
    fn preferred_from_registry_reads_the_base_key_value() {
        let dir = tempdir().unwrap();
        let mut versions = FakeVersionInfo::default();
        let home = make_home(dir.path(), "R-4.2", &mut versions);

        let mut registry = FakeRegistry::default();
        registry.set_value(
            RegistryScope::CurrentUser,
            RegistryView::Bits64,
            r"Software\R-core\R",
            "InstallPath",
            &home.to_string_lossy(),
        );

        let profile = DiscoveryProfile::default();
        let env = FakeEnvironment::default();
        let ctx = DiscoveryContext::new(&profile, &env, &registry, &versions);

        let preferred =
            preferred_from_registry(&ctx, RegistryScope::CurrentUser, Arch::X64).unwrap();
        assert_eq!(preferred.home_dir(), home.as_path());
    }

    #[test]
    fn preferred_from_registry_rejects_wrong_arch() {
        let dir = tempdir().unwrap();
        let mut versions = FakeVersionInfo::default();
        let home = make_home(dir.path(), "R-4.2", &mut versions);

        let mut registry = FakeRegistry::default();
        registry.set_value(
            RegistryScope::CurrentUser,
            RegistryView::Bits32,
            r"Software\R-core\R",
            "InstallPath",
            &home.to_string_lossy(),
        );

        let profile = DiscoveryProfile::default();
        let env = FakeEnvironment::default();
        let ctx = DiscoveryContext::new(&profile, &env, &registry, &versions);

        // The install is X64 but the lookup asks the 32-bit view for an
        // X86 install, so the probed record's arch can't match.
        assert!(preferred_from_registry(&ctx, RegistryScope::CurrentUser, Arch::X86).is_none());
    }

    #[test]
    fn auto_detect_preferred_only_stops_without_registry_hit() {
        let dir = tempdir().unwrap();
        let mut versions = FakeVersionInfo::default();
        let parent = dir.path().join("pf");
        let scan = parent.join("R");
        std::fs::create_dir_all(&scan).unwrap();
        make_home(&scan, "R-4.2", &mut versions);

        let profile = DiscoveryProfile::default();
        let env = FakeEnvironment::default().with_var("ProgramFiles", parent.to_string_lossy());
        let registry = FakeRegistry::default();
        let ctx = DiscoveryContext::new(&profile, &env, &registry, &versions);

        assert!(auto_detect(&ctx, Arch::X64, true).is_none());
        assert!(auto_detect(&ctx, Arch::X64, false).is_some());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "did not validate on re-entry")]
    fn contract_breaking_acceptance_is_a_defect() {
        let dir = tempdir().unwrap();
        let profile = DiscoveryProfile::default();
        let env = FakeEnvironment::default();
        let registry = FakeRegistry::default();
        let versions = FakeVersionInfo::default();
        let ctx = DiscoveryContext::new(&profile, &env, &registry, &versions);

        let mut prefs = MemoryPreferences::default();
        // A chooser that accepts a nonexistent path violates the bridge
        // contract; the second pass must assert instead of looping.
        let mut chooser = ScriptedChooser::accepting(dir.path().join("nope/bin"), "auto");

        let _ = resolve(&ctx, &mut prefs, &mut chooser, true, Path::new(""));
    }
}

//! Candidate enumerators.
//!
//! Each enumerator reads one source and emits unvalidated records.
//! Missing backing resources (env var, registry key, directory) yield
//! empty output; access failures are logged and also yield empty
//! output. No enumerator can fail its caller.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::context::DiscoveryContext;
use crate::install::has_dir_name;
use crate::ports::{RegistryError, RegistryScope, RegistryView};
use crate::{Arch, RuntimeInstall, bin_dir_to_home_dir};

/// One source of unvalidated candidates.
pub trait Enumerator {
    fn enumerate(&self, ctx: &DiscoveryContext<'_>) -> Vec<RuntimeInstall>;
}

/// Probe the `bin` and `bin/<secondary>` children of a home directory
/// and append a record per library hit. The records may not be valid.
pub fn installs_from_home(home: &Path, ctx: &DiscoveryContext<'_>, out: &mut Vec<RuntimeInstall>) {
    if home.as_os_str().is_empty() {
        return;
    }

    let subdirs = [
        PathBuf::from("bin"),
        Path::new("bin").join(&ctx.profile.secondary_bin_dir),
    ];
    for subdir in subdirs {
        let bin_dir = home.join(subdir);
        if bin_dir.join(&ctx.profile.library_name).is_file() {
            out.push(RuntimeInstall::probe(bin_dir, ctx));
        }
    }
}

/// Probe a single previously-known path: the directory itself if it
/// holds the library, its home if it is a `bin` directory, otherwise
/// the path treated as a home directory.
pub fn installs_in_dir(dir: &Path, ctx: &DiscoveryContext<'_>) -> Vec<RuntimeInstall> {
    if dir.join(&ctx.profile.library_name).is_file() {
        return vec![RuntimeInstall::probe(dir, ctx)];
    }

    let home = if has_dir_name(dir, "bin") {
        bin_dir_to_home_dir(dir)
    } else {
        dir.to_path_buf()
    };

    let mut out = Vec::new();
    installs_from_home(&home, ctx, &mut out);
    out
}

/// Environment-seeded enumerator: one designated variable holding an
/// explicit home directory.
pub struct EnvHomeEnumerator;

impl Enumerator for EnvHomeEnumerator {
    fn enumerate(&self, ctx: &DiscoveryContext<'_>) -> Vec<RuntimeInstall> {
        let mut out = Vec::new();
        if let Some(home) = ctx.env.var(&ctx.profile.home_env_var) {
            installs_from_home(Path::new(&home), ctx, &mut out);
        }
        out
    }
}

/// Registry-seeded enumerator: every subkey's install path under one
/// scope and one architecture view.
pub struct RegistryEnumerator {
    pub scope: RegistryScope,
    pub arch: Arch,
}

impl Enumerator for RegistryEnumerator {
    fn enumerate(&self, ctx: &DiscoveryContext<'_>) -> Vec<RuntimeInstall> {
        let mut out = Vec::new();

        let Some(view) = RegistryView::for_arch(self.arch) else {
            return out;
        };

        let key = match ctx
            .registry
            .open_key(self.scope, &ctx.profile.registry_key_path, view)
        {
            Ok(key) => key,
            Err(RegistryError::NotFound) => return out,
            Err(err) => {
                warn!(scope = ?self.scope, key = %ctx.profile.registry_key_path, %err,
                      "failed to open registry key");
                return out;
            }
        };

        let names = match key.subkey_names() {
            Ok(names) => names,
            Err(err) => {
                warn!(scope = ?self.scope, key = %ctx.profile.registry_key_path, %err,
                      "failed to enumerate registry subkeys");
                return out;
            }
        };

        for name in names {
            let subkey = match key.open_subkey(&name) {
                Ok(subkey) => subkey,
                Err(err) => {
                    warn!(subkey = %name, %err, "failed to open registry subkey");
                    continue;
                }
            };

            let install_path = subkey.string_value(&ctx.profile.install_path_value, "");
            if !install_path.is_empty() {
                installs_from_home(Path::new(&install_path), ctx, &mut out);
            }
        }

        out
    }
}

/// Directory-tree-seeded enumerator: well-known parent directories
/// resolved from environment variables, each probed for a fixed child
/// holding installation roots.
pub struct ProgramDirsEnumerator;

impl Enumerator for ProgramDirsEnumerator {
    fn enumerate(&self, ctx: &DiscoveryContext<'_>) -> Vec<RuntimeInstall> {
        let mut parents: Vec<String> = Vec::new();
        for var in &ctx.profile.program_dir_env_vars {
            if let Some(value) = ctx.env.var(var) {
                if !parents.contains(&value) {
                    parents.push(value);
                }
            }
        }

        let mut out = Vec::new();
        for parent in parents {
            scan_parent_dir(Path::new(&parent), ctx, &mut out);
        }
        out
    }
}

fn scan_parent_dir(parent: &Path, ctx: &DiscoveryContext<'_>, out: &mut Vec<RuntimeInstall>) {
    if !parent.is_absolute() || !parent.is_dir() {
        return;
    }

    let scan_root = parent.join(&ctx.profile.scan_subdir);
    let entries = match std::fs::read_dir(&scan_root) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
        Err(err) => {
            warn!(dir = %scan_root.display(), %err, "failed to scan directory");
            return;
        }
    };

    // Directory order is platform-dependent; sort for determinism.
    let mut homes: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    homes.sort();

    debug!(dir = %scan_root.display(), count = homes.len(), "scanned install parent");
    for home in homes {
        installs_from_home(&home, ctx, out);
    }
}

/// Package-manager-seeded enumerator: homes under a prefix variable
/// and relative to the running executable.
pub struct PackageManagerEnumerator;

impl Enumerator for PackageManagerEnumerator {
    fn enumerate(&self, ctx: &DiscoveryContext<'_>) -> Vec<RuntimeInstall> {
        let mut out = Vec::new();

        if let Some(prefix) = ctx.env.var(&ctx.profile.package_manager_prefix_env) {
            for suffix in &ctx.profile.package_manager_home_suffixes {
                installs_from_home(&Path::new(&prefix).join(suffix), ctx, &mut out);
            }
        }

        if let Some(exe) = ctx.env.current_exe() {
            for suffix in &ctx.profile.package_manager_exe_suffixes {
                // The suffix is relative to the executable file itself;
                // canonicalize to fold away the `..` components.
                if let Ok(home) = exe.join(suffix).canonicalize() {
                    installs_from_home(&home, ctx, &mut out);
                }
            }
        }

        out
    }
}

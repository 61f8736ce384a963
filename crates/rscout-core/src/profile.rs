//! Discovery profile: every host-specific name and location the
//! enumerators consult, carried as one explicit value.
//!
//! The profile replaces two patterns from older installation scanners:
//! a globally reachable options object, and preprocessor branches
//! selecting the enumeration strategy per build flavor. Both become
//! plain data owned by the caller.

use serde::{Deserialize, Serialize};

/// Names and locations used while enumerating installations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryProfile {
    /// File name of the runtime's shared library, e.g. `R.dll`.
    pub library_name: String,

    /// Architecture-specific child of `bin` probed after `bin` itself.
    pub secondary_bin_dir: String,

    /// Environment variable holding an explicit home directory.
    pub home_env_var: String,

    /// Registry key enumerated for installed versions.
    pub registry_key_path: String,

    /// Value name holding an installation root under the registry key.
    pub install_path_value: String,

    /// Environment variables naming parent directories for the
    /// directory-tree scan.
    pub program_dir_env_vars: Vec<String>,

    /// Child directory of each parent that holds installation roots.
    pub scan_subdir: String,

    /// Required major version.
    pub min_version_major: u16,

    /// Required minor and patch combined, checked only when the major
    /// version is exactly `min_version_major`.
    pub min_version_minor: u16,

    /// Enumerate through a package manager prefix instead of the
    /// registry-preferred lookup.
    pub package_manager_mode: bool,

    /// Environment variable holding the package manager prefix.
    pub package_manager_prefix_env: String,

    /// Home directories relative to the package manager prefix.
    pub package_manager_home_suffixes: Vec<String>,

    /// Home directories relative to the running executable, probed in
    /// package manager mode.
    pub package_manager_exe_suffixes: Vec<String>,
}

impl DiscoveryProfile {
    /// Profile for R installed through the standard Windows installer.
    pub fn windows_r() -> Self {
        Self {
            library_name: "R.dll".to_string(),
            secondary_bin_dir: "x64".to_string(),
            home_env_var: "R_HOME".to_string(),
            registry_key_path: r"Software\R-core\R".to_string(),
            install_path_value: "InstallPath".to_string(),
            program_dir_env_vars: vec![
                "ProgramFiles".to_string(),
                "ProgramW6432".to_string(),
                "ProgramFiles(x86)".to_string(),
            ],
            scan_subdir: "R".to_string(),
            min_version_major: 3,
            min_version_minor: 1,
            package_manager_mode: false,
            package_manager_prefix_env: "CONDA_PREFIX".to_string(),
            package_manager_home_suffixes: vec!["lib/R".to_string(), "R".to_string()],
            package_manager_exe_suffixes: vec![
                "../../../lib/R".to_string(),
                "../../../R".to_string(),
            ],
        }
    }

    /// Profile for R distributed inside a package manager environment.
    /// The registry is still enumerated, but it is not treated as the
    /// preferred source.
    pub fn package_manager_r() -> Self {
        Self {
            package_manager_mode: true,
            ..Self::windows_r()
        }
    }
}

impl Default for DiscoveryProfile {
    fn default() -> Self {
        Self::windows_r()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_targets_standard_windows_r() {
        let profile = DiscoveryProfile::default();
        assert_eq!(profile.library_name, "R.dll");
        assert!(!profile.package_manager_mode);
        assert_eq!(profile.program_dir_env_vars.len(), 3);
    }

    #[test]
    fn package_manager_profile_only_flips_the_mode() {
        let base = DiscoveryProfile::windows_r();
        let pm = DiscoveryProfile::package_manager_r();
        assert!(pm.package_manager_mode);
        assert_eq!(pm.library_name, base.library_name);
        assert_eq!(pm.registry_key_path, base.registry_key_path);
    }
}

//! Wiring of the platform ports into a discovery context.
//!
//! This is the only place where platform-specific infrastructure is
//! selected; handlers only ever see the context.

use rscout_core::ports::{RegistryPort, SystemEnvironment, VersionInfoPort};
use rscout_core::{DiscoveryContext, DiscoveryProfile};

/// Everything a handler needs to run discovery.
pub struct CliContext {
    profile: DiscoveryProfile,
    env: SystemEnvironment,
    registry: Box<dyn RegistryPort>,
    version_info: Box<dyn VersionInfoPort>,
}

impl CliContext {
    pub fn profile(&self) -> &DiscoveryProfile {
        &self.profile
    }

    /// Borrow the wired ports as a discovery context.
    pub fn discovery(&self) -> DiscoveryContext<'_> {
        DiscoveryContext::new(
            &self.profile,
            &self.env,
            self.registry.as_ref(),
            self.version_info.as_ref(),
        )
    }
}

/// Build the context with the real platform ports.
///
/// Off Windows there is no registry and no VERSIONINFO resource
/// reader; the null ports keep every command usable against explicit
/// paths and environment variables.
pub fn bootstrap(package_manager: bool) -> CliContext {
    let profile = if package_manager {
        DiscoveryProfile::package_manager_r()
    } else {
        DiscoveryProfile::windows_r()
    };

    #[cfg(windows)]
    let (registry, version_info): (Box<dyn RegistryPort>, Box<dyn VersionInfoPort>) = (
        Box::new(rscout_core::win32::SystemRegistry),
        Box::new(rscout_core::win32::SystemVersionInfo),
    );

    #[cfg(not(windows))]
    let (registry, version_info): (Box<dyn RegistryPort>, Box<dyn VersionInfoPort>) = (
        Box::new(rscout_core::ports::NullRegistry),
        Box::new(rscout_core::ports::NullVersionInfo),
    );

    CliContext {
        profile,
        env: SystemEnvironment,
        registry,
        version_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_selects_the_requested_profile() {
        assert!(!bootstrap(false).profile().package_manager_mode);
        assert!(bootstrap(true).profile().package_manager_mode);
    }
}

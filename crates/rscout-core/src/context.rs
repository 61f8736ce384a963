//! Discovery context passed into enumerators and the resolver.

use crate::DiscoveryProfile;
use crate::ports::{EnvironmentPort, RegistryPort, VersionInfoPort};

/// Everything discovery needs, owned by the caller and passed
/// explicitly. There is no hidden global state.
pub struct DiscoveryContext<'a> {
    pub profile: &'a DiscoveryProfile,
    pub env: &'a dyn EnvironmentPort,
    pub registry: &'a dyn RegistryPort,
    pub version_info: &'a dyn VersionInfoPort,
}

impl<'a> DiscoveryContext<'a> {
    pub fn new(
        profile: &'a DiscoveryProfile,
        env: &'a dyn EnvironmentPort,
        registry: &'a dyn RegistryPort,
        version_info: &'a dyn VersionInfoPort,
    ) -> Self {
        Self {
            profile,
            env,
            registry,
            version_info,
        }
    }
}

//! In-memory fakes for the capability ports.
//!
//! Available to this crate's own tests and, behind the `test-utils`
//! feature, to downstream crates.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::ports::{
    Choice, EnvironmentPort, InstallChooser, PreferenceStore, RegistryError, RegistryKey,
    RegistryPort, RegistryScope, RegistryView, VersionInfoPort,
};
use crate::{PackedVersion, RuntimeInstall};

/// Write a minimal PE image at `path` with the given machine type.
///
/// Only the fields the header reader consults are populated: the
/// `e_lfanew` offset, the `PE\0\0` signature, and the machine word.
pub fn write_pe_stub(path: &Path, machine: u16) {
    let mut bytes = vec![0u8; 0x40];
    bytes[0] = b'M';
    bytes[1] = b'Z';
    bytes[0x3C..0x40].copy_from_slice(&0x40u32.to_le_bytes());
    bytes.extend_from_slice(&0x0000_4550u32.to_le_bytes());
    bytes.extend_from_slice(&machine.to_le_bytes());
    std::fs::write(path, bytes).expect("write PE stub");
}

/// Environment port backed by a map.
#[derive(Debug, Default)]
pub struct FakeEnvironment {
    vars: HashMap<String, String>,
    exe: Option<PathBuf>,
}

impl FakeEnvironment {
    #[must_use]
    pub fn with_var(mut self, name: &str, value: impl Into<String>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    #[must_use]
    pub fn with_exe(mut self, path: impl Into<PathBuf>) -> Self {
        self.exe = Some(path.into());
        self
    }
}

impl EnvironmentPort for FakeEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).filter(|v| !v.is_empty()).cloned()
    }

    fn current_exe(&self) -> Option<PathBuf> {
        self.exe.clone()
    }
}

#[derive(Debug, Default, Clone)]
struct KeyNode {
    values: BTreeMap<String, String>,
    children: BTreeMap<String, KeyNode>,
}

/// Registry port backed by an in-memory key tree, one tree per
/// (scope, view) pair. Paths can be poisoned to simulate access
/// failures.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    roots: HashMap<(RegistryScope, RegistryView), KeyNode>,
    poisoned: HashSet<String>,
}

impl FakeRegistry {
    /// Set a string value, creating every key along `path`.
    pub fn set_value(
        &mut self,
        scope: RegistryScope,
        view: RegistryView,
        path: &str,
        name: &str,
        value: &str,
    ) {
        let mut node = self.roots.entry((scope, view)).or_default();
        for segment in path.split('\\') {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node.values.insert(name.to_string(), value.to_string());
    }

    /// Make every open of `path` fail with an access error.
    pub fn poison(&mut self, path: &str) {
        self.poisoned.insert(path.to_string());
    }
}

impl RegistryPort for FakeRegistry {
    fn open_key(
        &self,
        scope: RegistryScope,
        path: &str,
        view: RegistryView,
    ) -> Result<Box<dyn RegistryKey>, RegistryError> {
        if self.poisoned.contains(path) {
            return Err(RegistryError::Access("poisoned key".to_string()));
        }

        let mut node = self
            .roots
            .get(&(scope, view))
            .ok_or(RegistryError::NotFound)?;
        for segment in path.split('\\') {
            node = node.children.get(segment).ok_or(RegistryError::NotFound)?;
        }

        Ok(Box::new(FakeKey {
            node: node.clone(),
            path: path.to_string(),
            poisoned: self.poisoned.clone(),
        }))
    }
}

struct FakeKey {
    node: KeyNode,
    path: String,
    poisoned: HashSet<String>,
}

impl RegistryKey for FakeKey {
    fn subkey_names(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.node.children.keys().cloned().collect())
    }

    fn string_value(&self, name: &str, default: &str) -> String {
        self.node
            .values
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn open_subkey(&self, name: &str) -> Result<Box<dyn RegistryKey>, RegistryError> {
        let path = format!("{}\\{}", self.path, name);
        if self.poisoned.contains(&path) {
            return Err(RegistryError::Access("poisoned key".to_string()));
        }
        let node = self
            .node
            .children
            .get(name)
            .ok_or(RegistryError::NotFound)?;
        Ok(Box::new(FakeKey {
            node: node.clone(),
            path,
            poisoned: self.poisoned.clone(),
        }))
    }
}

/// Version info port backed by a path map.
#[derive(Debug, Default)]
pub struct FakeVersionInfo {
    versions: HashMap<PathBuf, PackedVersion>,
}

impl FakeVersionInfo {
    pub fn set_version(&mut self, path: &Path, version: PackedVersion) {
        self.versions.insert(path.to_path_buf(), version);
    }
}

impl VersionInfoPort for FakeVersionInfo {
    fn file_version(&self, path: &Path) -> PackedVersion {
        self.versions.get(path).copied().unwrap_or(PackedVersion::ZERO)
    }
}

/// Preference store held in memory.
#[derive(Debug)]
pub struct MemoryPreferences {
    pub bin_dir: PathBuf,
    pub rendering_mode: String,
}

impl Default for MemoryPreferences {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::new(),
            rendering_mode: "auto".to_string(),
        }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn bin_dir(&self) -> PathBuf {
        self.bin_dir.clone()
    }

    fn set_bin_dir(&mut self, dir: &Path) {
        self.bin_dir = dir.to_path_buf();
    }

    fn rendering_mode(&self) -> String {
        self.rendering_mode.clone()
    }

    fn set_rendering_mode(&mut self, mode: &str) {
        self.rendering_mode = mode.to_string();
    }
}

/// Chooser that replays a fixed script of answers and records what it
/// was shown.
#[derive(Debug, Default)]
pub struct ScriptedChooser {
    script: VecDeque<Choice>,
    /// Number of times the chooser was invoked.
    pub invocations: usize,
    /// Candidate lists shown, one per invocation.
    pub shown: Vec<Vec<RuntimeInstall>>,
}

impl ScriptedChooser {
    /// Chooser that abandons every invocation.
    #[must_use]
    pub fn abandoning() -> Self {
        Self::default()
    }

    /// Chooser that accepts `bin_dir` on its first invocation.
    #[must_use]
    pub fn accepting(bin_dir: impl Into<PathBuf>, rendering_mode: &str) -> Self {
        Self::with_script(vec![Choice::Accepted {
            bin_dir: bin_dir.into(),
            rendering_mode: rendering_mode.to_string(),
        }])
    }

    #[must_use]
    pub fn with_script(choices: Vec<Choice>) -> Self {
        Self {
            script: choices.into(),
            invocations: 0,
            shown: Vec::new(),
        }
    }
}

impl InstallChooser for ScriptedChooser {
    fn choose(
        &mut self,
        candidates: &[RuntimeInstall],
        _current: &RuntimeInstall,
        _rendering_mode: &str,
    ) -> Choice {
        self.invocations += 1;
        self.shown.push(candidates.to_vec());
        self.script.pop_front().unwrap_or(Choice::Abandoned)
    }
}

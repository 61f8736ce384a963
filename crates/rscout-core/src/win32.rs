//! Win32 implementations of the registry and version metadata ports.
//!
//! The only unsafe code in the crate lives here, wrapping the
//! registry and VERSIONINFO APIs behind the safe port traits.

#![allow(unsafe_code)]
#![allow(clippy::cast_possible_truncation)]

use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_NO_MORE_ITEMS, WIN32_ERROR};
use windows::Win32::Storage::FileSystem::{
    GetFileVersionInfoSizeW, GetFileVersionInfoW, VS_FIXEDFILEINFO, VerQueryValueW,
};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY, KEY_WOW64_64KEY,
    REG_SAM_FLAGS, RegCloseKey, RegEnumKeyExW, RegOpenKeyExW, RegQueryValueExW,
};
use windows::core::PCWSTR;

use crate::PackedVersion;
use crate::ports::{
    RegistryError, RegistryKey, RegistryPort, RegistryScope, RegistryView, VersionInfoPort,
};

fn wide(text: &std::ffi::OsStr) -> Vec<u16> {
    text.encode_wide().chain(std::iter::once(0)).collect()
}

fn wide_str(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

const fn root_key(scope: RegistryScope) -> HKEY {
    match scope {
        RegistryScope::CurrentUser => HKEY_CURRENT_USER,
        RegistryScope::LocalMachine => HKEY_LOCAL_MACHINE,
    }
}

const fn view_flags(view: RegistryView) -> REG_SAM_FLAGS {
    match view {
        RegistryView::Bits32 => KEY_WOW64_32KEY,
        RegistryView::Bits64 => KEY_WOW64_64KEY,
    }
}

fn map_error(status: WIN32_ERROR) -> RegistryError {
    if status == ERROR_FILE_NOT_FOUND {
        RegistryError::NotFound
    } else {
        RegistryError::Access(format!("win32 error {}", status.0))
    }
}

/// Registry port backed by the Windows registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRegistry;

impl RegistryPort for SystemRegistry {
    fn open_key(
        &self,
        scope: RegistryScope,
        path: &str,
        view: RegistryView,
    ) -> Result<Box<dyn RegistryKey>, RegistryError> {
        Win32Key::open(root_key(scope), path, KEY_READ | view_flags(view))
            .map(|key| Box::new(key) as Box<dyn RegistryKey>)
    }
}

struct Win32Key {
    hkey: HKEY,
    sam: REG_SAM_FLAGS,
}

impl Win32Key {
    fn open(parent: HKEY, path: &str, sam: REG_SAM_FLAGS) -> Result<Self, RegistryError> {
        let path = wide_str(path);
        let mut hkey = HKEY::default();
        let status =
            unsafe { RegOpenKeyExW(parent, PCWSTR(path.as_ptr()), 0, sam, &mut hkey) };
        if status.is_err() {
            return Err(map_error(status));
        }
        Ok(Self { hkey, sam })
    }
}

impl RegistryKey for Win32Key {
    fn subkey_names(&self) -> Result<Vec<String>, RegistryError> {
        let mut names = Vec::new();
        for index in 0.. {
            let mut name = [0u16; 256];
            let mut len = name.len() as u32;
            let status = unsafe {
                RegEnumKeyExW(
                    self.hkey,
                    index,
                    windows::core::PWSTR(name.as_mut_ptr()),
                    &mut len,
                    None,
                    windows::core::PWSTR::null(),
                    None,
                    None,
                )
            };
            if status == ERROR_NO_MORE_ITEMS {
                break;
            }
            if status.is_err() {
                return Err(map_error(status));
            }
            names.push(String::from_utf16_lossy(&name[..len as usize]));
        }
        Ok(names)
    }

    fn string_value(&self, name: &str, default: &str) -> String {
        let name = wide_str(name);

        let mut size = 0u32;
        let status = unsafe {
            RegQueryValueExW(
                self.hkey,
                PCWSTR(name.as_ptr()),
                None,
                None,
                None,
                Some(&mut size),
            )
        };
        if status.is_err() || size == 0 {
            return default.to_string();
        }

        let mut data = vec![0u8; size as usize];
        let status = unsafe {
            RegQueryValueExW(
                self.hkey,
                PCWSTR(name.as_ptr()),
                None,
                None,
                Some(data.as_mut_ptr()),
                Some(&mut size),
            )
        };
        if status.is_err() {
            return default.to_string();
        }

        let units: Vec<u16> = data[..size as usize]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .take_while(|&unit| unit != 0)
            .collect();
        String::from_utf16_lossy(&units)
    }

    fn open_subkey(&self, name: &str) -> Result<Box<dyn RegistryKey>, RegistryError> {
        Win32Key::open(self.hkey, name, self.sam)
            .map(|key| Box::new(key) as Box<dyn RegistryKey>)
    }
}

impl Drop for Win32Key {
    fn drop(&mut self) {
        unsafe {
            let _ = RegCloseKey(self.hkey);
        }
    }
}

/// Version info port backed by the VERSIONINFO resource APIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemVersionInfo;

impl VersionInfoPort for SystemVersionInfo {
    fn file_version(&self, path: &Path) -> PackedVersion {
        if !path.is_file() {
            return PackedVersion::ZERO;
        }

        let file = wide(path.as_os_str());
        let size = unsafe { GetFileVersionInfoSizeW(PCWSTR(file.as_ptr()), None) };
        if size == 0 {
            return PackedVersion::ZERO;
        }

        let mut block = vec![0u8; size as usize];
        let loaded = unsafe {
            GetFileVersionInfoW(PCWSTR(file.as_ptr()), 0, size, block.as_mut_ptr().cast())
        };
        if loaded.is_err() {
            return PackedVersion::ZERO;
        }

        let root = wide_str("\\");
        let mut info: *mut core::ffi::c_void = std::ptr::null_mut();
        let mut len = 0u32;
        let queried = unsafe {
            VerQueryValueW(
                block.as_ptr().cast(),
                PCWSTR(root.as_ptr()),
                &mut info,
                &mut len,
            )
        };
        if !queried.as_bool()
            || info.is_null()
            || (len as usize) < std::mem::size_of::<VS_FIXEDFILEINFO>()
        {
            return PackedVersion::ZERO;
        }

        let fixed = unsafe { &*info.cast::<VS_FIXEDFILEINFO>() };
        PackedVersion::new(fixed.dwFileVersionMS)
    }
}

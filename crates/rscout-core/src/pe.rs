//! PE image header probing.
//!
//! Reads just enough of a PE image to learn its target machine type,
//! without loading or mapping the file. Truncated, malformed, and
//! missing files all collapse to [`Arch::None`]; callers cannot
//! distinguish "not a PE file" from "not found".

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::Arch;

/// Offset of the `e_lfanew` field in the legacy DOS header.
const E_LFANEW_OFFSET: u64 = 0x3C;

/// "PE\0\0", little-endian.
const PE_SIGNATURE: u32 = 0x0000_4550;

const IMAGE_FILE_MACHINE_I386: u16 = 0x014C;
const IMAGE_FILE_MACHINE_AMD64: u16 = 0x8664;

/// Read the target machine architecture of a PE image.
pub fn read_arch(path: &Path) -> Arch {
    try_read_arch(path).unwrap_or(Arch::None)
}

fn try_read_arch(path: &Path) -> Option<Arch> {
    let mut file = File::open(path).ok()?;

    let header_offset = read_u32_at(&mut file, E_LFANEW_OFFSET)?;
    let signature = read_u32_at(&mut file, u64::from(header_offset))?;
    if signature != PE_SIGNATURE {
        return None;
    }

    // The machine type immediately follows the signature.
    let machine = read_u16(&mut file)?;
    Some(match machine {
        IMAGE_FILE_MACHINE_I386 => Arch::X86,
        IMAGE_FILE_MACHINE_AMD64 => Arch::X64,
        _ => Arch::Unknown,
    })
}

fn read_u32_at(file: &mut File, offset: u64) -> Option<u32> {
    file.seek(SeekFrom::Start(offset)).ok()?;
    let mut buf = [0u8; 4];
    file.read_exact(&mut buf).ok()?;
    Some(u32::from_le_bytes(buf))
}

fn read_u16(file: &mut File) -> Option<u16> {
    let mut buf = [0u8; 2];
    file.read_exact(&mut buf).ok()?;
    Some(u16::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::write_pe_stub;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempdir().unwrap();
        assert_eq!(read_arch(&dir.path().join("absent.dll")), Arch::None);
    }

    #[test]
    fn empty_file_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.dll");
        fs::write(&path, b"").unwrap();
        assert_eq!(read_arch(&path), Arch::None);
    }

    #[test]
    fn truncated_prefixes_read_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("full.dll");
        write_pe_stub(&path, IMAGE_FILE_MACHINE_AMD64);
        let bytes = fs::read(&path).unwrap();

        // Every proper prefix must degrade to None, never error.
        for len in 0..bytes.len() {
            let truncated = dir.path().join(format!("trunc-{len}.dll"));
            fs::write(&truncated, &bytes[..len]).unwrap();
            assert_eq!(read_arch(&truncated), Arch::None, "prefix length {len}");
        }
    }

    #[test]
    fn bad_signature_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notpe.dll");
        let mut bytes = vec![0u8; 0x40];
        bytes[0x3C..0x40].copy_from_slice(&0x40u32.to_le_bytes());
        bytes.extend_from_slice(b"ELF\0");
        bytes.extend_from_slice(&IMAGE_FILE_MACHINE_AMD64.to_le_bytes());
        fs::write(&path, bytes).unwrap();
        assert_eq!(read_arch(&path), Arch::None);
    }

    #[test]
    fn known_machine_types_map_to_arches() {
        let dir = tempdir().unwrap();

        let x86 = dir.path().join("x86.dll");
        write_pe_stub(&x86, IMAGE_FILE_MACHINE_I386);
        assert_eq!(read_arch(&x86), Arch::X86);

        let x64 = dir.path().join("x64.dll");
        write_pe_stub(&x64, IMAGE_FILE_MACHINE_AMD64);
        assert_eq!(read_arch(&x64), Arch::X64);

        // ARM64 is well-formed but not a machine type we launch against.
        let arm = dir.path().join("arm64.dll");
        write_pe_stub(&arm, 0xAA64);
        assert_eq!(read_arch(&arm), Arch::Unknown);
    }

    #[test]
    fn header_offset_past_eof_reads_as_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("way-out.dll");
        let mut bytes = vec![0u8; 0x40];
        bytes[0x3C..0x40].copy_from_slice(&0x00FF_0000u32.to_le_bytes());
        fs::write(&path, bytes).unwrap();
        assert_eq!(read_arch(&path), Arch::None);
    }
}

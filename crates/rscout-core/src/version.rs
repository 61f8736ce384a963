//! Packed file version values.

use std::fmt;

/// A file version packed into one `u32`: major in the high 16 bits,
/// minor and patch combined in the low 16 bits. The packing matches the
/// `dwFileVersionMS` half of a Windows VERSIONINFO resource, so ranking
/// two versions is a single integer comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PackedVersion(u32);

impl PackedVersion {
    /// The "no version metadata" sentinel.
    pub const ZERO: Self = Self(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn from_parts(major: u16, minor: u16) -> Self {
        Self(((major as u32) << 16) | minor as u32)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn major(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Minor and patch combined, as stored in the low word.
    pub const fn minor(self) -> u16 {
        self.0 as u16
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Check this version against a required floor.
    ///
    /// The comparison is deliberately asymmetric: a strictly greater
    /// major is always sufficient, even with a minor of 0. Only an
    /// equal major falls through to the minor/patch floor.
    pub const fn meets_minimum(self, min_major: u16, min_minor: u16) -> bool {
        if self.major() > min_major {
            return true;
        }
        if self.major() < min_major {
            return false;
        }
        self.minor() >= min_minor
    }
}

impl fmt::Display for PackedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

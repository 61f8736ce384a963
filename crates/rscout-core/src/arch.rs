//! Machine architecture tags for probed binaries.

use serde::{Deserialize, Serialize};

/// Target architecture of a probed binary.
///
/// `None` and `Unknown` are distinct: `None` means no binary could be
/// read at all, `Unknown` means a well-formed binary targets a machine
/// type we do not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arch {
    /// No binary present, or the file was unreadable.
    None,
    /// 32-bit x86.
    X86,
    /// 64-bit x86-64.
    X64,
    /// Binary present but its machine type is not recognized.
    Unknown,
}

impl Arch {
    /// The single architecture this host build launches against.
    pub const HOST_SUPPORTED: Self = Self::X64;

    /// Rank used by the candidate comparator: 64-bit installs sort
    /// before all others.
    pub(crate) const fn sort_rank(self) -> u8 {
        match self {
            Self::X64 => 0,
            Self::X86 => 1,
            Self::Unknown => 2,
            Self::None => 3,
        }
    }

    /// Short label used when rendering a candidate to the user.
    pub const fn display_label(self) -> Option<&'static str> {
        match self {
            Self::X64 => Some("[64-bit]"),
            Self::X86 => Some("[32-bit]"),
            Self::None | Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::X86 => "x86",
            Self::X64 => "x64",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

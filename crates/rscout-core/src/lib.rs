//! rscout-core: discovery and resolution of installed R runtimes.
//!
//! The crate locates candidate R installations from several sources
//! (an environment override, the Windows registry, well-known program
//! directories, a previously persisted choice), validates and ranks
//! them under one total order, and drives a deterministic selection
//! policy that falls back to an interactive chooser only when
//! automatic resolution is ambiguous or invalid.
//!
//! # Design
//!
//! - Core owns the capability traits ([`ports`]) and stays pure; the
//!   Win32 registry and VERSIONINFO adapters live in [`win32`], fakes
//!   in [`testing`].
//! - All host-specific names flow through one explicit
//!   [`DiscoveryProfile`]; there is no global state.
//! - Probe failures degrade to empty or invalid results; nothing below
//!   [`resolve::resolve`] returns an error.

mod arch;
mod context;
mod install;
mod profile;
mod version;

pub mod discover;
pub mod pe;
pub mod ports;
pub mod resolve;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

#[cfg(windows)]
pub mod win32;

pub use arch::Arch;
pub use context::DiscoveryContext;
pub use install::{RuntimeInstall, Validity, bin_dir_to_home_dir};
pub use profile::DiscoveryProfile;
pub use resolve::{ResolutionOutcome, all_candidates, auto_detect, preferred_from_registry, resolve};
pub use version::PackedVersion;

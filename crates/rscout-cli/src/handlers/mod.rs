//! Command handlers.
//!
//! Handlers are thin wrappers: validate CLI input, call into
//! rscout-core through the bootstrapped context, and format output for
//! the terminal. Discovery logic never lives here.

pub mod detect;
pub mod inspect;
pub mod list;
pub mod resolve;

//! forge
//!
//! Abstraction for the pull request host.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and request/response types
//! - [`gh`]: GitHub implementation driving the `gh` CLI
//! - [`mock`]: Mock implementation for deterministic testing

pub mod gh;
pub mod mock;
mod traits;

pub use traits::*;

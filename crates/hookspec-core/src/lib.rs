//! # hookspec-core
//!
//! Core crate for hookspec. Contains the unified error system and the
//! configuration schemas consumed by the hook library and the demo binary.
//!
//! This crate has **no** internal dependencies on other hookspec crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{ErrorKind, HookspecError};
pub use result::HookspecResult;

//! ClipTrim Common Utilities
//!
//! Shared infrastructure for all ClipTrim crates:
//! - Error types and result aliases
//! - Time-based id clock
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;

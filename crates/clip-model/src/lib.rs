//! ClipTrim Clip Model
//!
//! Defines the core data contracts for ClipTrim:
//! - **Clip:** Persisted record of a trimmed sub-range plus its metadata
//! - **Draft:** Form input for a new clip, validated before any work starts
//! - **Selection:** A validated `[start, end)` range in seconds
//! - **Media:** Probed information about a source file
//!
//! All times are seconds (`f64`) from the start of the source media.

pub mod clip;
pub mod media;
pub mod selection;

pub use clip::*;
pub use media::*;
pub use selection::*;

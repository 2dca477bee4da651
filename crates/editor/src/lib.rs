//! ClipTrim Editor
//!
//! State machines behind the trimming screen and the clip list:
//! - **Trim controller:** Playhead, start/end markers, and play/pause for
//!   the scrubber while a source is being trimmed
//! - **Clip preview:** Bounded playback of a saved clip inside its range
//! - **Time labels:** `mm:ss` formatting for marker and playhead labels
//!
//! This crate is pure computation: no I/O and no player bindings. A player
//! adapter feeds ticks in and drains seek requests out.

pub mod controller;
pub mod preview;
pub mod timefmt;

pub use controller::{PlaybackState, TickOutcome, TrimController};
pub use preview::ClipPreview;
pub use timefmt::format_timestamp;

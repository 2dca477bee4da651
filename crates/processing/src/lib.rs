//! ClipTrim Processing
//!
//! The boundary between ClipTrim and the external media tools.
//!
//! ```text
//! TrimRequest ──┐
//!               ├── validate range ── check source access
//!               │                              │
//!               │            ┌─────────────────┴───────────────┐
//!               │            ▼                                 ▼
//!               │     FfmpegTrimmer                   PassthroughGateway
//!               │  ffmpeg -i src -ss S -t D          (returns the source)
//!               │   -c:v copy -c:a copy out
//!               │            │                                 │
//!               └────────────┴──────────► ClipHandle ◄─────────┘
//! ```
//!
//! Media probing sits next to it: `FfprobeProber` asks `ffprobe`, the
//! `StaticProber` returns fixed development values.

pub mod ffmpeg;
pub mod gateway;
pub mod passthrough;
pub mod probe;
pub mod source;

pub use ffmpeg::FfmpegTrimmer;
pub use gateway::*;
pub use passthrough::PassthroughGateway;
pub use probe::{FfprobeProber, MediaProber, StaticProber};

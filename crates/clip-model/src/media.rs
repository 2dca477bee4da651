//! Probed information about a source media file.

use serde::{Deserialize, Serialize};

/// Media metadata shown before trimming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Duration in seconds.
    pub duration_secs: f64,

    /// Video width in pixels (0 if unknown or audio-only).
    #[serde(default)]
    pub width: u32,

    /// Video height in pixels (0 if unknown or audio-only).
    #[serde(default)]
    pub height: u32,

    /// File size in bytes, when known.
    #[serde(default)]
    pub size_bytes: Option<u64>,

    /// Container format name (e.g. `mp4`).
    #[serde(default)]
    pub format: String,
}

impl MediaInfo {
    /// Fixed values returned by the development prober.
    pub fn placeholder() -> Self {
        Self {
            duration_secs: 120.0,
            width: 1280,
            height: 720,
            size_bytes: Some(10 * 1024 * 1024),
            format: "mp4".to_string(),
        }
    }

    /// Whether a usable duration was probed.
    pub fn has_duration(&self) -> bool {
        self.duration_secs.is_finite() && self.duration_secs > 0.0
    }

    /// Human-readable size, e.g. `10.0 MB`.
    pub fn size_label(&self) -> Option<String> {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let bytes = self.size_bytes?;
        let mut value = bytes as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        Some(if unit == 0 {
            format!("{bytes} B")
        } else {
            format!("{value:.1} {}", UNITS[unit])
        })
    }
}

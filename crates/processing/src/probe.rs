//! Media probing.

use std::path::PathBuf;
use std::process::Stdio;

use serde::Deserialize;

use cliptrim_clip_model::MediaInfo;
use cliptrim_common::error::{CliptrimError, CliptrimResult};

use crate::ffmpeg::command_exists;
use crate::source::{check_source_access, tool_input};

/// Looks up duration and basic properties of a source.
#[async_trait::async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, uri: &str) -> CliptrimResult<MediaInfo>;

    /// Check if this prober can run on the system.
    fn is_available(&self) -> bool;

    /// Prober name.
    fn name(&self) -> &str;
}

/// Probes with `ffprobe -of json`.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: PathBuf,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl MediaProber for FfprobeProber {
    async fn probe(&self, uri: &str) -> CliptrimResult<MediaInfo> {
        check_source_access(uri).await?;

        let output = tokio::process::Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration,size,format_name:stream=codec_type,width,height",
                "-of",
                "json",
            ])
            .arg(tool_input(uri))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                CliptrimError::processing(format!(
                    "Failed to start {}: {e}",
                    self.ffprobe_path.display()
                ))
            })?;

        if !output.status.success() {
            return Err(CliptrimError::processing(format!(
                "ffprobe failed (status {}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let info = parse_ffprobe_output(&String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(uri, duration_secs = info.duration_secs, "Probed media");
        Ok(info)
    }

    fn is_available(&self) -> bool {
        command_exists(&self.ffprobe_path)
    }

    fn name(&self) -> &str {
        "ffprobe"
    }
}

/// Returns fixed media info without touching the source.
#[derive(Debug, Clone)]
pub struct StaticProber {
    info: MediaInfo,
}

impl StaticProber {
    pub fn new(info: MediaInfo) -> Self {
        Self { info }
    }
}

impl Default for StaticProber {
    fn default() -> Self {
        Self::new(MediaInfo::placeholder())
    }
}

#[async_trait::async_trait]
impl MediaProber for StaticProber {
    async fn probe(&self, _uri: &str) -> CliptrimResult<MediaInfo> {
        Ok(self.info.clone())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
    size: Option<String>,
    format_name: Option<String>,
}

/// Parse `ffprobe -of json` output into [`MediaInfo`].
pub fn parse_ffprobe_output(json: &str) -> CliptrimResult<MediaInfo> {
    let parsed: ProbeOutput = serde_json::from_str(json)?;
    let format = parsed
        .format
        .ok_or_else(|| CliptrimError::processing("ffprobe output has no format section"))?;

    let duration_secs = format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .unwrap_or(0.0);

    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"));

    Ok(MediaInfo {
        duration_secs,
        width: video.and_then(|s| s.width).unwrap_or(0),
        height: video.and_then(|s| s.height).unwrap_or(0),
        size_bytes: format.size.as_deref().and_then(|s| s.parse().ok()),
        format: format
            .format_name
            .as_deref()
            .and_then(|f| f.split(',').next())
            .unwrap_or_default()
            .to_string(),
    })
}

//! The clip processing contract.

use std::sync::Arc;
use std::time::Duration;

use cliptrim_clip_model::TrimSelection;
use cliptrim_common::config::{AppConfig, ProcessingBackend};
use cliptrim_common::error::{CliptrimError, CliptrimResult};

use crate::ffmpeg::FfmpegTrimmer;
use crate::passthrough::PassthroughGateway;
use crate::probe::{FfprobeProber, MediaProber, StaticProber};

/// A request to cut `[start, end)` out of a source.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimRequest {
    /// Source media reference.
    pub source_uri: String,

    /// Start of the cut, in seconds.
    pub start_secs: f64,

    /// End of the cut, in seconds.
    pub end_secs: f64,

    /// Source duration when known; bounds `end_secs`.
    pub source_duration_secs: Option<f64>,
}

impl TrimRequest {
    pub fn new(source_uri: impl Into<String>, start_secs: f64, end_secs: f64) -> Self {
        Self {
            source_uri: source_uri.into(),
            start_secs,
            end_secs,
            source_duration_secs: None,
        }
    }

    pub fn from_selection(source_uri: impl Into<String>, selection: TrimSelection) -> Self {
        Self::new(source_uri, selection.start_secs(), selection.end_secs())
    }

    pub fn with_source_duration(mut self, duration_secs: f64) -> Self {
        self.source_duration_secs = Some(duration_secs).filter(|d| d.is_finite() && *d > 0.0);
        self
    }

    /// Check the range before anything external runs.
    pub fn validate(&self) -> CliptrimResult<TrimSelection> {
        if self.source_uri.trim().is_empty() {
            return Err(CliptrimError::processing("no source media given"));
        }
        let selection = match self.source_duration_secs {
            Some(duration) => TrimSelection::within(self.start_secs, self.end_secs, duration),
            None => TrimSelection::new(self.start_secs, self.end_secs),
        };
        selection.map_err(|e| CliptrimError::processing(format!("invalid trim range: {e}")))
    }
}

/// Reference to the media produced by a successful trim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipHandle {
    pub uri: String,
}

/// Produces trimmed media from a source.
///
/// Implementations validate the request before doing any work and never
/// report partial output as success.
#[async_trait::async_trait]
pub trait ClipGateway: Send + Sync {
    /// Cut the requested range out of the source.
    async fn produce_clip(&self, request: &TrimRequest) -> CliptrimResult<ClipHandle>;

    /// Check if this gateway can run on the system.
    fn is_available(&self) -> bool;

    /// Gateway name.
    fn name(&self) -> &str;
}

/// Gateway selected by the configuration.
pub fn gateway_from_config(config: &AppConfig) -> Arc<dyn ClipGateway> {
    match config.processing.backend {
        ProcessingBackend::Ffmpeg => Arc::new(FfmpegTrimmer::new(
            config.processing.ffmpeg_path.clone(),
            config.output_dir(),
        )),
        ProcessingBackend::Passthrough => Arc::new(PassthroughGateway::with_delay(
            Duration::from_millis(config.processing.passthrough_delay_ms),
        )),
    }
}

/// Prober selected by the configuration.
pub fn prober_from_config(config: &AppConfig) -> Arc<dyn MediaProber> {
    match config.processing.backend {
        ProcessingBackend::Ffmpeg => {
            Arc::new(FfprobeProber::new(config.processing.ffprobe_path.clone()))
        }
        ProcessingBackend::Passthrough => Arc::new(StaticProber::default()),
    }
}

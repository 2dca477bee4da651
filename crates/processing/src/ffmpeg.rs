//! Trimming with an external ffmpeg process.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use cliptrim_clip_model::TrimSelection;
use cliptrim_common::clock::global_id_clock;
use cliptrim_common::error::{CliptrimError, CliptrimResult};

use crate::gateway::{ClipGateway, ClipHandle, TrimRequest};
use crate::source::{check_source_access, tool_input};

/// Cuts clips by stream-copying the selected range with ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegTrimmer {
    ffmpeg_path: PathBuf,
    output_dir: PathBuf,
}

impl FfmpegTrimmer {
    pub fn new(ffmpeg_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Unique output path, `cropped_<millis>.mp4`.
    fn next_output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("cropped_{}.mp4", global_id_clock().next_id()))
    }

    async fn run_ffmpeg(&self, args: &[String], output: &Path) -> CliptrimResult<()> {
        tracing::debug!(args = ?args, "Running ffmpeg");
        let started = std::time::Instant::now();

        let result = tokio::process::Command::new(&self.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                CliptrimError::processing(format!(
                    "Failed to start {}: {e}",
                    self.ffmpeg_path.display()
                ))
            })?;

        if !result.status.success() {
            discard_partial_output(output).await;
            let logs = aggregate_log_lines(&String::from_utf8_lossy(&result.stderr));
            return Err(CliptrimError::processing(format!(
                "ffmpeg trim failed (status {}): {}",
                result.status, logs
            )));
        }

        if tokio::fs::metadata(output).await.is_err() {
            return Err(CliptrimError::processing(format!(
                "ffmpeg reported success but wrote no output at {}",
                output.display()
            )));
        }

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis(),
            output = %output.display(),
            "ffmpeg trim finished"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl ClipGateway for FfmpegTrimmer {
    async fn produce_clip(&self, request: &TrimRequest) -> CliptrimResult<ClipHandle> {
        let selection = request.validate()?;
        check_source_access(&request.source_uri).await?;

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                CliptrimError::processing(format!(
                    "cannot create output directory {}: {e}",
                    self.output_dir.display()
                ))
            })?;
        let output = self.next_output_path();
        let args = build_trim_args(&tool_input(&request.source_uri), selection, &output);

        tracing::info!(
            source = %request.source_uri,
            start_secs = selection.start_secs(),
            end_secs = selection.end_secs(),
            "Cropping clip"
        );
        self.run_ffmpeg(&args, &output).await?;

        Ok(ClipHandle {
            uri: output.display().to_string(),
        })
    }

    fn is_available(&self) -> bool {
        command_exists(&self.ffmpeg_path)
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// `-i <source> -ss <start> -t <end-start> -c:v copy -c:a copy <output>`
pub fn build_trim_args(input: &str, selection: TrimSelection, output: &Path) -> Vec<String> {
    vec![
        "-i".to_string(),
        input.to_string(),
        "-ss".to_string(),
        format_secs(selection.start_secs()),
        "-t".to_string(),
        format_secs(selection.duration_secs()),
        "-c:v".to_string(),
        "copy".to_string(),
        "-c:a".to_string(),
        "copy".to_string(),
        output.display().to_string(),
    ]
}

/// Seconds rounded to milliseconds, without trailing zeros (`10`, `2.5`).
fn format_secs(secs: f64) -> String {
    let rounded = (secs * 1000.0).round() / 1000.0;
    format!("{rounded}")
}

/// Non-empty log lines joined into one diagnostic.
fn aggregate_log_lines(stderr: &str) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        "<no output>".to_string()
    } else {
        lines.join("\n")
    }
}

async fn discard_partial_output(output: &Path) {
    match tokio::fs::remove_file(output).await {
        Ok(()) => tracing::debug!(path = %output.display(), "Removed partial ffmpeg output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(error = %e, path = %output.display(), "Failed to remove partial output")
        }
    }
}

pub(crate) fn command_exists(binary: &Path) -> bool {
    if binary.components().count() > 1 {
        return binary.is_file();
    }
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {} >/dev/null 2>&1", binary.display()))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default storage key for the persisted clip list.
pub const DEFAULT_STORAGE_KEY: &str = "video-storage";

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the persisted clip list.
    pub data_dir: PathBuf,

    /// Clip store settings.
    pub storage: StorageConfig,

    /// Trimming backend settings.
    pub processing: ProcessingConfig,

    /// Editor defaults.
    pub editor: EditorDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Clip store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Name of the persisted blob. The file is `<data_dir>/<key>.json`.
    pub key: String,
}

/// Which gateway produces trimmed clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingBackend {
    /// Run an external ffmpeg binary.
    #[default]
    Ffmpeg,
    /// Return the source unchanged (development/testing).
    Passthrough,
}

/// Trimming backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Backend selection.
    pub backend: ProcessingBackend,

    /// ffmpeg binary name or path.
    pub ffmpeg_path: PathBuf,

    /// ffprobe binary name or path.
    pub ffprobe_path: PathBuf,

    /// Directory for trimmed output. Defaults to `<data_dir>/clips`.
    pub output_dir: Option<PathBuf>,

    /// Artificial latency of the passthrough backend, in milliseconds.
    pub passthrough_delay_ms: u64,
}

/// Editor defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// Length of the initial selection when a new source is loaded.
    pub default_selection_secs: f64,

    /// Suffix appended to the name of a clip duplicated into a new crop.
    pub copy_suffix: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cliptrim=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs_default_data(),
            storage: StorageConfig::default(),
            processing: ProcessingConfig::default(),
            editor: EditorDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            backend: ProcessingBackend::Ffmpeg,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            output_dir: None,
            passthrough_delay_ms: 0,
        }
    }
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            default_selection_secs: 5.0,
            copy_suffix: " (Copy)".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Path of the persisted clip list.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage.key))
    }

    /// Directory where trimmed clips are written.
    pub fn output_dir(&self) -> PathBuf {
        self.processing
            .output_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("clips"))
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cliptrim").join("config.json")
}

/// Default data directory.
fn dirs_default_data() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("cliptrim")
}

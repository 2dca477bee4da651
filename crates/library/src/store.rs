//! Durable clip storage.
//!
//! The collection is persisted as one JSON document under a fixed key:
//!
//! ```json
//! {"state": {"videos": [ ... ]}, "version": 0}
//! ```
//!
//! Writes go through a temp file followed by a rename, so a crash mid-write
//! leaves the previous document intact.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use cliptrim_clip_model::{ClipId, ClipRecord};
use cliptrim_common::error::{CliptrimError, CliptrimResult};

/// Schema version written into the persisted document.
pub const STORE_SCHEMA_VERSION: u32 = 0;

/// Clip collection keyed by id.
///
/// `put` replaces a record with the same id in place and appends otherwise.
/// `remove` of an unknown id succeeds without changes.
#[async_trait::async_trait]
pub trait ClipStore: Send + Sync {
    async fn get_all(&self) -> CliptrimResult<Vec<ClipRecord>>;

    async fn put(&self, record: ClipRecord) -> CliptrimResult<()>;

    async fn remove(&self, id: &ClipId) -> CliptrimResult<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedDocument {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    videos: Vec<ClipRecord>,
}

/// Store backed by a single JSON file, written through on every change.
#[derive(Debug)]
pub struct JsonClipStore {
    path: PathBuf,
    clips: Mutex<Vec<ClipRecord>>,
}

impl JsonClipStore {
    /// Open the store at `path`, loading what is already there.
    pub async fn open(path: impl Into<PathBuf>) -> CliptrimResult<Self> {
        let store = Self {
            path: path.into(),
            clips: Mutex::new(Vec::new()),
        };
        store.load().await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the document from disk. A missing file is an empty store.
    pub async fn load(&self) -> CliptrimResult<usize> {
        let loaded = read_document(&self.path).await?;
        let count = loaded.len();
        *self.clips.lock().await = loaded;
        tracing::debug!(path = %self.path.display(), count, "Loaded clip store");
        Ok(count)
    }

    /// Write the current contents to disk.
    pub async fn flush(&self) -> CliptrimResult<()> {
        let clips = self.clips.lock().await;
        write_document(&self.path, &clips).await
    }
}

#[async_trait::async_trait]
impl ClipStore for JsonClipStore {
    async fn get_all(&self) -> CliptrimResult<Vec<ClipRecord>> {
        Ok(self.clips.lock().await.clone())
    }

    async fn put(&self, record: ClipRecord) -> CliptrimResult<()> {
        let mut clips = self.clips.lock().await;
        let mut next = clips.clone();
        upsert(&mut next, record);
        write_document(&self.path, &next).await?;
        *clips = next;
        Ok(())
    }

    async fn remove(&self, id: &ClipId) -> CliptrimResult<()> {
        let mut clips = self.clips.lock().await;
        if !clips.iter().any(|c| c.id() == id) {
            return Ok(());
        }
        let next: Vec<ClipRecord> = clips.iter().filter(|c| c.id() != id).cloned().collect();
        write_document(&self.path, &next).await?;
        *clips = next;
        Ok(())
    }
}

fn upsert(clips: &mut Vec<ClipRecord>, record: ClipRecord) {
    match clips.iter_mut().find(|c| c.id() == record.id()) {
        Some(existing) => *existing = record,
        None => clips.push(record),
    }
}

async fn read_document(path: &Path) -> CliptrimResult<Vec<ClipRecord>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(CliptrimError::persistence(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        }
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let document: PersistedDocument = serde_json::from_str(&content).map_err(|e| {
        CliptrimError::persistence(format!("failed to parse {}: {e}", path.display()))
    })?;
    if document.version != STORE_SCHEMA_VERSION {
        tracing::warn!(
            path = %path.display(),
            version = document.version,
            "Clip store written by a different schema version"
        );
    }
    Ok(document.state.videos)
}

async fn write_document(path: &Path, clips: &[ClipRecord]) -> CliptrimResult<()> {
    let persistence = |action: &str, e: &dyn std::fmt::Display| {
        CliptrimError::persistence(format!("failed to {action} {}: {e}", path.display()))
    };

    let document = PersistedDocument {
        state: PersistedState {
            videos: clips.to_vec(),
        },
        version: STORE_SCHEMA_VERSION,
    };
    let json = serde_json::to_string_pretty(&document).map_err(|e| persistence("encode", &e))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| persistence("create directory for", &e))?;
    }

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, json)
        .await
        .map_err(|e| persistence("write", &e))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(persistence("replace", &e));
    }
    tracing::trace!(path = %path.display(), count = clips.len(), "Clip store written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory store with switchable write failures.
#[derive(Debug, Default)]
pub struct MemoryClipStore {
    clips: Mutex<Vec<ClipRecord>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clips(clips: Vec<ClipRecord>) -> Self {
        Self {
            clips: Mutex::new(clips),
            ..Self::default()
        }
    }

    /// Make every following `put`/`remove` fail with a persistence error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_writable(&self) -> CliptrimResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CliptrimError::persistence("store write rejected"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ClipStore for MemoryClipStore {
    async fn get_all(&self) -> CliptrimResult<Vec<ClipRecord>> {
        Ok(self.clips.lock().await.clone())
    }

    async fn put(&self, record: ClipRecord) -> CliptrimResult<()> {
        self.check_writable()?;
        upsert(&mut *self.clips.lock().await, record);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, id: &ClipId) -> CliptrimResult<()> {
        self.check_writable()?;
        self.clips.lock().await.retain(|c| c.id() != id);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cliptrim_clip_model::TrimSelection;

    fn record(id: &str, name: &str) -> ClipRecord {
        ClipRecord::new(
            ClipId::new(id),
            "file:///v/a.mp4",
            name,
            None,
            TrimSelection::new(1.0, 4.0).unwrap(),
        )
        .unwrap()
    }

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cliptrim-store-{tag}-{}", std::process::id()))
            .join("video-storage.json")
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let path = temp_store_path("missing");
        let _ = std::fs::remove_file(&path);
        let store = JsonClipStore::open(&path).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_put_upserts_in_place() {
        let path = temp_store_path("upsert");
        let _ = std::fs::remove_file(&path);
        let store = JsonClipStore::open(&path).await.unwrap();

        store.put(record("1", "one")).await.unwrap();
        store.put(record("2", "two")).await.unwrap();
        store.put(record("1", "uno")).await.unwrap();

        let names: Vec<String> = store
            .get_all()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["uno", "two"]);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_document_layout() {
        let path = temp_store_path("layout");
        let _ = std::fs::remove_file(&path);
        let store = JsonClipStore::open(&path).await.unwrap();
        store.put(record("42", "clip")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 0);
        assert_eq!(raw["state"]["videos"][0]["id"], "42");
        assert_eq!(raw["state"]["videos"][0]["startTime"], 1.0);
        assert!(!temp_path(&path).exists());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let store = MemoryClipStore::with_clips(vec![record("1", "one")]);
        store.remove(&ClipId::new("nope")).await.unwrap();
        assert_eq!(store.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_document_is_persistence_error() {
        let path = temp_store_path("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonClipStore::open(&path).await.unwrap_err();
        assert!(err.is_persistence());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_failing_memory_store() {
        let store = MemoryClipStore::new();
        store.set_fail_writes(true);
        assert!(store.put(record("1", "one")).await.unwrap_err().is_persistence());
        assert!(store.get_all().await.unwrap().is_empty());
        store.set_fail_writes(false);
        store.put(record("1", "one")).await.unwrap();
        assert_eq!(store.write_count(), 1);
    }
}

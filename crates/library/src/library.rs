//! Wiring of store, cache, and processing backends from configuration.

use std::sync::Arc;

use cliptrim_clip_model::ClipRecord;
use cliptrim_common::config::AppConfig;
use cliptrim_common::error::CliptrimResult;
use cliptrim_processing::{gateway_from_config, prober_from_config, ClipGateway};

use crate::cache::ClipQueries;
use crate::store::JsonClipStore;
use crate::workflow::CropSession;

/// An opened clip library.
pub struct ClipLibrary {
    config: AppConfig,
    store: Arc<JsonClipStore>,
    queries: ClipQueries,
    gateway: Arc<dyn ClipGateway>,
}

impl ClipLibrary {
    /// Open the JSON store under the configured data directory and pick the
    /// configured processing backend.
    pub async fn open(config: AppConfig) -> CliptrimResult<Self> {
        let store = Arc::new(JsonClipStore::open(config.store_path()).await?);
        let gateway = gateway_from_config(&config);
        let prober = prober_from_config(&config);
        let queries = ClipQueries::new(store.clone(), prober);
        queries.refresh().await?;

        tracing::info!(
            store = %store.path().display(),
            backend = gateway.name(),
            clips = queries.cached().len(),
            "Clip library opened"
        );
        Ok(Self {
            config,
            store,
            queries,
            gateway,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn queries(&self) -> &ClipQueries {
        &self.queries
    }

    pub fn gateway(&self) -> &dyn ClipGateway {
        self.gateway.as_ref()
    }

    pub fn store(&self) -> &JsonClipStore {
        &self.store
    }

    /// Empty crop form using the configured editor defaults.
    pub fn new_session(&self) -> CropSession {
        CropSession::new(self.config.editor.clone())
    }

    /// Crop form pre-filled from a saved clip.
    pub fn duplicate(&self, record: &ClipRecord) -> CropSession {
        CropSession::from_saved(record, self.config.editor.clone())
    }

    /// Write the store back to disk.
    pub async fn close(&self) -> CliptrimResult<()> {
        self.store.flush().await
    }
}

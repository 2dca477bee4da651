//! Crop and edit workflows.
//!
//! A [`CropSession`] carries one crop form from source pick to saved clip:
//! the trim controller, the probed media, and the name/description fields.
//! Nothing external runs until [`CropSession::submit`] has validated the
//! whole draft.

use cliptrim_clip_model::{ClipDraft, ClipId, ClipRecord, MediaInfo, ValidationError};
use cliptrim_common::clock::global_id_clock;
use cliptrim_common::config::EditorDefaults;
use cliptrim_common::error::{CliptrimError, CliptrimResult};
use cliptrim_editor::TrimController;
use cliptrim_processing::{ClipGateway, TrimRequest};

use crate::cache::{ClipQueries, PendingMutation};

pub(crate) fn invalid(e: ValidationError) -> CliptrimError {
    CliptrimError::validation(e.to_string())
}

/// State of one crop form.
#[derive(Debug, Clone)]
pub struct CropSession {
    source_uri: Option<String>,
    controller: TrimController,
    media: Option<MediaInfo>,
    name: String,
    description: String,
    defaults: EditorDefaults,
}

impl CropSession {
    /// Empty form.
    pub fn new(defaults: EditorDefaults) -> Self {
        Self {
            source_uri: None,
            controller: TrimController::new(),
            media: None,
            name: String::new(),
            description: String::new(),
            defaults,
        }
    }

    /// Form pre-filled from a saved clip: same source and markers, the
    /// description copied and the name marked as a copy.
    pub fn from_saved(record: &ClipRecord, defaults: EditorDefaults) -> Self {
        let name = format!("{}{}", record.name(), defaults.copy_suffix);
        Self {
            source_uri: Some(record.source_uri().to_string()),
            controller: TrimController::with_range(record.selection(), 0.0),
            media: None,
            name,
            description: record.description().unwrap_or_default().to_string(),
            defaults,
        }
    }

    /// Load a newly picked source. Markers are reset; once the duration is
    /// known the selection covers the first few seconds of it.
    pub async fn pick_source(
        &mut self,
        uri: impl Into<String>,
        queries: &ClipQueries,
    ) -> CliptrimResult<MediaInfo> {
        let uri = uri.into();
        tracing::debug!(uri = %uri, "Source picked");
        self.source_uri = Some(uri);
        self.controller = TrimController::new();
        self.media = None;

        let info = self.refresh_media(queries).await?;
        let initial = self.defaults.default_selection_secs;
        if initial.is_finite() && initial > 0.0 && initial < self.controller.total_duration() {
            self.controller.set_end_marker(initial);
        }
        Ok(info)
    }

    /// Probe the current source and hand its duration to the controller.
    /// Markers already placed are kept.
    pub async fn refresh_media(&mut self, queries: &ClipQueries) -> CliptrimResult<MediaInfo> {
        let uri = self
            .source_uri
            .clone()
            .ok_or_else(|| invalid(ValidationError::MissingSource))?;
        let info = queries.media_info(&uri).await?;
        if info.has_duration() {
            self.controller.load_source(info.duration_secs);
        }
        self.media = Some(info.clone());
        Ok(info)
    }

    /// Place both markers at once. Either both are applied or neither.
    pub fn set_selection(&mut self, start_secs: f64, end_secs: f64) -> bool {
        let mut next = self.controller.clone();
        let applied = if start_secs < next.end_marker() {
            next.set_start_marker(start_secs) && next.set_end_marker(end_secs)
        } else {
            next.set_end_marker(end_secs) && next.set_start_marker(start_secs)
        };
        if applied {
            self.controller = next;
        }
        applied
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source_uri(&self) -> Option<&str> {
        self.source_uri.as_deref()
    }

    pub fn media(&self) -> Option<&MediaInfo> {
        self.media.as_ref()
    }

    pub fn controller(&self) -> &TrimController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TrimController {
        &mut self.controller
    }

    /// Current form contents.
    pub fn draft(&self) -> ClipDraft {
        ClipDraft {
            source_uri: self.source_uri.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            start_secs: self.controller.start_marker(),
            end_secs: self.controller.end_marker(),
        }
    }

    /// Validate, cut the clip, and save it.
    ///
    /// A validation failure returns before the gateway or the store is
    /// touched.
    pub async fn submit(
        &self,
        gateway: &dyn ClipGateway,
        queries: &ClipQueries,
    ) -> CliptrimResult<ClipRecord> {
        let draft = self.draft().validate().map_err(invalid)?;

        let mut request = TrimRequest::from_selection(&draft.source_uri, draft.selection);
        if self.controller.has_duration() {
            request = request.with_source_duration(self.controller.total_duration());
        }
        let produced = gateway.produce_clip(&request).await?;

        let id = ClipId::from_millis(global_id_clock().next_id());
        let record = ClipRecord::from_draft(id, produced.uri, &draft).map_err(invalid)?;
        queries.insert_clip(record.clone()).await?;
        tracing::info!(
            clip_id = %record.id(),
            gateway = gateway.name(),
            start_secs = record.start_time(),
            end_secs = record.end_time(),
            "Clip created"
        );
        Ok(record)
    }
}

/// Rename or re-describe a saved clip. The cache shows the change at once.
pub fn edit_clip(
    queries: &ClipQueries,
    record: &ClipRecord,
    name: &str,
    description: Option<&str>,
) -> CliptrimResult<PendingMutation> {
    let updated = record.with_metadata(name, description).map_err(invalid)?;
    queries.replace_clip(updated)
}

//! Clip records and the draft form that creates them.
//!
//! A [`ClipRecord`] can only be built through constructors that validate
//! its fields, and deserialization goes through the same checks, so a
//! record in memory always satisfies `name` non-empty and
//! `0 <= start_time < end_time`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selection::TrimSelection;

/// Unique, immutable clip identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Time-based id from a millisecond timestamp.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClipId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A persisted clip: a trimmed sub-range of a source plus its metadata.
///
/// `source_uri` is the media the range was cut from and the one its offsets
/// refer to. `media_uri` is what plays the clip: the trimmed output, or the
/// source itself when no separate file was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClipRecord", into = "RawClipRecord")]
pub struct ClipRecord {
    id: ClipId,
    source_uri: String,
    media_uri: String,
    name: String,
    description: Option<String>,
    selection: TrimSelection,
}

/// Wire shape of a clip record, before validation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawClipRecord {
    id: ClipId,
    /// Playable media.
    uri: String,
    /// Missing in blobs written before sources were tracked separately.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_uri: Option<String>,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start_time: f64,
    end_time: f64,
}

impl From<ClipRecord> for RawClipRecord {
    fn from(record: ClipRecord) -> Self {
        Self {
            id: record.id,
            uri: record.media_uri,
            source_uri: Some(record.source_uri),
            name: record.name,
            description: record.description,
            start_time: record.selection.start_secs(),
            end_time: record.selection.end_secs(),
        }
    }
}

impl TryFrom<RawClipRecord> for ClipRecord {
    type Error = ValidationError;

    fn try_from(raw: RawClipRecord) -> Result<Self, Self::Error> {
        let selection = TrimSelection::new(raw.start_time, raw.end_time)?;
        let source_uri = raw
            .source_uri
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| raw.uri.clone());
        ClipRecord::new(raw.id, source_uri, raw.name, raw.description, selection)?
            .with_media_uri(raw.uri)
    }
}

impl ClipRecord {
    /// Create a record that plays straight from its source. The name is
    /// trimmed and must not be empty; a blank description is stored as `None`.
    pub fn new(
        id: ClipId,
        source_uri: impl Into<String>,
        name: impl AsRef<str>,
        description: Option<String>,
        selection: TrimSelection,
    ) -> Result<Self, ValidationError> {
        if id.as_str().trim().is_empty() {
            return Err(ValidationError::MissingId);
        }
        let source_uri = source_uri.into();
        if source_uri.trim().is_empty() {
            return Err(ValidationError::MissingSource);
        }
        Ok(Self {
            id,
            media_uri: source_uri.clone(),
            source_uri,
            name: normalize_name(name.as_ref())?,
            description: normalize_description(description.as_deref()),
            selection,
        })
    }

    /// Build the record for a validated draft once its media has been produced.
    pub fn from_draft(
        id: ClipId,
        media_uri: impl Into<String>,
        draft: &ValidDraft,
    ) -> Result<Self, ValidationError> {
        Self::new(
            id,
            &draft.source_uri,
            &draft.name,
            Some(draft.description.clone()),
            draft.selection,
        )?
        .with_media_uri(media_uri)
    }

    /// Point the record at separately produced media.
    pub fn with_media_uri(self, media_uri: impl Into<String>) -> Result<Self, ValidationError> {
        let media_uri = media_uri.into();
        if media_uri.trim().is_empty() {
            return Err(ValidationError::MissingSource);
        }
        Ok(Self { media_uri, ..self })
    }

    pub fn id(&self) -> &ClipId {
        &self.id
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    pub fn media_uri(&self) -> &str {
        &self.media_uri
    }

    /// Whether the clip plays from a file of its own rather than the source.
    pub fn has_own_media(&self) -> bool {
        self.media_uri != self.source_uri
    }

    /// The clip's range inside its playable media: the stored selection
    /// when it plays from the source, otherwise the whole trimmed file.
    pub fn media_range(&self) -> TrimSelection {
        if self.has_own_media() {
            TrimSelection::from_origin(self.selection.duration_secs())
        } else {
            self.selection
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn start_time(&self) -> f64 {
        self.selection.start_secs()
    }

    pub fn end_time(&self) -> f64 {
        self.selection.end_secs()
    }

    pub fn selection(&self) -> TrimSelection {
        self.selection
    }

    /// Replacement record with new name/description (edit screen).
    pub fn with_metadata(
        &self,
        name: impl AsRef<str>,
        description: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_name(name.as_ref())?,
            description: normalize_description(description),
            ..self.clone()
        })
    }
}

/// Form input for a new clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipDraft {
    pub source_uri: Option<String>,
    pub name: String,
    pub description: String,
    pub start_secs: f64,
    pub end_secs: f64,
}

/// A draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub source_uri: String,
    pub name: String,
    pub description: String,
    pub selection: TrimSelection,
}

impl ClipDraft {
    /// Validate the draft in the order the user sees problems: metadata
    /// first, then source, then range.
    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let name = normalize_name(&self.name)?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        let source_uri = match self.source_uri.as_deref().map(str::trim) {
            Some(uri) if !uri.is_empty() => uri.to_string(),
            _ => return Err(ValidationError::MissingSource),
        };
        let selection = TrimSelection::new(self.start_secs, self.end_secs)?;
        Ok(ValidDraft {
            source_uri,
            name,
            description: description.to_string(),
            selection,
        })
    }
}

fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

fn normalize_description(description: Option<&str>) -> Option<String> {
    description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Invalid clip input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("Description is required")]
    EmptyDescription,

    #[error("Please select a video.")]
    MissingSource,

    #[error("Clip id is required")]
    MissingId,

    #[error("{message}")]
    InvalidRange { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ClipDraft {
        ClipDraft {
            source_uri: Some("file:///videos/beach.mp4".to_string()),
            name: "  Sunset ".to_string(),
            description: "waves".to_string(),
            start_secs: 0.0,
            end_secs: 5.0,
        }
    }

    #[test]
    fn test_draft_validation_trims_fields() {
        let valid = draft().validate().unwrap();
        assert_eq!(valid.name, "Sunset");
        assert_eq!(valid.source_uri, "file:///videos/beach.mp4");
        assert!((valid.selection.end_secs() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_draft_with_empty_name_is_rejected() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(d.validate().unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn test_draft_with_empty_description_is_rejected() {
        let mut d = draft();
        d.description = String::new();
        assert_eq!(d.validate().unwrap_err(), ValidationError::EmptyDescription);
    }

    #[test]
    fn test_draft_without_source_is_rejected() {
        let mut d = draft();
        d.source_uri = None;
        assert_eq!(d.validate().unwrap_err(), ValidationError::MissingSource);
    }

    #[test]
    fn test_draft_with_inverted_range_is_rejected() {
        let mut d = draft();
        d.start_secs = 6.0;
        assert!(matches!(
            d.validate().unwrap_err(),
            ValidationError::InvalidRange { .. }
        ));
    }

    #[test]
    fn test_record_serializes_in_persisted_layout() {
        let valid = draft().validate().unwrap();
        let record =
            ClipRecord::from_draft(ClipId::from_millis(1_700_000_000_000), "file:///out.mp4", &valid)
                .unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "1700000000000");
        assert_eq!(value["uri"], "file:///out.mp4");
        assert_eq!(value["sourceUri"], "file:///videos/beach.mp4");
        assert_eq!(value["name"], "Sunset");
        assert_eq!(value["description"], "waves");
        assert_eq!(value["startTime"], 0.0);
        assert_eq!(value["endTime"], 5.0);

        let parsed: ClipRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_trimmed_clip_keeps_source_offsets() {
        let mut d = draft();
        d.start_secs = 30.0;
        d.end_secs = 40.0;
        let record =
            ClipRecord::from_draft(ClipId::new("1"), "/clips/cropped_1.mp4", &d.validate().unwrap())
                .unwrap();

        assert_eq!(record.source_uri(), "file:///videos/beach.mp4");
        assert_eq!(record.media_uri(), "/clips/cropped_1.mp4");
        assert_eq!((record.start_time(), record.end_time()), (30.0, 40.0));
        let range = record.media_range();
        assert_eq!((range.start_secs(), range.end_secs()), (0.0, 10.0));
    }

    #[test]
    fn test_record_without_source_field_plays_from_uri() {
        let json = r#"{"id":"1","uri":"a.mp4","name":"x","startTime":2,"endTime":5}"#;
        let record: ClipRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.source_uri(), "a.mp4");
        assert_eq!(record.media_uri(), "a.mp4");
        assert!(!record.has_own_media());
        assert_eq!(record.media_range(), record.selection());
    }

    #[test]
    fn test_deserialization_rejects_invalid_records() {
        let json = r#"{"id":"1","uri":"a.mp4","name":"","startTime":0,"endTime":1}"#;
        assert!(serde_json::from_str::<ClipRecord>(json).is_err());

        let json = r#"{"id":"1","uri":"a.mp4","name":"x","startTime":5,"endTime":1}"#;
        assert!(serde_json::from_str::<ClipRecord>(json).is_err());
    }

    #[test]
    fn test_blank_description_reads_as_none() {
        let json = r#"{"id":"1","uri":"a.mp4","name":"x","description":" ","startTime":0,"endTime":1}"#;
        let record: ClipRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.description(), None);
    }

    #[test]
    fn test_with_metadata_keeps_identity_and_range() {
        let valid = draft().validate().unwrap();
        let record = ClipRecord::from_draft(ClipId::new("42"), "out.mp4", &valid).unwrap();

        let edited = record.with_metadata(" Renamed ", Some("")).unwrap();
        assert_eq!(edited.id(), record.id());
        assert_eq!(edited.name(), "Renamed");
        assert_eq!(edited.description(), None);
        assert_eq!(edited.selection(), record.selection());

        assert_eq!(
            record.with_metadata("", None).unwrap_err(),
            ValidationError::EmptyName
        );
    }
}

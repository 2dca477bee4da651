pub mod check;
pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod probe;
pub mod show;

use cliptrim_clip_model::{ClipId, ClipRecord};
use cliptrim_common::error::CliptrimError;
use cliptrim_editor::format_timestamp;
use cliptrim_library::ClipLibrary;

/// Look up a saved clip by id.
pub fn find_clip(library: &ClipLibrary, id: &str) -> anyhow::Result<ClipRecord> {
    library
        .queries()
        .cached()
        .get(&ClipId::new(id))
        .cloned()
        .ok_or_else(|| CliptrimError::not_found(format!("no clip with id {id}")).into())
}

/// `mm:ss - mm:ss`
pub fn range_label(clip: &ClipRecord) -> String {
    format!(
        "{} - {}",
        format_timestamp(clip.start_time()),
        format_timestamp(clip.end_time())
    )
}

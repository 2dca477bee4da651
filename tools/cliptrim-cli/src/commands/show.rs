//! Show one saved clip.

use cliptrim_editor::{format_timestamp, ClipPreview};
use cliptrim_library::ClipLibrary;

use super::{find_clip, range_label};

pub fn run(library: &ClipLibrary, id: &str) -> anyhow::Result<()> {
    let clip = find_clip(library, id)?;

    println!("Clip: {}", clip.name());
    println!("  ID: {}", clip.id());
    println!("  Source: {}", clip.source_uri());
    println!("  Media: {}", clip.media_uri());
    println!(
        "  Range: {} ({:.1}s)",
        range_label(&clip),
        clip.selection().duration_secs()
    );
    println!("  Preview: {}", preview_label(&ClipPreview::for_clip(&clip)));
    match clip.description() {
        Some(description) => println!("  Description: {description}"),
        None => println!("  Description: -"),
    }
    Ok(())
}

fn preview_label(preview: &ClipPreview) -> String {
    match preview.end() {
        Some(end) => format!(
            "plays {} - {} of the media",
            format_timestamp(preview.start()),
            format_timestamp(end)
        ),
        None => format!("plays from {} to the end", format_timestamp(preview.start())),
    }
}

//! List saved clips.

use cliptrim_library::ClipLibrary;

use super::range_label;

pub fn run(library: &ClipLibrary, json: bool) -> anyhow::Result<()> {
    let view = library.queries().cached();

    if json {
        println!("{}", serde_json::to_string_pretty(view.clips())?);
        return Ok(());
    }

    if view.is_empty() {
        println!("No clips yet. Create one with `cliptrim create <SOURCE>`.");
        return Ok(());
    }

    println!("{:<15} {:<13} NAME", "ID", "RANGE");
    for clip in view.clips() {
        println!("{:<15} {:<13} {}", clip.id(), range_label(clip), clip.name());
    }
    println!();
    println!("{} clip(s)", view.len());
    Ok(())
}

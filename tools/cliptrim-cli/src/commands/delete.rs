//! Delete a clip.

use cliptrim_library::ClipLibrary;

use super::find_clip;

pub async fn run(library: &ClipLibrary, id: &str) -> anyhow::Result<()> {
    let clip = find_clip(library, id)?;
    library
        .queries()
        .delete_clip(clip.id())?
        .confirmed()
        .await?;
    println!("Deleted clip {} ({})", clip.id(), clip.name());
    Ok(())
}

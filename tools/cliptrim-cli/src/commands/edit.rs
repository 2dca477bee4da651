//! Rename or re-describe a clip.

use cliptrim_library::{edit_clip, ClipLibrary};

use super::find_clip;

pub async fn run(
    library: &ClipLibrary,
    id: &str,
    name: Option<String>,
    description: Option<String>,
) -> anyhow::Result<()> {
    let clip = find_clip(library, id)?;
    if name.is_none() && description.is_none() {
        anyhow::bail!("Nothing to change: pass --name and/or --description");
    }

    let name = name.as_deref().unwrap_or(clip.name());
    let description = match description.as_deref() {
        Some(d) => Some(d),
        None => clip.description(),
    };
    edit_clip(library.queries(), &clip, name, description)?
        .confirmed()
        .await?;

    println!("Updated clip {}", clip.id());
    Ok(())
}

//! Crop a new clip.

use cliptrim_editor::format_timestamp;
use cliptrim_library::ClipLibrary;

use super::{find_clip, range_label};

pub struct CreateArgs {
    pub source: Option<String>,
    pub from: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
}

pub async fn run(library: &ClipLibrary, args: CreateArgs) -> anyhow::Result<()> {
    let queries = library.queries();

    let mut session = match (&args.from, &args.source) {
        (Some(id), _) => {
            let saved = find_clip(library, id)?;
            println!("Based on clip {} ({})", saved.id(), saved.name());
            let mut session = library.duplicate(&saved);
            if let Err(e) = session.refresh_media(queries).await {
                tracing::warn!(error = %e, "Could not probe source of saved clip");
            }
            session
        }
        (None, Some(source)) => {
            let mut session = library.new_session();
            session.pick_source(source.clone(), queries).await?;
            session
        }
        (None, None) => anyhow::bail!("Pass a SOURCE or --from <ID>"),
    };

    if let Some(info) = session.media() {
        println!(
            "Source: {} ({}, {}x{})",
            session.source_uri().unwrap_or_default(),
            format_timestamp(info.duration_secs),
            info.width,
            info.height
        );
    }

    if let Some(name) = args.name {
        session.set_name(name);
    }
    if let Some(description) = args.description {
        session.set_description(description);
    }
    if args.start.is_some() || args.end.is_some() {
        let start = args.start.unwrap_or(session.controller().start_marker());
        let end = args.end.unwrap_or(session.controller().end_marker());
        if !session.set_selection(start, end) {
            anyhow::bail!(
                "Range {start}s - {end}s does not fit the source ({}s long)",
                session.controller().total_duration()
            );
        }
    }

    println!("Cropping with {}...", library.gateway().name());
    let clip = session.submit(library.gateway(), queries).await?;

    println!("Created clip {}", clip.id());
    println!("  Name: {}", clip.name());
    println!("  Range: {}", range_label(&clip));
    println!("  Source: {}", clip.source_uri());
    println!("  Media: {}", clip.media_uri());
    Ok(())
}

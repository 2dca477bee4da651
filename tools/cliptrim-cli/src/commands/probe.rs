//! Show media information for a source.

use cliptrim_common::config::AppConfig;
use cliptrim_editor::format_timestamp;
use cliptrim_processing::prober_from_config;

pub async fn run(config: &AppConfig, source: &str) -> anyhow::Result<()> {
    let prober = prober_from_config(config);
    let info = prober.probe(source).await?;

    println!("Source: {source}");
    if info.has_duration() {
        println!(
            "  Duration: {} ({:.2}s)",
            format_timestamp(info.duration_secs),
            info.duration_secs
        );
    } else {
        println!("  Duration: unknown");
    }
    if info.width > 0 && info.height > 0 {
        println!("  Resolution: {}x{}", info.width, info.height);
    }
    if let Some(size) = info.size_label() {
        println!("  Size: {size}");
    }
    if !info.format.is_empty() {
        println!("  Format: {}", info.format);
    }
    println!("  Prober: {}", prober.name());
    Ok(())
}

//! Check the processing backend and storage locations.

use cliptrim_common::config::{config_file_path, AppConfig};
use cliptrim_processing::{gateway_from_config, prober_from_config};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("ClipTrim System Check");
    println!("{}", "=".repeat(50));

    let gateway = gateway_from_config(config);
    let prober = prober_from_config(config);
    let tools = [
        ("Trimming", gateway.name(), gateway.is_available()),
        ("Probing", prober.name(), prober.is_available()),
    ];
    for (role, name, available) in tools {
        if available {
            println!("[OK] {role}: {name}");
        } else {
            println!("[MISSING] {role}: {name} not found on PATH");
        }
    }

    println!();
    println!("Config file: {}", config_file_path().display());
    println!("Clip store: {}", config.store_path().display());
    println!("Clip output: {}", config.output_dir().display());

    println!();
    if tools.iter().all(|(_, _, available)| *available) {
        println!("ClipTrim is ready.");
    } else {
        println!("Install ffmpeg or run with --passthrough.");
    }
    Ok(())
}

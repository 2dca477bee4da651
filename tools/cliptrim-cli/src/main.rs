//! ClipTrim CLI: crop clips out of videos and manage the saved list.
//!
//! Usage:
//!   cliptrim list                     List saved clips
//!   cliptrim show <ID>                Show one clip
//!   cliptrim create <SOURCE> ...      Crop a new clip from a source
//!   cliptrim create --from <ID> ...   Crop a new clip based on a saved one
//!   cliptrim edit <ID> ...            Rename or re-describe a clip
//!   cliptrim delete <ID>              Delete a clip
//!   cliptrim probe <SOURCE>           Show media information
//!   cliptrim check                    Check the processing backend

use clap::{Parser, Subcommand};

use cliptrim_common::config::{AppConfig, ProcessingBackend};
use cliptrim_library::ClipLibrary;

mod commands;

#[derive(Parser)]
#[command(
    name = "cliptrim",
    about = "Crop, name, and keep short clips of your videos",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip ffmpeg: clips reuse the source and probing returns fixed values
    #[arg(long, global = true)]
    passthrough: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved clips
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one saved clip
    Show {
        /// Clip id
        id: String,
    },

    /// Crop a new clip
    Create {
        /// Source video (path or URI)
        #[arg(required_unless_present = "from")]
        source: Option<String>,

        /// Start from a saved clip: same source and range, name marked as a copy
        #[arg(long, conflicts_with = "source")]
        from: Option<String>,

        /// Clip name
        #[arg(short, long)]
        name: Option<String>,

        /// Clip description
        #[arg(short, long)]
        description: Option<String>,

        /// Start of the range (seconds)
        #[arg(long)]
        start: Option<f64>,

        /// End of the range (seconds)
        #[arg(long)]
        end: Option<f64>,
    },

    /// Change the name or description of a clip
    Edit {
        /// Clip id
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a clip
    Delete {
        /// Clip id
        id: String,
    },

    /// Show media information for a source
    Probe {
        /// Source video (path or URI)
        source: String,
    },

    /// Check the configured processing backend
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.passthrough {
        config.processing.backend = ProcessingBackend::Passthrough;
    }
    cliptrim_common::logging::init_logging(&config.logging);

    match cli.command {
        Commands::Check => commands::check::run(&config),
        Commands::Probe { source } => commands::probe::run(&config, &source).await,
        command => {
            let library = ClipLibrary::open(config).await?;
            let result = match command {
                Commands::List { json } => commands::list::run(&library, json),
                Commands::Show { id } => commands::show::run(&library, &id),
                Commands::Create {
                    source,
                    from,
                    name,
                    description,
                    start,
                    end,
                } => {
                    let args = commands::create::CreateArgs {
                        source,
                        from,
                        name,
                        description,
                        start,
                        end,
                    };
                    commands::create::run(&library, args).await
                }
                Commands::Edit {
                    id,
                    name,
                    description,
                } => commands::edit::run(&library, &id, name, description).await,
                Commands::Delete { id } => commands::delete::run(&library, &id).await,
                Commands::Check | Commands::Probe { .. } => Ok(()),
            };
            library.close().await?;
            result
        }
    }
}

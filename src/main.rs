//! Arabesque CLI - generate formula-driven art and keep the gallery fresh.

use anyhow::Result;
use arabesque::config::ArabesqueConfig;
use arabesque::gallery;
use arabesque::workflow::{self, GenerateOptions};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Fixed-name run log, truncated on every start.
const LOG_FILE: &str = "app.log";

#[derive(Parser)]
#[command(name = "arabesque")]
#[command(about = "Generate generative art from randomized formula pairs")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "arabesque.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Generate art images into the output folder
    GenerateArt {
        /// Paint every point in one random color instead of a gradient
        #[arg(short, long)]
        single_color: bool,

        /// Number of images to generate
        #[arg(short, long, default_value_t = 1)]
        total: u32,

        /// Draw from the curated formula table instead of synthesizing
        #[arg(short = 'f', long)]
        using_formula: bool,

        /// Seed for the run; per-image seeds derive from it
        #[arg(short = 'S', long)]
        seed: Option<u64>,

        /// Also save a JSON sidecar per image under the data folder
        #[arg(long)]
        save_data: bool,
    },

    /// Delete generated images by base name
    DeleteArt {
        /// Base names to delete, without folder or extension
        #[arg(short, long, required = true)]
        filename: Vec<String>,
    },

    /// Rebuild the README gallery from the images folder
    GenerateReadme {
        /// Feature only the most recently generated image
        #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
        display_latest: bool,
    },
}

fn main() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("arabesque=info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    let cli = Cli::parse();
    let config = ArabesqueConfig::load(Path::new(&cli.config))?;

    match cli.command {
        Commands::GenerateArt {
            single_color,
            total,
            using_formula,
            seed,
            save_data,
        } => {
            let seed = seed.unwrap_or_else(rand::random);
            let options = GenerateOptions {
                total,
                single_color,
                using_formula,
                save_data,
                seed,
            };

            println!("Generating {} images with seed {}...", total, seed);
            let summary = workflow::generate_batch(&config, &options)?;
            println!(
                "Saved {}/{} images to {}",
                summary.generated(),
                summary.requested,
                config.output.images_dir().display()
            );
        }

        Commands::DeleteArt { filename } => {
            let summary = gallery::delete_images(&config.output, &filename);
            println!(
                "Deleted {} images ({} not found)",
                summary.removed, summary.missing
            );
        }

        Commands::GenerateReadme { display_latest } => {
            let count = gallery::write_readme(
                &config.output,
                Path::new(&config.readme.path),
                display_latest,
            )?;
            println!("Added {} images to {}", count, config.readme.path);
        }
    }

    Ok(())
}

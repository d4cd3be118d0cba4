use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sprout-assets")]
#[command(author, version, about = "Asset preparation for the Sprout front-end")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root (overrides project.root from the config)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split an image into a background copy and a centered square crop
    Split {
        /// Input image
        #[arg(required = true)]
        image: PathBuf,
    },

    /// Remove the background of the crop image with rembg
    RemoveBg {
        /// Input image (defaults to the split crop in the assets directory)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output image (defaults to the transparent image in the assets directory)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Rebrand source files and rename the Ghost components
    Rebrand {
        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split an image, then remove the background of the crop
    Prepare {
        /// Input image
        #[arg(required = true)]
        image: PathBuf,
    },

    /// Check that the tools needed for background removal are available
    CheckTools {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

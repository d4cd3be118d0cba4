mod cli;

use sprout_assets::{
    background::{BackgroundOutcome, BackgroundRemover},
    config::{self, Config},
    rebrand, split,
};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "sprout_assets=trace,sprout_tools=trace".to_string()
        } else {
            "sprout_assets=warn,sprout_tools=warn".to_string()
        }
    });

    // Results go to stdout; diagnostics stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Split { image } => {
            let config = load_config(cli.config.as_deref(), cli.project)?;
            split_file(&image, &config).map(|_| ())
        }
        Commands::RemoveBg { input, output } => {
            let config = load_config(cli.config.as_deref(), cli.project)?;
            let assets = config.project.assets_path();
            let input = input.unwrap_or_else(|| assets.join(&config.background.input_name));
            let output = output.unwrap_or_else(|| assets.join(&config.background.output_name));
            remove_background(&input, &output, &config)
        }
        Commands::Rebrand { dry_run, json } => {
            let config = load_config(cli.config.as_deref(), cli.project)?;
            rebrand_project(&config, dry_run, json)
        }
        Commands::Prepare { image } => {
            let config = load_config(cli.config.as_deref(), cli.project)?;
            let outcome = split_file(&image, &config)?;
            let output = config
                .project
                .assets_path()
                .join(&config.background.output_name);
            remove_background(&outcome.crop_path, &output, &config)
        }
        Commands::CheckTools { json } => {
            let config = load_config(cli.config.as_deref(), cli.project)?;
            check_tools(&config, json)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("sprout-assets {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>, project: Option<PathBuf>) -> Result<Config> {
    let mut config = config::load_config_or_default(path)?;
    if let Some(root) = project {
        config.project.root = root;
    }
    tracing::debug!("Project root: {:?}", config.project.root);
    Ok(config)
}

fn split_file(image: &Path, config: &Config) -> Result<split::SplitOutcome> {
    let out_dir = config.project.assets_path();
    let outcome = split::split_image(image, &out_dir, &config.split)?;

    println!("Size: {}x{}", outcome.width, outcome.height);
    println!("Cropped to {}", outcome.crop_box);

    Ok(outcome)
}

fn remove_background(input: &Path, output: &Path, config: &Config) -> Result<()> {
    let remover = BackgroundRemover::new(config.background.clone())
        .with_progress_callback(Box::new(|step: &str| println!("{}", step)));

    let rt = tokio::runtime::Runtime::new()?;
    match rt.block_on(remover.remove(input, output))? {
        BackgroundOutcome::Created { path } => {
            println!("Successfully created {}", path.display());
        }
        BackgroundOutcome::Failed { reason } => {
            tracing::warn!("{}", reason);
            println!("Failed to create transparent image.");
        }
    }

    Ok(())
}

fn rebrand_project(config: &Config, dry_run: bool, json: bool) -> Result<()> {
    let report = rebrand::rebrand_project(&config.project, &config.rebrand, dry_run)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let prefix = if dry_run { "[DRY RUN] " } else { "" };
    for path in &report.files_rewritten {
        println!("{}Rewrote {}", prefix, path.display());
    }
    for rename in &report.renamed {
        println!(
            "{}Renamed {} to {}",
            prefix,
            rename.from.display(),
            rename.to.display()
        );
    }
    println!(
        "{}{} files scanned, {} rewritten, {} renamed",
        prefix,
        report.files_scanned,
        report.files_rewritten.len(),
        report.renamed.len()
    );

    Ok(())
}

fn check_tools(config: &Config, json: bool) -> Result<()> {
    let remover = BackgroundRemover::new(config.background.clone());
    let rt = tokio::runtime::Runtime::new()?;
    let tools = rt.block_on(remover.check_tools());

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!("Checking external tools...\n");

    let mut all_ok = true;
    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Background removal will try to install rembg on first use.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Project root: {}", config.project.root.display());
    println!("  Source dir: {}", config.project.src_path().display());
    println!("  Assets dir: {}", config.project.assets_path().display());
    println!("  Replacements: {}", config.rebrand.replacements.len());
    println!("  Extensions: {}", config.rebrand.extensions.join(", "));
    println!("  Renames: {}", config.rebrand.renames.len());
    println!("  Crop ratio: {}", config.split.crop_ratio);
    println!(
        "  Background tool: {} {}",
        config.background.interpreter,
        config.background.module_args.join(" ")
    );

    Ok(())
}

mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./sprout-assets.toml",
        "~/.config/sprout-assets/config.toml",
        "/etc/sprout-assets/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let ratio = config.split.crop_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        anyhow::bail!("split.crop_ratio must be in (0, 1], got {}", ratio);
    }

    if config.split.background_name.is_empty() || config.split.crop_name.is_empty() {
        anyhow::bail!("split output names cannot be empty");
    }

    if config.rebrand.extensions.is_empty() {
        anyhow::bail!("rebrand.extensions cannot be empty");
    }

    for replacement in &config.rebrand.replacements {
        if replacement.from.is_empty() {
            anyhow::bail!(
                "rebrand replacement into '{}' has an empty search string",
                replacement.to
            );
        }
    }

    if config.background.interpreter.is_empty() {
        anyhow::bail!("background.interpreter cannot be empty");
    }

    if config.background.timeout_secs == 0 {
        anyhow::bail!("background.timeout_secs cannot be 0");
    }

    if !config.project.root.exists() {
        tracing::warn!("Project root does not exist: {:?}", config.project.root);
    }

    Ok(())
}

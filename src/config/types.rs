use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub rebrand: RebrandConfig,

    #[serde(default)]
    pub split: SplitConfig,

    #[serde(default)]
    pub background: BackgroundConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Project root; every other project path is relative to it
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Source tree walked by the rebrand pass
    #[serde(default = "default_src_dir")]
    pub src_dir: PathBuf,

    /// Directory split outputs and background removal read/write
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_src_dir() -> PathBuf {
    PathBuf::from("src")
}
fn default_assets_dir() -> PathBuf {
    PathBuf::from("src/assets")
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            src_dir: default_src_dir(),
            assets_dir: default_assets_dir(),
        }
    }
}

impl ProjectConfig {
    pub fn src_path(&self) -> PathBuf {
        self.root.join(&self.src_dir)
    }

    pub fn assets_path(&self) -> PathBuf {
        self.root.join(&self.assets_dir)
    }
}

/// A literal `from` -> `to` substitution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A file move, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenameRule {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl RenameRule {
    pub fn new(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RebrandConfig {
    /// Applied in order; "Ghost" must run before "ghost" so capitalization survives
    #[serde(default = "default_replacements")]
    pub replacements: Vec<Replacement>,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_renames")]
    pub renames: Vec<RenameRule>,
}

fn default_replacements() -> Vec<Replacement> {
    vec![
        Replacement::new("Ghost", "Sprout"),
        Replacement::new("ghost", "sprout"),
    ]
}

fn default_extensions() -> Vec<String> {
    sprout_common::paths::text_extensions()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_renames() -> Vec<RenameRule> {
    vec![
        RenameRule::new(
            "src/components/GhostCharacter.jsx",
            "src/components/SproutCharacter.jsx",
        ),
        RenameRule::new(
            "src/components/GhostCharacter.css",
            "src/components/SproutCharacter.css",
        ),
        RenameRule::new("src/hooks/useGhostEngine.js", "src/hooks/useSproutEngine.js"),
    ]
}

impl Default for RebrandConfig {
    fn default() -> Self {
        Self {
            replacements: default_replacements(),
            extensions: default_extensions(),
            renames: default_renames(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SplitConfig {
    /// File name of the full-size copy
    #[serde(default = "default_background_name")]
    pub background_name: String,

    /// File name of the center crop
    #[serde(default = "default_crop_name")]
    pub crop_name: String,

    /// Crop side as a fraction of image height
    #[serde(default = "default_crop_ratio")]
    pub crop_ratio: f64,
}

fn default_background_name() -> String {
    "prd_bg.jpg".to_string()
}
fn default_crop_name() -> String {
    "prd_sprout_crop.jpg".to_string()
}
fn default_crop_ratio() -> f64 {
    0.4
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            background_name: default_background_name(),
            crop_name: default_crop_name(),
            crop_ratio: default_crop_ratio(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackgroundConfig {
    /// Interpreter hosting the rembg module
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Arguments placed before `<input> <output>`
    #[serde(default = "default_module_args")]
    pub module_args: Vec<String>,

    /// Arguments that exit 0 only when rembg is importable
    #[serde(default = "default_probe_args")]
    pub probe_args: Vec<String>,

    #[serde(default = "default_install_program")]
    pub install_program: String,

    #[serde(default = "default_install_args")]
    pub install_args: Vec<String>,

    /// Install rembg when the probe fails (default: true)
    #[serde(default = "default_auto_install")]
    pub auto_install: bool,

    /// Input file name inside the assets directory
    #[serde(default = "default_input_name")]
    pub input_name: String,

    /// Output file name inside the assets directory
    #[serde(default = "default_output_name")]
    pub output_name: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_interpreter() -> String {
    "python3".to_string()
}
fn default_module_args() -> Vec<String> {
    vec!["-m".to_string(), "rembg".to_string(), "i".to_string()]
}
fn default_probe_args() -> Vec<String> {
    vec!["-c".to_string(), "import rembg".to_string()]
}
fn default_install_program() -> String {
    "pip".to_string()
}
fn default_install_args() -> Vec<String> {
    vec![
        "install".to_string(),
        "rembg[cli]".to_string(),
        "--quiet".to_string(),
    ]
}
fn default_auto_install() -> bool {
    true
}
fn default_input_name() -> String {
    "prd_sprout_crop.jpg".to_string()
}
fn default_output_name() -> String {
    "sprout_transparent.png".to_string()
}
fn default_timeout_secs() -> u64 {
    600
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            module_args: default_module_args(),
            probe_args: default_probe_args(),
            install_program: default_install_program(),
            install_args: default_install_args(),
            auto_install: default_auto_install(),
            input_name: default_input_name(),
            output_name: default_output_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

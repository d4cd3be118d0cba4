//! External tool detection.
//!
//! The [`ToolRegistry`] resolves the programs background removal depends on
//! (the Python interpreter and its package installer) and provides lookup
//! methods for the rest of the workspace.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sprout_common::Error;

/// A resolved external tool.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name the tool was requested under (e.g. "python3").
    pub name: String,
    /// Resolved path to the executable.
    pub path: PathBuf,
}

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// Version string (first line of `--version` output), if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool configurations.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    requested: Vec<String>,
    tools: HashMap<String, ToolConfig>,
}

impl ToolRegistry {
    /// Discover tools by name or path.
    ///
    /// Each entry is resolved with [`which::which`], which accepts both bare
    /// names searched in `PATH` and explicit paths. Tools that are not found
    /// are omitted from the registry but still reported by
    /// [`check_all`](Self::check_all).
    pub fn discover<I, S>(programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut requested = Vec::new();
        let mut tools = HashMap::new();

        for program in programs {
            let name = program.as_ref().to_string();
            if requested.contains(&name) {
                continue;
            }

            match which::which(&name) {
                Ok(path) => {
                    tracing::debug!("Resolved {} to {}", name, path.display());
                    tools.insert(
                        name.clone(),
                        ToolConfig {
                            name: name.clone(),
                            path,
                        },
                    );
                }
                Err(e) => tracing::debug!("Tool {} not found: {}", name, e),
            }
            requested.push(name);
        }

        Self { requested, tools }
    }

    /// Return the [`ToolConfig`] for the given tool, or an [`Error::Tool`]
    /// if it was not found during discovery.
    pub fn require(&self, name: &str) -> sprout_common::Result<&ToolConfig> {
        self.tools
            .get(name)
            .ok_or_else(|| Error::tool(name, format!("{name} not found; is it installed and in PATH?")))
    }

    /// Check all requested tools, in request order, and return availability
    /// information.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        self.requested
            .iter()
            .map(|name| match self.tools.get(name) {
                Some(cfg) => ToolInfo {
                    name: name.clone(),
                    available: true,
                    version: detect_version(&cfg.path),
                    path: Some(cfg.path.clone()),
                },
                None => ToolInfo {
                    name: name.clone(),
                    available: false,
                    version: None,
                    path: None,
                },
            })
            .collect()
    }
}

/// Run `<tool> --version` and return the first non-empty line of output.
/// Older Pythons print their version to stderr.
fn detect_version(path: &Path) -> Option<String> {
    let output = std::process::Command::new(path)
        .arg("--version")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

//! Project rebrand: literal text substitution plus fixed file renames.
//!
//! The substitution pass walks the project's source tree and rewrites every
//! allow-listed file whose content changes. The rename pass then moves a
//! fixed list of files. Any I/O failure aborts the run; files rewritten
//! before the failure stay rewritten.

mod rename;

pub use rename::{apply_renames, Rename};

use crate::config::{ProjectConfig, RebrandConfig, Replacement};
use anyhow::{Context, Result};
use serde::Serialize;
use sprout_common::paths::has_allowed_extension;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Summary of a rebrand run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RebrandReport {
    /// Allow-listed files that were read.
    pub files_scanned: usize,
    /// Files whose content changed (written unless `dry_run`).
    pub files_rewritten: Vec<PathBuf>,
    /// Total occurrences replaced across all files.
    pub replacements: usize,
    /// Renames performed (or that would be performed in a dry run).
    pub renamed: Vec<Rename>,
    pub dry_run: bool,
}

/// Apply each replacement in order to `text`.
///
/// Every replacement is literal and non-overlapping, scanning left to right,
/// and sees the output of the previous one. Returns the new text and the
/// number of occurrences replaced.
pub fn apply_replacements(text: &str, replacements: &[Replacement]) -> (String, usize) {
    let mut current = text.to_string();
    let mut count = 0;

    for replacement in replacements {
        if replacement.from.is_empty() {
            continue;
        }
        let hits = current.matches(replacement.from.as_str()).count();
        if hits > 0 {
            current = current.replace(replacement.from.as_str(), &replacement.to);
            count += hits;
        }
    }

    (current, count)
}

/// Run the substitution pass over the source tree, then the rename pass.
pub fn rebrand_project(
    project: &ProjectConfig,
    config: &RebrandConfig,
    dry_run: bool,
) -> Result<RebrandReport> {
    let src = project.src_path();
    if !src.is_dir() {
        anyhow::bail!("Source directory does not exist: {:?}", src);
    }

    let mut report = RebrandReport {
        dry_run,
        ..Default::default()
    };

    substitute_tree(&src, config, dry_run, &mut report)?;
    report.renamed = apply_renames(&project.root, &config.renames, dry_run)?;

    info!(
        "Rebrand complete: {} scanned, {} rewritten, {} replacements, {} renamed{}",
        report.files_scanned,
        report.files_rewritten.len(),
        report.replacements,
        report.renamed.len(),
        if dry_run { " (dry run)" } else { "" }
    );

    Ok(report)
}

fn substitute_tree(
    dir: &Path,
    config: &RebrandConfig,
    dry_run: bool,
    report: &mut RebrandReport,
) -> Result<()> {
    info!("Scanning directory: {:?}", dir);

    // Symlinked files are rewritten through the link; symlinked directories
    // are listed but never descended into.
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", dir))?;
        let path = entry.path();
        let is_file = if entry.path_is_symlink() {
            path.is_file()
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            continue;
        }

        if !has_allowed_extension(path, config.extensions.as_slice()) {
            continue;
        }

        report.files_scanned += 1;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let (new_content, hits) = apply_replacements(&content, &config.replacements);

        if new_content == content {
            continue;
        }

        debug!("{} replacement(s) in {:?}", hits, path);
        if !dry_run {
            std::fs::write(path, new_content)
                .with_context(|| format!("Failed to write {:?}", path))?;
        }
        report.replacements += hits;
        report.files_rewritten.push(path.to_path_buf());
    }

    Ok(())
}

use crate::config::RenameRule;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A rename that was applied, with paths relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Move each existing `root/from` to `root/to`, in order.
///
/// Missing sources are skipped. An existing target is replaced, following
/// [`std::fs::rename`]. In a dry run nothing moves but the result still
/// lists what would have.
pub fn apply_renames(root: &Path, rules: &[RenameRule], dry_run: bool) -> Result<Vec<Rename>> {
    let mut renamed = Vec::new();

    for rule in rules {
        let old_path = root.join(&rule.from);
        let new_path = root.join(&rule.to);

        if !old_path.exists() {
            tracing::debug!("Nothing to rename at {:?}", old_path);
            continue;
        }

        if dry_run {
            tracing::info!("[DRY RUN] Would rename {:?} to {:?}", rule.from, rule.to);
        } else {
            if new_path.exists() {
                tracing::warn!("Overwriting existing {:?}", new_path);
            }
            std::fs::rename(&old_path, &new_path)
                .with_context(|| format!("Failed to rename {:?} to {:?}", old_path, new_path))?;
            tracing::info!("Renamed {:?} to {:?}", rule.from, rule.to);
        }

        renamed.push(Rename {
            from: rule.from.clone(),
            to: rule.to.clone(),
        });
    }

    Ok(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_renames_existing_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/components/GhostCharacter.jsx", "x");

        let rules = vec![
            RenameRule::new("src/components/GhostCharacter.jsx", "src/components/SproutCharacter.jsx"),
            RenameRule::new("src/hooks/useGhostEngine.js", "src/hooks/useSproutEngine.js"),
        ];
        let renamed = apply_renames(dir.path(), &rules, false).unwrap();

        assert_eq!(renamed.len(), 1);
        assert_eq!(renamed[0].to, PathBuf::from("src/components/SproutCharacter.jsx"));
        assert!(!dir.path().join("src/components/GhostCharacter.jsx").exists());
        assert!(dir.path().join("src/components/SproutCharacter.jsx").exists());
    }

    #[test]
    fn test_existing_target_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.css", "new");
        touch(dir.path(), "b.css", "old");

        let renamed = apply_renames(dir.path(), &[RenameRule::new("a.css", "b.css")], false).unwrap();

        assert_eq!(renamed.len(), 1);
        assert_eq!(std::fs::read_to_string(dir.path().join("b.css")).unwrap(), "new");
    }

    #[test]
    fn test_dry_run_leaves_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.js", "x");

        let renamed = apply_renames(dir.path(), &[RenameRule::new("a.js", "b.js")], true).unwrap();

        assert_eq!(renamed, vec![Rename { from: "a.js".into(), to: "b.js".into() }]);
        assert!(dir.path().join("a.js").exists());
        assert!(!dir.path().join("b.js").exists());
    }

    #[test]
    fn test_missing_target_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.js", "x");

        let result = apply_renames(dir.path(), &[RenameRule::new("a.js", "missing/b.js")], false);
        assert!(result.is_err());
    }
}

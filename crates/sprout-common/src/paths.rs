//! Path utilities for matching files against an extension allow-list.
//!
//! Matching is a case-sensitive suffix check on the file name, so `App.JSX`
//! does not match `jsx` and a bare `.js` dotfile does.

use std::path::Path;

/// Source extensions eligible for text substitution by default.
const TEXT_EXTENSIONS: &[&str] = &["jsx", "js", "css", "html"];

/// Check if a path's file name ends with `.{ext}` for any allowed `ext`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use sprout_common::paths::has_allowed_extension;
///
/// let allowed = ["jsx", "js"];
/// assert!(has_allowed_extension(Path::new("src/App.jsx"), &allowed));
/// assert!(has_allowed_extension(Path::new("src/hooks/useGhostEngine.js"), &allowed));
/// assert!(!has_allowed_extension(Path::new("src/assets/logo.png"), &allowed));
/// ```
pub fn has_allowed_extension<S: AsRef<str>>(path: &Path, allowed: &[S]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    allowed.iter().any(|ext| {
        let ext = ext.as_ref();
        name.len() > ext.len()
            && name.ends_with(ext)
            && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
    })
}

/// Get the default list of text extensions.
///
/// # Examples
///
/// ```
/// use sprout_common::paths::text_extensions;
///
/// assert!(text_extensions().contains(&"jsx"));
/// assert!(text_extensions().contains(&"html"));
/// ```
#[must_use]
pub fn text_extensions() -> &'static [&'static str] {
    TEXT_EXTENSIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_default_extensions() {
        for name in ["App.jsx", "main.js", "index.css", "index.html"] {
            assert!(
                has_allowed_extension(Path::new(name), text_extensions()),
                "{name} should match"
            );
        }
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["logo.png", "README.md", "package.json", "App.tsx", "Makefile"] {
            assert!(
                !has_allowed_extension(Path::new(name), text_extensions()),
                "{name} should not match"
            );
        }
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!has_allowed_extension(Path::new("App.JSX"), text_extensions()));
    }

    #[test]
    fn test_suffix_must_follow_dot() {
        // "ajs" ends with "js" but the extension is not "js".
        assert!(!has_allowed_extension(Path::new("file.ajs"), &["js"]));
        assert!(!has_allowed_extension(Path::new("js"), &["js"]));
    }

    #[test]
    fn test_dotfile_matches() {
        assert!(has_allowed_extension(Path::new(".js"), &["js"]));
    }

    #[test]
    fn test_empty_allow_list() {
        let none: [&str; 0] = [];
        assert!(!has_allowed_extension(Path::new("App.jsx"), &none));
    }
}

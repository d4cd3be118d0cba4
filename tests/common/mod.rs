//! Shared fixtures for integration tests.

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway copy of a small Ghost-branded front-end project.
pub struct FixtureProject {
    pub dir: TempDir,
}

impl FixtureProject {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = Self { dir };

        project.write(
            "src/App.jsx",
            "import GhostCharacter from './components/GhostCharacter';\n\
             import { useGhostEngine } from './hooks/useGhostEngine';\n\
             export default function App() {\n  const { ghostState } = useGhostEngine();\n  \
             return <GhostCharacter state={ghostState.state} />;\n}\n",
        );
        project.write(
            "src/components/GhostCharacter.jsx",
            "import './GhostCharacter.css';\n\
             // Make the ghost track the mouse occasionally\n\
             const GhostCharacter = () => <div className=\"ghost-body\" />;\n\
             export default GhostCharacter;\n",
        );
        project.write(
            "src/components/GhostCharacter.css",
            ".ghost-body { border-radius: 50% 50% 0 0; }\n",
        );
        project.write(
            "src/hooks/useGhostEngine.js",
            "export const useGhostEngine = () => {\n  \
             const saved = localStorage.getItem('sprout_ghost_state');\n  \
             return { ghostState: JSON.parse(saved) };\n};\n",
        );
        project.write("src/index.html", "<title>Ghost</title>\n");
        project.write("src/components/Toast.jsx", "export const Toast = () => null;\n");

        // Outside the allow-list; must never change.
        project.write("src/notes.md", "Ghost ghost GHOST\n");
        project.write("src/data/ghost.json", "{\"name\": \"Ghost\"}\n");
        project.write("src/App.JSX.bak", "Ghost\n");

        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Every file under the project with its bytes, sorted by path.
    pub fn snapshot(&self) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<_> = walkdir::WalkDir::new(self.root())
            .into_iter()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().is_file())
            .map(|e| (e.path().to_path_buf(), std::fs::read(e.path()).unwrap()))
            .collect();
        files.sort();
        files
    }
}

/// Write a gradient PNG whose pixel at (x, y) is `(x % 256, y % 256, 128)`.
pub fn write_gradient_png(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

//! Background removal through the external `rembg` tool.
//!
//! The tool is a black box: success is judged only by whether the expected
//! output file was written by this run. Tool failures are logged and reported
//! as [`BackgroundOutcome::Failed`], never raised.

use anyhow::Result;
use serde::Serialize;
use sprout_tools::{ToolCommand, ToolInfo, ToolRegistry};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::config::BackgroundConfig;

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Outcome of a background removal run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BackgroundOutcome {
    /// The output file was written by this run.
    Created { path: PathBuf },
    /// No output file was produced.
    Failed { reason: String },
}

/// Runs `rembg` on single images.
pub struct BackgroundRemover {
    config: BackgroundConfig,
    registry: ToolRegistry,
    progress_callback: Option<ProgressCallback>,
}

impl BackgroundRemover {
    pub fn new(config: BackgroundConfig) -> Self {
        let registry =
            ToolRegistry::discover([config.interpreter.as_str(), config.install_program.as_str()]);
        Self {
            config,
            registry,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn report_progress(&self, step: &str) {
        if let Some(ref cb) = self.progress_callback {
            cb(step);
        }
        tracing::info!("{}", step);
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    /// Remove the background of `input`, writing `output`.
    ///
    /// Everything the external tool does wrong becomes
    /// [`BackgroundOutcome::Failed`]. An existing `output` is never removed;
    /// it only counts as created when the run rewrote it.
    pub async fn remove(&self, input: &Path, output: &Path) -> Result<BackgroundOutcome> {
        let interpreter = match self.registry.require(&self.config.interpreter) {
            Ok(tool) => tool.path.clone(),
            Err(e) => {
                tracing::warn!("{}", e);
                return Ok(BackgroundOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        if !self.module_available(&interpreter).await {
            if self.config.auto_install {
                self.report_progress("Installing rembg...");
                self.install().await;
            } else {
                tracing::warn!("rembg is not importable and auto_install is disabled");
            }
        }

        if !input.exists() {
            tracing::warn!("Input image does not exist: {:?}", input);
        }

        if output.exists() && !output.is_file() {
            tracing::warn!("Output path is not a regular file: {:?}", output);
            return Ok(BackgroundOutcome::Failed {
                reason: format!("{} is not a regular file", output.display()),
            });
        }
        let before = file_stamp(output);

        self.report_progress(&format!("Removing background from {}...", input.display()));

        let result = ToolCommand::new(interpreter)
            .args(self.config.module_args.iter().cloned())
            .arg(input.to_string_lossy())
            .arg(output.to_string_lossy())
            .timeout(self.timeout())
            .execute()
            .await;

        let tool_error = match result {
            Ok(out) => {
                if !out.stderr.trim().is_empty() {
                    tracing::debug!("rembg stderr: {}", out.stderr.trim());
                }
                None
            }
            Err(e) => {
                tracing::warn!("Background removal command failed: {}", e);
                Some(e.to_string())
            }
        };

        let after = file_stamp(output);
        if after.is_some() && after != before {
            Ok(BackgroundOutcome::Created {
                path: output.to_path_buf(),
            })
        } else {
            Ok(BackgroundOutcome::Failed {
                reason: tool_error
                    .unwrap_or_else(|| format!("{} was not written", output.display())),
            })
        }
    }

    /// Availability of the interpreter, the installer and the rembg module.
    pub async fn check_tools(&self) -> Vec<ToolInfo> {
        let mut infos = self.registry.check_all();

        let module_available = match self.registry.require(&self.config.interpreter) {
            Ok(tool) => self.module_available(&tool.path).await,
            Err(_) => false,
        };
        infos.push(ToolInfo {
            name: "rembg".to_string(),
            available: module_available,
            version: None,
            path: None,
        });

        infos
    }

    async fn module_available(&self, interpreter: &Path) -> bool {
        let result = ToolCommand::new(interpreter.to_path_buf())
            .args(self.config.probe_args.iter().cloned())
            .timeout(self.timeout())
            .execute()
            .await;

        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("rembg probe failed: {}", e);
                false
            }
        }
    }

    /// Failures are logged and otherwise ignored; the run that follows
    /// decides the outcome.
    async fn install(&self) {
        let program = match self.registry.require(&self.config.install_program) {
            Ok(tool) => tool.path.clone(),
            Err(e) => {
                tracing::warn!("Cannot install rembg: {}", e);
                return;
            }
        };

        let result = ToolCommand::new(program)
            .args(self.config.install_args.iter().cloned())
            .timeout(self.timeout())
            .execute()
            .await;

        if let Err(e) = result {
            tracing::warn!("rembg installation failed: {}", e);
        }
    }
}

/// Modification time and length of a regular file, `None` if there is none.
fn file_stamp(path: &Path) -> Option<(Option<SystemTime>, u64)> {
    let meta = std::fs::metadata(path).ok()?;
    if !meta.is_file() {
        return None;
    }
    Some((meta.modified().ok(), meta.len()))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// `cp <input> <output>` stands in for a working rembg.
    fn copying_config() -> BackgroundConfig {
        BackgroundConfig {
            interpreter: "cp".to_string(),
            module_args: vec![],
            probe_args: vec!["--version".to_string()],
            auto_install: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn created_when_tool_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("crop.jpg");
        let output = dir.path().join("out.png");
        std::fs::write(&input, b"pixels").unwrap();

        let outcome = BackgroundRemover::new(copying_config())
            .remove(&input, &output)
            .await
            .unwrap();

        assert_eq!(outcome, BackgroundOutcome::Created { path: output.clone() });
        assert_eq!(std::fs::read(&output).unwrap(), b"pixels");
    }

    #[tokio::test]
    async fn failed_when_tool_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("crop.jpg");
        std::fs::write(&input, b"pixels").unwrap();
        let config = BackgroundConfig {
            interpreter: "true".to_string(),
            ..copying_config()
        };

        let outcome = BackgroundRemover::new(config)
            .remove(&input, &dir.path().join("out.png"))
            .await
            .unwrap();

        assert!(matches!(outcome, BackgroundOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn failed_when_tool_errors() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = BackgroundRemover::new(copying_config())
            .remove(&dir.path().join("missing.jpg"), &dir.path().join("out.png"))
            .await
            .unwrap();

        match outcome {
            BackgroundOutcome::Failed { reason } => assert!(reason.contains("cp"), "{reason}"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_when_interpreter_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackgroundConfig {
            interpreter: "nonexistent_python_xyz".to_string(),
            ..copying_config()
        };

        let outcome = BackgroundRemover::new(config)
            .remove(&dir.path().join("in.jpg"), &dir.path().join("out.png"))
            .await
            .unwrap();

        match outcome {
            BackgroundOutcome::Failed { reason } => assert!(reason.contains("not found")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn stale_output_is_not_reported_as_created() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.png");
        std::fs::write(&output, b"old").unwrap();
        let config = BackgroundConfig {
            interpreter: "true".to_string(),
            ..copying_config()
        };

        let outcome = BackgroundRemover::new(config)
            .remove(&dir.path().join("in.jpg"), &output)
            .await
            .unwrap();

        assert!(matches!(outcome, BackgroundOutcome::Failed { .. }));
        assert_eq!(std::fs::read(&output).unwrap(), b"old");
    }

    #[tokio::test]
    async fn rewritten_output_is_reported_as_created() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("crop.jpg");
        let output = dir.path().join("out.png");
        std::fs::write(&input, b"new pixels").unwrap();
        std::fs::write(&output, b"old").unwrap();

        let outcome = BackgroundRemover::new(copying_config())
            .remove(&input, &output)
            .await
            .unwrap();

        assert_eq!(outcome, BackgroundOutcome::Created { path: output.clone() });
        assert_eq!(std::fs::read(&output).unwrap(), b"new pixels");
    }

    #[tokio::test]
    async fn directory_output_is_a_failure_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("crop.jpg");
        let output = dir.path().join("out.png");
        std::fs::write(&input, b"pixels").unwrap();
        std::fs::create_dir(&output).unwrap();

        let outcome = BackgroundRemover::new(copying_config())
            .remove(&input, &output)
            .await
            .unwrap();

        match outcome {
            BackgroundOutcome::Failed { reason } => {
                assert!(reason.contains("not a regular file"), "{reason}")
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(output.is_dir());
    }

    #[tokio::test]
    async fn installs_when_probe_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("crop.jpg");
        std::fs::write(&input, b"pixels").unwrap();
        let config = BackgroundConfig {
            // `cp` with no operands exits non-zero, so the probe fails.
            probe_args: vec![],
            install_program: "true".to_string(),
            install_args: vec![],
            auto_install: true,
            ..copying_config()
        };

        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        let remover = BackgroundRemover::new(config).with_progress_callback(Box::new(move |m: &str| {
            sink.lock().unwrap().push(m.to_string());
        }));

        let outcome = remover.remove(&input, &dir.path().join("out.png")).await.unwrap();

        assert!(matches!(outcome, BackgroundOutcome::Created { .. }));
        let messages = messages.lock().unwrap();
        assert_eq!(messages[0], "Installing rembg...");
        assert!(messages[1].starts_with("Removing background from "));
    }

    #[tokio::test]
    async fn check_tools_lists_module_last() {
        let remover = BackgroundRemover::new(copying_config());
        let infos = remover.check_tools().await;
        let names: Vec<&str> = infos.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["cp", "pip", "rembg"]);
    }
}

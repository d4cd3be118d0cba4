//! # sprout-tools
//!
//! External tool management for sprout-assets.
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- resolve the interpreter and
//!   installer used for background removal via `PATH`.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.

pub mod command;
pub mod tools;

pub use command::{ToolCommand, ToolOutput};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};

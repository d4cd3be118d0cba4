//! Sprout-Assets - asset preparation for the Sprout front-end
//!
//! This library crate exposes the operations behind the CLI for integration
//! testing.

pub mod background;
pub mod config;
pub mod rebrand;
pub mod split;

//! Sprout-Common: shared error type and path utilities.
//!
//! - **Error Handling**: [`Error`] and the [`Result`] alias used by the
//!   library crates
//! - **Path Utilities**: extension allow-list matching for the rebrand pass
//!
//! # Examples
//!
//! ```
//! use sprout_common::paths::has_allowed_extension;
//! use sprout_common::{Error, Result};
//! use std::path::Path;
//!
//! let allowed = ["jsx", "css"];
//! assert!(has_allowed_extension(Path::new("src/App.jsx"), &allowed));
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("src/assets"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};

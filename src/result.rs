//! Result type used at the command layer.
//!
//! Library modules return their own `thiserror` enums; commands wrap them in
//! a `color-eyre` report so `main` prints the full error chain.
//!
//! ```rust,ignore
//! use crate::result::Result;
//! use color_eyre::eyre::WrapErr;
//!
//! fn load() -> Result<String> {
//!     let content = std::fs::read_to_string("issue-creator.toml")
//!         .wrap_err("Failed to read configuration file")?;
//!     Ok(content)
//! }
//! ```

use color_eyre::eyre::Result as EyreResult;

/// Standard result type used throughout issue-creator's command layer.
pub type Result<T> = EyreResult<T>;

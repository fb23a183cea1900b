//! Foundation types for the robot toolchain.
//!
//! - [`FileId`] - Interned document identifiers
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - Domain constants (file extensions, built-in library names)
//!
//! This module has NO dependencies on other robot modules.

pub mod constants;
mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

pub use text_size;

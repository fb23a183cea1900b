//! Parser tests
//!
//! Tests for the lossless robot parser and the typed AST over it.

pub mod tests_sections;
